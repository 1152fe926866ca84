use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::accountability::domain::PolicyStance;

#[derive(Debug)]
pub(crate) struct PolicyRecord {
    pub(crate) title: String,
    pub(crate) decided_on: Option<NaiveDate>,
    pub(crate) stance: Option<PolicyStance>,
    pub(crate) summary: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PolicyRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<PolicyRow>() {
        let row = record?;
        records.push(PolicyRecord {
            decided_on: row.decided_date(),
            stance: row.stance.as_deref().and_then(parse_stance),
            summary: row.summary.clone(),
            title: row.title,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct PolicyRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(
        rename = "Decided On",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    decided_on: Option<String>,
    #[serde(rename = "Stance", default, deserialize_with = "empty_string_as_none")]
    stance: Option<String>,
    #[serde(rename = "Summary", default, deserialize_with = "empty_string_as_none")]
    summary: Option<String>,
}

impl PolicyRow {
    fn decided_date(&self) -> Option<NaiveDate> {
        self.decided_on.as_deref().and_then(parse_date)
    }
}

fn parse_stance(value: &str) -> Option<PolicyStance> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sponsored" => Some(PolicyStance::Sponsored),
        "for" | "voted for" | "voted_for" | "yes" => Some(PolicyStance::VotedFor),
        "against" | "voted against" | "voted_against" | "no" => Some(PolicyStance::VotedAgainst),
        "abstained" | "abstain" => Some(PolicyStance::Abstained),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Exports mix plain dates with full timestamps; accept both.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}
