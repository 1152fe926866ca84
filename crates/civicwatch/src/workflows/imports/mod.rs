//! CSV import of legislative policy-decision logs.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::accountability::domain::{PolicyAction, PolicyStance};

/// Converts a policy-decision CSV export into actions ready for the
/// accountability service.
pub struct PolicyDecisionImporter;

impl PolicyDecisionImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<PolicyAction>, PolicyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PolicyAction>, PolicyImportError> {
        let records = parser::parse_records(reader)?;
        let mut actions = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            if record.title.trim().is_empty() {
                return Err(PolicyImportError::MissingTitle { row: index + 1 });
            }
            let decided_on = record
                .decided_on
                .ok_or(PolicyImportError::MissingDate { row: index + 1 })?;

            actions.push(PolicyAction {
                title: record.title,
                decided_on,
                // Stances that the export leaves blank or misspells default
                // to an abstention rather than failing the whole file.
                stance: record.stance.unwrap_or(PolicyStance::Abstained),
                summary: record.summary,
            });
        }

        Ok(actions)
    }
}

#[derive(Debug)]
pub enum PolicyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingTitle { row: usize },
    MissingDate { row: usize },
}

impl std::fmt::Display for PolicyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyImportError::Io(err) => write!(f, "failed to read policy export: {}", err),
            PolicyImportError::Csv(err) => write!(f, "invalid policy CSV data: {}", err),
            PolicyImportError::MissingTitle { row } => {
                write!(f, "policy row {} has no title", row)
            }
            PolicyImportError::MissingDate { row } => {
                write!(f, "policy row {} has no parseable decision date", row)
            }
        }
    }
}

impl std::error::Error for PolicyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolicyImportError::Io(err) => Some(err),
            PolicyImportError::Csv(err) => Some(err),
            PolicyImportError::MissingTitle { .. } | PolicyImportError::MissingDate { .. } => None,
        }
    }
}

impl From<std::io::Error> for PolicyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PolicyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn imports_actions_from_reader() {
        let csv = "Title,Decided On,Stance,Summary\n\
                   Electoral reform bill,2026-02-10,for,Second reading\n\
                   Water infrastructure levy,2026-04-02,against,\n";
        let actions = PolicyDecisionImporter::from_reader(csv.as_bytes()).expect("imports");

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].title, "Electoral reform bill");
        assert_eq!(
            actions[0].decided_on,
            NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date")
        );
        assert_eq!(actions[1].stance, PolicyStance::VotedAgainst);
    }

    #[test]
    fn missing_date_fails_with_row_number() {
        let csv = "Title,Decided On,Stance,Summary\n\
                   Electoral reform bill,2026-02-10,for,\n\
                   Broken row,,for,\n";
        match PolicyDecisionImporter::from_reader(csv.as_bytes()) {
            Err(PolicyImportError::MissingDate { row }) => assert_eq!(row, 2),
            other => panic!("expected missing date error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_stance_defaults_to_abstained() {
        let csv = "Title,Decided On,Stance,Summary\n\
                   Odd motion,2026-05-01,perhaps,\n";
        let actions = PolicyDecisionImporter::from_reader(csv.as_bytes()).expect("imports");
        assert_eq!(actions[0].stance, PolicyStance::Abstained);
    }
}
