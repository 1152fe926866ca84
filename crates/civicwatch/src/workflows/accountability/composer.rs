use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::completeness::CompletionMap;
use super::domain::{Leader, ProfileSection};
use super::evaluation::ScoreBreakdown;

/// The leader's published accountability attributes, ready for the
/// persistence layer to write back. Producing these is the only way the
/// derived fields ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountabilityFields {
    pub accountability_score: Option<f64>,
    pub completion_status: BTreeMap<ProfileSection, bool>,
    pub completion_percent: u8,
    pub disputed_fields: BTreeSet<String>,
}

impl AccountabilityFields {
    /// Write the composed attributes onto the leader record. The composer
    /// produced a full, consistent set, so this never leaves partial state.
    pub fn apply_to(&self, leader: &mut Leader) {
        leader.accountability_score = self.accountability_score;
        leader.completion_status = self.completion_status.clone();
        leader.disputed_fields = self.disputed_fields.clone();
    }
}

/// Merge the evaluation score, active case disputes, and the completeness
/// map into the published attributes.
///
/// With no breakdown the previously composed score carries forward; a
/// leader who has never been evaluated keeps `None`, which downstream must
/// keep distinct from zero. Never fails: malformed upstream data degrades
/// to incomplete/undisputed rather than raising.
pub fn compose(
    leader: &Leader,
    breakdown: Option<&ScoreBreakdown>,
    completion: &CompletionMap,
) -> AccountabilityFields {
    let accountability_score = breakdown
        .map(|scored| scored.final_percent)
        .or(leader.accountability_score);

    let mut disputed_fields = BTreeSet::new();
    for case in &leader.corruption_cases {
        if !case.has_active_dispute() {
            continue;
        }
        if let Some(field) = case.contested_field.as_deref() {
            // Unknown attribute names are dropped, never published.
            if Leader::FIELD_NAMES.contains(&field) {
                disputed_fields.insert(field.to_string());
            }
        }
    }

    AccountabilityFields {
        accountability_score,
        completion_status: completion.sections().clone(),
        completion_percent: completion.overall_percent(),
        disputed_fields,
    }
}
