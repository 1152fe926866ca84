use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::catalog::{CategoryKind, EvaluationData};

/// Location of one answered question within the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AnswerKey {
    pub category: CategoryKind,
    pub section: usize,
    pub question: usize,
}

/// Raw respondent selections keyed by question location. Unanswered
/// questions are absent keys; a chosen zero-valued option is a present key
/// with value `0.0` — the two are never conflated.
pub type AnswerSet = BTreeMap<AnswerKey, f64>;

/// One answer as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub category: CategoryKind,
    pub section: usize,
    pub question: usize,
    pub value: f64,
}

/// Collapse wire entries into an answer set; on duplicate question
/// locations the last entry wins.
pub fn answer_set_from_submission(entries: &[SubmittedAnswer]) -> AnswerSet {
    entries
        .iter()
        .map(|entry| {
            (
                AnswerKey {
                    category: entry.category,
                    section: entry.section,
                    question: entry.question,
                },
                entry.value,
            )
        })
        .collect()
}

/// Malformed or out-of-range answer reference. Terminal for the
/// submission: no partial aggregation proceeds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidAnswerError {
    #[error("{category} has no section {section}")]
    UnknownSection { category: CategoryKind, section: usize },
    #[error("{category} section {section} has no question {question}")]
    UnknownQuestion {
        category: CategoryKind,
        section: usize,
        question: usize,
    },
    #[error(
        "value {value} matches no option of {category} section {section} question {question}"
    )]
    ValueMismatch {
        category: CategoryKind,
        section: usize,
        question: usize,
        value: f64,
    },
}

/// An answer set that has passed catalog validation. Only the normalizer
/// constructs this, so the aggregator can trust every key and value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAnswers {
    answers: AnswerSet,
}

impl ValidatedAnswers {
    pub fn value(&self, key: &AnswerKey) -> Option<f64> {
        self.answers.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Validate every answered reference against the catalog. Pure; the input
/// is untouched on error.
pub fn normalize(
    answers: &AnswerSet,
    catalog: &EvaluationData,
) -> Result<ValidatedAnswers, InvalidAnswerError> {
    for (key, value) in answers {
        let category = catalog.category(key.category);
        let section =
            category
                .sections
                .get(key.section)
                .ok_or(InvalidAnswerError::UnknownSection {
                    category: key.category,
                    section: key.section,
                })?;
        let question =
            section
                .questions
                .get(key.question)
                .ok_or(InvalidAnswerError::UnknownQuestion {
                    category: key.category,
                    section: key.section,
                    question: key.question,
                })?;
        if !question.accepts_value(*value) {
            return Err(InvalidAnswerError::ValueMismatch {
                category: key.category,
                section: key.section,
                question: key.question,
                value: *value,
            });
        }
    }

    Ok(ValidatedAnswers {
        answers: answers.clone(),
    })
}
