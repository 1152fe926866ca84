use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One selectable answer; `value` is the score contribution and is never
/// negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: f64,
}

/// A question with its discrete answer options. Option order is display
/// order only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Highest value among the question's options.
    pub fn max_value(&self) -> f64 {
        self.options
            .iter()
            .map(|option| option.value)
            .fold(0.0, f64::max)
    }

    /// Whether `value` matches one of the question's option values. Guards
    /// against stale or tampered client-side state.
    pub fn accepts_value(&self, value: f64) -> bool {
        self.options
            .iter()
            .any(|option| (option.value - value).abs() < f64::EPSILON)
    }
}

/// A weighted subgroup of questions within a category. The weights of all
/// sections in one category are expected to sum to 1.0, but the aggregator
/// renormalizes rather than trusting that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub subgroup: String,
    pub weight: f64,
    pub questions: Vec<Question>,
}

/// A top-level evaluation grouping with its score ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCategory {
    pub title: String,
    pub max_score: f64,
    pub sections: Vec<Section>,
}

/// The three fixed evaluation categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Capacity,
    Competence,
    Character,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Capacity,
        CategoryKind::Competence,
        CategoryKind::Character,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CategoryKind::Capacity => "capacity",
            CategoryKind::Competence => "competence",
            CategoryKind::Character => "character",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable evaluation reference data: exactly three categories, loaded
/// once at startup and passed explicitly through every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationData {
    pub capacity: EvaluationCategory,
    pub competence: EvaluationCategory,
    pub character: EvaluationCategory,
}

impl EvaluationData {
    pub fn category(&self, kind: CategoryKind) -> &EvaluationCategory {
        match kind {
            CategoryKind::Capacity => &self.capacity,
            CategoryKind::Competence => &self.competence,
            CategoryKind::Character => &self.character,
        }
    }

    pub fn categories(&self) -> [(CategoryKind, &EvaluationCategory); 3] {
        [
            (CategoryKind::Capacity, &self.capacity),
            (CategoryKind::Competence, &self.competence),
            (CategoryKind::Character, &self.character),
        ]
    }

    /// Load a catalog from a JSON file supplied through configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Load and structurally validate a catalog from JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let data: EvaluationData = serde_json::from_reader(reader)?;
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (kind, category) in self.categories() {
            if !(category.max_score > 0.0) {
                return Err(CatalogError::Invalid {
                    detail: format!("{kind} max_score must be positive"),
                });
            }
            for section in &category.sections {
                if !(section.weight > 0.0 && section.weight <= 1.0) {
                    return Err(CatalogError::Invalid {
                        detail: format!(
                            "{kind} section '{}' weight {} is outside (0, 1]",
                            section.subgroup, section.weight
                        ),
                    });
                }
                for question in &section.questions {
                    if question.options.is_empty() {
                        return Err(CatalogError::Invalid {
                            detail: format!(
                                "{kind} section '{}' question '{}' has no options",
                                section.subgroup, question.text
                            ),
                        });
                    }
                    if question.options.iter().any(|option| option.value < 0.0) {
                        return Err(CatalogError::Invalid {
                            detail: format!(
                                "{kind} section '{}' question '{}' has a negative option value",
                                section.subgroup, question.text
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// The built-in question bank used when no catalog file is configured.
    pub fn builtin() -> Self {
        fn options(labels: [(&str, f64); 3]) -> Vec<AnswerOption> {
            labels
                .into_iter()
                .map(|(label, value)| AnswerOption {
                    label: label.to_string(),
                    value,
                })
                .collect()
        }

        fn question(text: &str, opts: [(&str, f64); 3]) -> Question {
            Question {
                text: text.to_string(),
                options: options(opts),
            }
        }

        let capacity = EvaluationCategory {
            title: "Capacity".to_string(),
            max_score: 30.0,
            sections: vec![
                Section {
                    subgroup: "educational_background".to_string(),
                    weight: 0.4,
                    questions: vec![
                        question(
                            "Does the leader hold qualifications relevant to the office?",
                            [("None verified", 0.0), ("Partially relevant", 1.0), ("Directly relevant", 2.0)],
                        ),
                        question(
                            "Has the leader completed governance or public-administration training?",
                            [("No", 0.0), ("Informal only", 1.0), ("Formal training", 2.0)],
                        ),
                    ],
                },
                Section {
                    subgroup: "leadership_experience".to_string(),
                    weight: 0.6,
                    questions: vec![
                        question(
                            "How much prior experience does the leader have in public office?",
                            [("None", 0.0), ("One term or equivalent", 1.0), ("Multiple terms", 2.0)],
                        ),
                        question(
                            "Has the leader managed budgets or institutions of comparable scale?",
                            [("No evidence", 0.0), ("Smaller scale", 1.0), ("Comparable scale", 2.0)],
                        ),
                    ],
                },
            ],
        };

        let competence = EvaluationCategory {
            title: "Competence".to_string(),
            max_score: 40.0,
            sections: vec![
                Section {
                    subgroup: "policy_delivery".to_string(),
                    weight: 0.5,
                    questions: vec![
                        question(
                            "Are manifesto commitments being delivered on schedule?",
                            [("No progress", 0.0), ("Partial progress", 1.0), ("On schedule", 2.0)],
                        ),
                        question(
                            "Do policy decisions show consistent follow-through?",
                            [("Rarely", 0.0), ("Sometimes", 1.0), ("Consistently", 2.0)],
                        ),
                    ],
                },
                Section {
                    subgroup: "legislative_activity".to_string(),
                    weight: 0.5,
                    questions: vec![
                        question(
                            "How regular is the leader's attendance at sittings?",
                            [("Frequently absent", 0.0), ("Irregular", 1.0), ("Regular", 2.0)],
                        ),
                        question(
                            "Has the leader sponsored or co-sponsored substantive bills?",
                            [("None", 0.0), ("One", 1.0), ("Several", 2.0)],
                        ),
                    ],
                },
            ],
        };

        let character = EvaluationCategory {
            title: "Character".to_string(),
            max_score: 30.0,
            sections: vec![
                Section {
                    subgroup: "integrity".to_string(),
                    weight: 0.6,
                    questions: vec![
                        question(
                            "Are there substantiated corruption findings against the leader?",
                            [("Substantiated findings", 0.0), ("Unresolved allegations", 1.0), ("None", 2.0)],
                        ),
                        question(
                            "Does the leader respond publicly to sourced allegations?",
                            [("Never", 0.0), ("Selectively", 1.0), ("Consistently", 2.0)],
                        ),
                    ],
                },
                Section {
                    subgroup: "transparency".to_string(),
                    weight: 0.4,
                    questions: vec![
                        question(
                            "Has the leader declared assets as required?",
                            [("No declaration", 0.0), ("Partial declaration", 1.0), ("Full declaration", 2.0)],
                        ),
                        question(
                            "Is constituency spending publicly reported?",
                            [("Not reported", 0.0), ("Irregularly", 1.0), ("Regularly", 2.0)],
                        ),
                    ],
                },
            ],
        };

        Self {
            capacity,
            competence,
            character,
        }
    }
}

/// Errors raised while loading an external question catalog.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid { detail: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read question catalog: {}", err),
            CatalogError::Json(err) => write!(f, "invalid question catalog JSON: {}", err),
            CatalogError::Invalid { detail } => {
                write!(f, "question catalog failed validation: {}", detail)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Json(err) => Some(err),
            CatalogError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
