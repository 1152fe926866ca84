mod aggregator;
mod normalizer;

pub use aggregator::{aggregate, CategoryScore, ScoreBreakdown, SectionScore};
pub use normalizer::{
    answer_set_from_submission, normalize, AnswerKey, AnswerSet, InvalidAnswerError,
    SubmittedAnswer, ValidatedAnswers,
};

use std::sync::Arc;

use super::catalog::EvaluationData;

/// Stateless evaluator holding the shared question catalog.
pub struct EvaluationEngine {
    catalog: Arc<EvaluationData>,
}

impl EvaluationEngine {
    pub fn new(catalog: Arc<EvaluationData>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EvaluationData {
        &self.catalog
    }

    /// Validate raw selections and fold them into a score breakdown. A
    /// normalization failure is terminal: no partial breakdown is produced.
    pub fn score(&self, answers: &AnswerSet) -> Result<ScoreBreakdown, InvalidAnswerError> {
        let validated = normalize(answers, &self.catalog)?;
        Ok(aggregate(&validated, &self.catalog))
    }
}
