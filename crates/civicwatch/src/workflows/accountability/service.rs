use std::sync::Arc;

use super::catalog::EvaluationData;
use super::completeness::evaluate_completeness;
use super::composer::compose;
use super::domain::{
    ContactInfo, CorruptionCase, IdeologyProfile, Leader, LeaderRegistration, LeaderSlug,
    ManifestoItem, PerformanceTracking, PolicyAction,
};
use super::evaluation::{AnswerSet, EvaluationEngine, InvalidAnswerError, ScoreBreakdown};
use super::repository::{LeaderRecord, LeaderRepository, RepositoryError};

/// Service composing the evaluation engine, completeness evaluator, and
/// composer over a repository seam. Every accountability input triggers a
/// full recomputation of the derived attributes before anything persists.
pub struct LeaderAccountabilityService<R> {
    repository: Arc<R>,
    engine: Arc<EvaluationEngine>,
}

impl<R> LeaderAccountabilityService<R>
where
    R: LeaderRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<EvaluationData>) -> Self {
        let engine = Arc::new(EvaluationEngine::new(catalog));
        Self { repository, engine }
    }

    /// Register a leader with an empty profile: all completion flags false
    /// apart from whatever the registration itself populates, no score.
    pub fn register(
        &self,
        registration: LeaderRegistration,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        let mut record = LeaderRecord::new(Leader::register(registration));
        recompute(&mut record);
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Validate and score an evaluation submission, then publish the
    /// recomputed attributes. An invalid answer set mutates nothing.
    pub fn submit_evaluation(
        &self,
        slug: &LeaderSlug,
        answers: &AnswerSet,
    ) -> Result<ScoreBreakdown, AccountabilityServiceError> {
        let mut record = self.fetch_record(slug)?;

        let breakdown = self.engine.score(answers)?;

        record.evaluation = Some(breakdown.clone());
        record.evaluations_received += 1;
        recompute(&mut record);
        self.repository.update(record)?;

        Ok(breakdown)
    }

    /// File a corruption case against the leader.
    pub fn file_case(
        &self,
        slug: &LeaderSlug,
        case: CorruptionCase,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.mutate(slug, |leader| leader.corruption_cases.push(case))
    }

    /// Mark a filed case resolved; composing afterwards drops the case's
    /// contested field from the disputed set.
    pub fn resolve_case(
        &self,
        slug: &LeaderSlug,
        case_title: &str,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.mutate(slug, |leader| {
            for case in &mut leader.corruption_cases {
                if case.title == case_title {
                    case.resolved = true;
                }
            }
        })
    }

    /// Log a single policy decision.
    pub fn log_policy_decision(
        &self,
        slug: &LeaderSlug,
        action: PolicyAction,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.log_policy_decisions(slug, vec![action])
    }

    /// Append a batch of policy decisions, e.g. from a CSV import.
    pub fn log_policy_decisions(
        &self,
        slug: &LeaderSlug,
        actions: Vec<PolicyAction>,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.mutate(slug, |leader| leader.policy_decisions.extend(actions))
    }

    /// Apply a profile update; only the supplied sub-records change.
    pub fn update_profile(
        &self,
        slug: &LeaderSlug,
        update: ProfileUpdate,
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.mutate(slug, |leader| {
            if let Some(contact) = update.contact {
                leader.contact = Some(contact);
            }
            if let Some(ideology) = update.ideology {
                leader.ideology = Some(ideology);
            }
            if let Some(manifesto) = update.manifesto {
                leader.manifesto = manifesto;
            }
            if let Some(performance) = update.performance_tracking {
                leader.performance_tracking = Some(performance);
            }
        })
    }

    /// Fetch the current record for API responses.
    pub fn get(&self, slug: &LeaderSlug) -> Result<LeaderRecord, AccountabilityServiceError> {
        self.fetch_record(slug)
    }

    fn mutate(
        &self,
        slug: &LeaderSlug,
        apply: impl FnOnce(&mut Leader),
    ) -> Result<LeaderRecord, AccountabilityServiceError> {
        let mut record = self.fetch_record(slug)?;
        apply(&mut record.leader);
        recompute(&mut record);
        self.repository.update(record.clone())?;
        Ok(record)
    }

    fn fetch_record(&self, slug: &LeaderSlug) -> Result<LeaderRecord, AccountabilityServiceError> {
        let record = self
            .repository
            .fetch(slug)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Recompute the derived accountability attributes from source data. The
/// composer is idempotent, so re-running over unchanged inputs is a no-op.
fn recompute(record: &mut LeaderRecord) {
    let completion = evaluate_completeness(&record.leader);
    let fields = compose(&record.leader, record.evaluation.as_ref(), &completion);
    fields.apply_to(&mut record.leader);
}

/// Partial profile update; `None` leaves a sub-record untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub ideology: Option<IdeologyProfile>,
    #[serde(default)]
    pub manifesto: Option<Vec<ManifestoItem>>,
    #[serde(default)]
    pub performance_tracking: Option<PerformanceTracking>,
}

/// Error raised by the accountability service.
#[derive(Debug, thiserror::Error)]
pub enum AccountabilityServiceError {
    #[error(transparent)]
    InvalidAnswer(#[from] InvalidAnswerError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
