//! Leader accountability evaluation and scoring.
//!
//! Data flows one way: catalog → normalizer → aggregator → composer, with
//! the completeness evaluator running independently over the leader record
//! and feeding the composer. Every component is a pure, synchronous
//! computation over in-memory values; the service wires them to a
//! repository seam and the router exposes them over HTTP.

pub mod catalog;
pub mod completeness;
pub mod composer;
pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    AnswerOption, CatalogError, CategoryKind, EvaluationCategory, EvaluationData, Question,
    Section,
};
pub use completeness::{evaluate_completeness, CompletionMap};
pub use composer::{compose, AccountabilityFields};
pub use domain::{
    AttendanceRecord, BillRecord, ContactInfo, CorruptionCase, IdeologyProfile, Leader,
    LeaderRegistration, LeaderSlug, ManifestoItem, PerformanceTracking, PolicyAction,
    PolicyStance, Populated, ProfileSection,
};
pub use evaluation::{
    aggregate, answer_set_from_submission, normalize, AnswerKey, AnswerSet, CategoryScore,
    EvaluationEngine, InvalidAnswerError, ScoreBreakdown, SectionScore, SubmittedAnswer,
    ValidatedAnswers,
};
pub use repository::{
    AccountabilityView, InMemoryLeaderRepository, LeaderRecord, LeaderRepository, RepositoryError,
};
pub use router::leader_router;
pub use service::{AccountabilityServiceError, LeaderAccountabilityService, ProfileUpdate};
