use std::sync::Arc;

use crate::workflows::accountability::catalog::{CategoryKind, EvaluationData};
use crate::workflows::accountability::domain::{
    CorruptionCase, LeaderRegistration, LeaderSlug, PolicyAction, PolicyStance,
};
use crate::workflows::accountability::evaluation::{AnswerKey, AnswerSet};
use crate::workflows::accountability::repository::InMemoryLeaderRepository;
use crate::workflows::accountability::service::LeaderAccountabilityService;

pub(super) fn registration(slug: &str) -> LeaderRegistration {
    LeaderRegistration {
        slug: LeaderSlug(slug.to_string()),
        full_name: "Ngozi Balogun".to_string(),
        office_held: "Senator".to_string(),
        level: "federal".to_string(),
        state: "Lagos".to_string(),
    }
}

pub(super) fn answer(category: CategoryKind, section: usize, question: usize) -> AnswerKey {
    AnswerKey {
        category,
        section,
        question,
    }
}

/// Every question of the built-in catalog answered with its best option.
pub(super) fn full_marks_answers(catalog: &EvaluationData) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (kind, category) in catalog.categories() {
        for (section_index, section) in category.sections.iter().enumerate() {
            for (question_index, question) in section.questions.iter().enumerate() {
                answers.insert(
                    answer(kind, section_index, question_index),
                    question.max_value(),
                );
            }
        }
    }
    answers
}

pub(super) fn disputed_case(contested_field: &str) -> CorruptionCase {
    CorruptionCase {
        title: "Constituency fund diversion".to_string(),
        allegation: "Funds routed through a shell vendor".to_string(),
        sources: vec!["https://example.org/audit".to_string()],
        public_response: Some("The vendor is fully registered".to_string()),
        contested_field: Some(contested_field.to_string()),
        resolved: false,
        opened_on: None,
    }
}

pub(super) fn policy_action(title: &str) -> PolicyAction {
    PolicyAction {
        title: title.to_string(),
        decided_on: chrono::NaiveDate::from_ymd_opt(2026, 3, 12).expect("valid date"),
        stance: PolicyStance::VotedFor,
        summary: Some("Second reading".to_string()),
    }
}

pub(super) fn build_service() -> (
    LeaderAccountabilityService<InMemoryLeaderRepository>,
    Arc<InMemoryLeaderRepository>,
    Arc<EvaluationData>,
) {
    let repository = Arc::new(InMemoryLeaderRepository::default());
    let catalog = Arc::new(EvaluationData::builtin());
    let service = LeaderAccountabilityService::new(repository.clone(), catalog.clone());
    (service, repository, catalog)
}
