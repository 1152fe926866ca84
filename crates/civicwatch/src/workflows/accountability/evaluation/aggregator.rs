use serde::{Deserialize, Serialize};

use super::super::catalog::{CategoryKind, EvaluationCategory, EvaluationData};
use super::normalizer::{AnswerKey, ValidatedAnswers};

/// Per-section slice of the breakdown. `weight` is the renormalized weight
/// actually applied; `answered`/`questions` let callers judge coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub subgroup: String,
    pub weight: f64,
    pub ratio: f64,
    pub answered: usize,
    pub questions: usize,
}

/// Per-category slice, scaled to the category's `max_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: CategoryKind,
    pub title: String,
    pub max_score: f64,
    pub score: f64,
    pub sections: Vec<SectionScore>,
}

/// Full structured result of one evaluation, kept so the composer and UI
/// can render partial detail rather than just the final number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub categories: Vec<CategoryScore>,
    pub total: f64,
    pub max_total: f64,
    pub final_percent: f64,
    pub answered: usize,
}

/// Fold validated answers into section, category, and final scores.
///
/// Unanswered questions are excluded from both numerator and denominator,
/// so partial submissions are not penalized. Section weights are divided
/// by the observed per-category sum before being applied, which keeps a
/// category's score at or below its `max_score` even when the catalog's
/// weights do not sum to 1.0.
pub fn aggregate(answers: &ValidatedAnswers, catalog: &EvaluationData) -> ScoreBreakdown {
    let mut categories = Vec::with_capacity(3);
    let mut total = 0.0;
    let mut max_total = 0.0;
    let mut answered = 0;

    for (kind, category) in catalog.categories() {
        let scored = aggregate_category(kind, category, answers);
        answered += scored
            .sections
            .iter()
            .map(|section| section.answered)
            .sum::<usize>();
        total += scored.score;
        max_total += scored.max_score;
        categories.push(scored);
    }

    let final_percent = if max_total > 0.0 {
        ((total / max_total) * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    ScoreBreakdown {
        categories,
        total,
        max_total,
        final_percent,
        answered,
    }
}

fn aggregate_category(
    kind: CategoryKind,
    category: &EvaluationCategory,
    answers: &ValidatedAnswers,
) -> CategoryScore {
    let weight_sum: f64 = category
        .sections
        .iter()
        .map(|section| section.weight.max(0.0))
        .sum();

    let mut sections = Vec::with_capacity(category.sections.len());
    let mut weighted_ratio = 0.0;

    for (section_index, section) in category.sections.iter().enumerate() {
        let mut value_sum = 0.0;
        let mut max_sum = 0.0;
        let mut section_answered = 0;

        for (question_index, question) in section.questions.iter().enumerate() {
            let key = AnswerKey {
                category: kind,
                section: section_index,
                question: question_index,
            };
            if let Some(value) = answers.value(&key) {
                value_sum += value;
                max_sum += question.max_value();
                section_answered += 1;
            }
        }

        // A section with nothing answered (or only zero-ceiling questions)
        // contributes zero rather than dropping out of the weighting.
        let ratio = if max_sum > 0.0 {
            (value_sum / max_sum).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let normalized_weight = if weight_sum > 0.0 {
            section.weight.max(0.0) / weight_sum
        } else {
            0.0
        };

        weighted_ratio += normalized_weight * ratio;

        sections.push(SectionScore {
            subgroup: section.subgroup.clone(),
            weight: normalized_weight,
            ratio,
            answered: section_answered,
            questions: section.questions.len(),
        });
    }

    CategoryScore {
        category: kind,
        title: category.title.clone(),
        max_score: category.max_score,
        score: category.max_score * weighted_ratio,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::catalog::{AnswerOption, Question, Section};
    use super::super::normalizer::{normalize, AnswerSet};
    use super::*;

    fn question(values: &[f64]) -> Question {
        Question {
            text: "q".to_string(),
            options: values
                .iter()
                .map(|value| AnswerOption {
                    label: format!("option {value}"),
                    value: *value,
                })
                .collect(),
        }
    }

    fn single_category_catalog(weight: f64) -> EvaluationData {
        let category = EvaluationCategory {
            title: "Capacity".to_string(),
            max_score: 100.0,
            sections: vec![Section {
                subgroup: "only".to_string(),
                weight,
                questions: vec![question(&[0.0, 1.0, 2.0]), question(&[0.0, 1.0, 2.0])],
            }],
        };
        let empty = EvaluationCategory {
            title: "empty".to_string(),
            max_score: 0.0,
            sections: Vec::new(),
        };
        EvaluationData {
            capacity: category,
            competence: empty.clone(),
            character: empty,
        }
    }

    fn key(category: CategoryKind, section: usize, question: usize) -> AnswerKey {
        AnswerKey {
            category,
            section,
            question,
        }
    }

    #[test]
    fn answering_one_question_with_max_value_scores_full_marks() {
        let catalog = single_category_catalog(1.0);
        let mut answers = AnswerSet::new();
        answers.insert(key(CategoryKind::Capacity, 0, 0), 2.0);
        let validated = normalize(&answers, &catalog).expect("valid");

        let breakdown = aggregate(&validated, &catalog);

        assert_eq!(breakdown.categories[0].score, 100.0);
        assert_eq!(breakdown.final_percent, 100.0);
        assert_eq!(breakdown.answered, 1);
    }

    #[test]
    fn answered_zero_enters_the_denominator() {
        let catalog = single_category_catalog(1.0);
        let mut answers = AnswerSet::new();
        answers.insert(key(CategoryKind::Capacity, 0, 0), 2.0);
        answers.insert(key(CategoryKind::Capacity, 0, 1), 0.0);
        let validated = normalize(&answers, &catalog).expect("valid");

        let breakdown = aggregate(&validated, &catalog);

        // (2 + 0) / (2 + 2) = 0.5, so the category lands at 50 of 100.
        assert_eq!(breakdown.categories[0].score, 50.0);
        assert_eq!(breakdown.final_percent, 50.0);
        assert_eq!(breakdown.answered, 2);
    }

    #[test]
    fn scaling_all_weights_leaves_category_score_unchanged() {
        let base = EvaluationData::builtin();
        let mut scaled = base.clone();
        for section in &mut scaled.competence.sections {
            section.weight *= 0.35;
        }

        let mut answers = AnswerSet::new();
        answers.insert(key(CategoryKind::Competence, 0, 0), 2.0);
        answers.insert(key(CategoryKind::Competence, 1, 0), 1.0);

        let from_base = aggregate(&normalize(&answers, &base).expect("valid"), &base);
        let from_scaled = aggregate(&normalize(&answers, &scaled).expect("valid"), &scaled);

        let base_score = from_base.categories[1].score;
        let scaled_score = from_scaled.categories[1].score;
        assert!((base_score - scaled_score).abs() < 1e-9);
    }

    #[test]
    fn unanswered_section_contributes_zero_not_exclusion() {
        let catalog = EvaluationData::builtin();
        let mut answers = AnswerSet::new();
        // Fully answer the first capacity section at max, leave the second
        // untouched; its 0.6 weight must still count against the category.
        answers.insert(key(CategoryKind::Capacity, 0, 0), 2.0);
        answers.insert(key(CategoryKind::Capacity, 0, 1), 2.0);
        let validated = normalize(&answers, &catalog).expect("valid");

        let breakdown = aggregate(&validated, &catalog);
        let capacity = &breakdown.categories[0];

        assert!((capacity.score - 30.0 * 0.4).abs() < 1e-9);
        assert_eq!(capacity.sections[1].answered, 0);
        assert_eq!(capacity.sections[1].ratio, 0.0);
    }

    #[test]
    fn full_marks_across_builtin_catalog_hits_every_ceiling() {
        let catalog = EvaluationData::builtin();
        let mut answers = AnswerSet::new();
        for (kind, category) in catalog.categories() {
            for (section_index, section) in category.sections.iter().enumerate() {
                for (question_index, question) in section.questions.iter().enumerate() {
                    answers.insert(
                        key(kind, section_index, question_index),
                        question.max_value(),
                    );
                }
            }
        }
        let validated = normalize(&answers, &catalog).expect("valid");

        let breakdown = aggregate(&validated, &catalog);

        for scored in &breakdown.categories {
            assert!(
                (scored.score - scored.max_score).abs() < 1e-9,
                "{} scored {} of {}",
                scored.category,
                scored.score,
                scored.max_score
            );
        }
        assert!((breakdown.final_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_answer_set_scores_zero_without_error() {
        let catalog = EvaluationData::builtin();
        let validated = normalize(&AnswerSet::new(), &catalog).expect("empty set is valid");

        let breakdown = aggregate(&validated, &catalog);

        assert_eq!(breakdown.final_percent, 0.0);
        assert_eq!(breakdown.answered, 0);
        assert!(breakdown.categories.iter().all(|scored| scored.score == 0.0));
    }

    #[test]
    fn final_percent_stays_within_bounds_for_partial_answers() {
        let catalog = EvaluationData::builtin();
        let mut answers = AnswerSet::new();
        answers.insert(key(CategoryKind::Capacity, 1, 0), 1.0);
        answers.insert(key(CategoryKind::Character, 0, 1), 2.0);
        let validated = normalize(&answers, &catalog).expect("valid");

        let breakdown = aggregate(&validated, &catalog);

        assert!(breakdown.final_percent >= 0.0);
        assert!(breakdown.final_percent <= 100.0);
    }
}
