use std::path::PathBuf;
use std::sync::Arc;

use civicwatch::error::AppError;
use civicwatch::workflows::accountability::{
    AnswerKey, AnswerSet, ContactInfo, CorruptionCase, EvaluationData,
    InMemoryLeaderRepository, LeaderAccountabilityService, LeaderRegistration, LeaderSlug,
    ProfileUpdate, ScoreBreakdown,
};
use civicwatch::workflows::imports::PolicyDecisionImporter;
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional question catalog JSON file (defaults to the built-in bank)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Optional policy-decision CSV export to hydrate the policy log
    #[arg(long)]
    pub(crate) policy_csv: Option<PathBuf>,
    /// Skip the corruption-case portion of the demo
    #[arg(long)]
    pub(crate) skip_case: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Question catalog JSON file to validate
    #[arg(long)]
    pub(crate) path: PathBuf,
}

pub(crate) fn run_catalog_check(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = EvaluationData::from_path(&args.path)?;

    println!("Catalog OK: {}", args.path.display());
    for (kind, category) in catalog.categories() {
        let questions: usize = category
            .sections
            .iter()
            .map(|section| section.questions.len())
            .sum();
        println!(
            "- {}: {} section(s), {} question(s), max score {}",
            kind,
            category.sections.len(),
            questions,
            category.max_score
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = match &args.catalog {
        Some(path) => Arc::new(EvaluationData::from_path(path)?),
        None => Arc::new(EvaluationData::builtin()),
    };

    let repository = Arc::new(InMemoryLeaderRepository::default());
    let service = LeaderAccountabilityService::new(repository, catalog.clone());
    let slug = LeaderSlug("demo-leader".to_string());

    println!("CivicWatch accountability demo");

    service.register(LeaderRegistration {
        slug: slug.clone(),
        full_name: "Adaeze Nwosu".to_string(),
        office_held: "Senator".to_string(),
        level: "federal".to_string(),
        state: "Anambra".to_string(),
    })?;

    service.update_profile(
        &slug,
        ProfileUpdate {
            contact: Some(ContactInfo {
                email: Some("office@example.org".to_string()),
                whatsapp: None,
            }),
            ..ProfileUpdate::default()
        },
    )?;

    if let Some(path) = &args.policy_csv {
        let actions = PolicyDecisionImporter::from_path(path)?;
        println!(
            "Imported {} policy decision(s) from {}",
            actions.len(),
            path.display()
        );
        service.log_policy_decisions(&slug, actions)?;
    }

    if !args.skip_case {
        service.file_case(
            &slug,
            CorruptionCase {
                title: "Constituency project audit".to_string(),
                allegation: "Completion certificates contested".to_string(),
                sources: vec!["https://example.org/audit-2026".to_string()],
                public_response: Some("All projects were commissioned".to_string()),
                contested_field: Some("performance_tracking".to_string()),
                resolved: false,
                opened_on: None,
            },
        )?;
    }

    let breakdown = service.submit_evaluation(&slug, &sample_answers(&catalog))?;
    render_breakdown(&breakdown);

    let record = service.get(&slug)?;
    let view = record.accountability_view();

    println!("\nPublished accountability view");
    match view.accountability_score {
        Some(score) => println!("- score: {score:.1}"),
        None => println!("- score: not yet evaluated"),
    }
    println!("- profile completion: {}%", view.completion_percent);
    for (section, complete) in &view.completion_status {
        println!(
            "  - {}: {}",
            section.label(),
            if *complete { "complete" } else { "incomplete" }
        );
    }
    if view.disputed_fields.is_empty() {
        println!("- disputed fields: none");
    } else {
        println!("- disputed fields: {}", view.disputed_fields.len());
        for field in &view.disputed_fields {
            println!("  - {field}");
        }
    }

    Ok(())
}

/// A moderate submission: best option for the first question of every
/// section, second-best for the rest.
fn sample_answers(catalog: &EvaluationData) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (kind, category) in catalog.categories() {
        for (section_index, section) in category.sections.iter().enumerate() {
            for (question_index, question) in section.questions.iter().enumerate() {
                let mut values: Vec<f64> =
                    question.options.iter().map(|option| option.value).collect();
                values.sort_by(|a, b| b.total_cmp(a));
                let value = if question_index == 0 {
                    values[0]
                } else {
                    values.get(1).copied().unwrap_or(values[0])
                };
                answers.insert(
                    AnswerKey {
                        category: kind,
                        section: section_index,
                        question: question_index,
                    },
                    value,
                );
            }
        }
    }
    answers
}

fn render_breakdown(breakdown: &ScoreBreakdown) {
    println!("\nEvaluation breakdown ({} answer(s))", breakdown.answered);
    for category in &breakdown.categories {
        println!(
            "- {}: {:.1} of {:.0}",
            category.category, category.score, category.max_score
        );
        for section in &category.sections {
            println!(
                "  - {}: {:.0}% ({} of {} answered, weight {:.2})",
                section.subgroup,
                section.ratio * 100.0,
                section.answered,
                section.questions,
                section.weight
            );
        }
    }
    println!("- final score: {:.1}", breakdown.final_percent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_answers_cover_every_question() {
        let catalog = EvaluationData::builtin();
        let answers = sample_answers(&catalog);
        let expected: usize = catalog
            .categories()
            .iter()
            .map(|(_, category)| {
                category
                    .sections
                    .iter()
                    .map(|section| section.questions.len())
                    .sum::<usize>()
            })
            .sum();
        assert_eq!(answers.len(), expected);
    }

    #[test]
    fn demo_runs_end_to_end_with_builtin_catalog() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }
}
