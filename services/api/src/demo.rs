use crate::infra::{build_service, AdvisorService};
use clap::Args;
use qa_advisor::config::AppConfig;
use qa_advisor::error::AppError;
use qa_advisor::workflows::selection::{
    load_json_file, AnswerSet, BudgetTier, CriterionKey, EvaluationRequest, EvaluationResult,
    MaintenanceTeamSize, ProjectDuration, ProjectType, RunFrequency, ScriptingSkill,
    TestingApproach, WeightOverrides, WeightProfile,
};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Questionnaire answers as a JSON object
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Optional JSON object of criterion weight overrides
    #[arg(long)]
    pub(crate) overrides: Option<PathBuf>,
    /// Score against this catalogue instead of the configured one
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
    /// Print the full result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogueArgs {
    /// Read this catalogue instead of the configured one
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.catalogue.as_deref())?;

    let answers: AnswerSet = load_json_file(&args.answers)?;
    let overrides = args
        .overrides
        .as_deref()
        .map(load_json_file::<WeightOverrides>)
        .transpose()?;

    let result = score(&service, answers, overrides)?;
    if args.json {
        print_json(&result);
    } else {
        print!("{}", render_weights(&result.default_weights));
        print!("{}", render_ranking(&result));
    }
    Ok(())
}

pub(crate) fn run_catalogue_export(args: CatalogueArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, args.catalogue.as_deref())?;
    print_json(&service.export_tools()?);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config, None)?;
    let answers = demo_answers();

    println!("QA tool advisor demo");
    println!(
        "Project: {} app, {} scripting skill, {} primary language, budget {}",
        answers.project_type.as_str(),
        answers.team_scripting_skill.as_str(),
        answers.primary_language,
        answers.budget.as_str()
    );

    let result = score(&service, answers, None)?;
    print!("\n{}", render_weights(&result.default_weights));
    print!("\n{}", render_ranking(&result));

    let mut overrides = WeightOverrides::new();
    overrides.insert(CriterionKey::Community.as_str().to_string(), 3.0);
    let rescored = service.engine().rescore(&result, &overrides);
    println!("\nAfter raising the community weight to 3.0:");
    print!("{}", render_ranking(&rescored));

    match rescored.top_recommendation() {
        Some(top) if !top.recommended_use_cases.is_empty() => {
            println!(
                "\n{} is best for: {}",
                top.tool_name,
                top.recommended_use_cases.join(", ")
            );
        }
        Some(top) => println!("\n{} leads the ranking", top.tool_name),
        None => println!("\nCatalogue is empty; nothing to recommend"),
    }
    Ok(())
}

fn score(
    service: &AdvisorService,
    answers: AnswerSet,
    overrides: Option<WeightOverrides>,
) -> Result<EvaluationResult, AppError> {
    let request = EvaluationRequest {
        weight_overrides: overrides,
        persist: false,
        ..EvaluationRequest::for_answers(answers)
    };
    Ok(service.run(request)?.result)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("JSON output unavailable: {err}"),
    }
}

fn demo_answers() -> AnswerSet {
    AnswerSet {
        project_type: ProjectType::Web,
        team_scripting_skill: ScriptingSkill::Medium,
        primary_language: "JavaScript".to_string(),
        budget: BudgetTier::UnderFiveHundred,
        test_run_frequency: RunFrequency::Daily,
        ci_cd_required: true,
        ai_automation_preference: 60,
        maintenance_team_size: MaintenanceTeamSize::OneToThree,
        cross_browser_required: true,
        reporting_importance: 75,
        preferred_approach: TestingApproach::Hybrid,
        expected_duration: ProjectDuration::OverOneYear,
    }
}

pub(crate) fn render_weights(weights: &WeightProfile) -> String {
    let mut output = String::from("Criterion weights\n");
    for (key, weight) in weights.iter() {
        let _ = writeln!(output, "  {:<14} {:>5.2}", key.label(), weight);
    }
    output
}

pub(crate) fn render_ranking(result: &EvaluationResult) -> String {
    if result.scored_tools.is_empty() {
        return "Ranking: no tools in catalogue\n".to_string();
    }

    let mut output = String::from("Ranking\n");
    for score in &result.scored_tools {
        let marker = if result.recommended_tool_ids.contains(&score.tool_id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            output,
            "{marker} {:>2}. {:<18} {:>6.2} ({:>5.1}%)",
            score.rank, score.tool_name, score.total_score, score.normalized_score
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use qa_advisor::workflows::selection::{
        seed_catalogue, InMemoryEvaluationRepository, InMemoryToolCatalogue, ScoringConfig,
        SelectionService,
    };
    use std::sync::Arc;

    fn seeded() -> AdvisorService {
        let catalogue = InMemoryToolCatalogue::seeded(seed_catalogue().expect("seed parses"))
            .expect("seed names are unique");
        SelectionService::new(
            Arc::new(catalogue),
            Arc::new(InMemoryEvaluationRepository::default()),
            ScoringConfig::default(),
        )
    }

    #[test]
    fn ranking_marks_the_recommended_tools() {
        let result = score(&seeded(), demo_answers(), None).expect("demo answers are valid");
        let rendered = render_ranking(&result);

        let marked = rendered.lines().filter(|line| line.starts_with('*')).count();
        assert_eq!(marked, 3);
        assert!(rendered.contains(&result.scored_tools[0].tool_name));
    }

    #[test]
    fn empty_ranking_says_so() {
        let service = SelectionService::new(
            Arc::new(InMemoryToolCatalogue::default()),
            Arc::new(InMemoryEvaluationRepository::default()),
            ScoringConfig::default(),
        );
        let result = score(&service, demo_answers(), None).expect("runs on empty catalogue");
        assert_eq!(render_ranking(&result), "Ranking: no tools in catalogue\n");
    }

    #[test]
    fn weights_list_every_criterion() {
        let rendered = render_weights(&ScoringConfig::default().base_weights);
        assert_eq!(rendered.lines().count(), CriterionKey::COUNT + 1);
        assert!(rendered.contains("Budget Fit"));
    }

    #[test]
    fn demo_runs_are_not_persisted() {
        let service = seeded();
        score(&service, demo_answers(), None).expect("demo answers are valid");
        assert!(service.list_evaluations().expect("list succeeds").is_empty());
    }
}
