use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use qa_advisor::workflows::selection::{
    load_catalogue, load_json_file, seed_catalogue, AnswerSet, BudgetTier, DataFileError,
    EvaluationRequest, InMemoryEvaluationRepository, InMemoryToolCatalogue, ScoringConfig,
    SelectionService, TestingApproach,
};
use serde_json::json;
use tempfile::NamedTempFile;

fn seeded_service() -> SelectionService<InMemoryToolCatalogue, InMemoryEvaluationRepository> {
    let profiles = seed_catalogue().expect("bundled catalogue parses");
    let catalogue = InMemoryToolCatalogue::seeded(profiles).expect("bundled names are unique");
    SelectionService::new(
        Arc::new(catalogue),
        Arc::new(InMemoryEvaluationRepository::default()),
        ScoringConfig::default(),
    )
}

fn answers(overrides: serde_json::Value) -> AnswerSet {
    let mut base = json!({
        "project_type": "Web",
        "team_scripting_skill": "High",
        "primary_language": "TypeScript",
        "budget": "Free",
        "test_run_frequency": "Daily",
        "ci_cd_required": true,
        "ai_automation_preference": 20,
        "maintenance_team_size": "4-10",
        "cross_browser_required": true,
        "reporting_importance": 50,
        "preferred_approach": "Hybrid",
        "expected_duration": ">1 year"
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(base).expect("answers deserialize")
}

#[test]
fn bundled_catalogue_is_complete() {
    let profiles = seed_catalogue().expect("bundled catalogue parses");

    assert!(profiles.len() >= 5);
    for profile in &profiles {
        assert!(!profile.name.is_empty());
        assert!(!profile.slug.is_empty());
        assert!(
            !profile.best_for().is_empty(),
            "{} lacks best_for metadata",
            profile.name
        );
    }
}

#[test]
fn free_code_first_team_gets_open_source_leaders() {
    let service = seeded_service();

    let payload = service
        .run(EvaluationRequest::for_answers(answers(json!({}))))
        .expect("run succeeds");

    let top = payload.result.top_recommendation().expect("catalogue is not empty");
    assert_eq!(top.tool_name, "Playwright");
    assert_eq!(payload.result.recommended_tool_ids.len(), 3);
    assert_eq!(payload.result.bar_chart_data.len(), 5);
    assert!(payload.evaluation.is_some());
}

#[test]
fn scriptless_enterprise_team_favours_ai_tools() {
    let service = seeded_service();
    let answers = answers(json!({
        "team_scripting_skill": "low",
        "primary_language": "other",
        "budget": "Enterprise",
        "ai_automation_preference": 95,
        "reporting_importance": 90,
        "preferred_approach": "Scriptless",
        "maintenance_team_size": "1-3"
    }));
    assert_eq!(answers.budget, BudgetTier::Enterprise);
    assert_eq!(answers.preferred_approach, TestingApproach::Scriptless);

    let payload = service
        .run(EvaluationRequest::for_answers(answers))
        .expect("run succeeds");

    let leaders: Vec<&str> = payload
        .result
        .scored_tools
        .iter()
        .take(3)
        .map(|score| score.tool_name.as_str())
        .collect();
    assert_eq!(leaders[0], "testRigor", "leaders were {leaders:?}");
    assert!(leaders.contains(&"mabl"));
}

#[test]
fn unknown_questionnaire_values_are_rejected() {
    let raw = json!({
        "project_type": "Desktop",
        "team_scripting_skill": "expert",
        "primary_language": "Python",
        "budget": "Free",
        "test_run_frequency": "On-demand",
        "ci_cd_required": false,
        "ai_automation_preference": 10,
        "maintenance_team_size": "4-10",
        "cross_browser_required": false,
        "reporting_importance": 10,
        "preferred_approach": "Hybrid",
        "expected_duration": "6-12 months"
    });

    let error = serde_json::from_value::<AnswerSet>(raw).expect_err("skill is unknown");
    assert!(error.to_string().contains("scripting skill"));
}

#[test]
fn open_ended_answers_fall_back_to_other() {
    let answers = answers(json!({ "project_type": "Desktop", "test_run_frequency": "On-demand" }));
    assert_eq!(
        serde_json::to_value(&answers).expect("serializes")["project_type"],
        "other"
    );
}

#[test]
fn catalogue_file_replaces_the_seed() {
    let mut file = NamedTempFile::new().expect("temp file created");
    file.write_all(br#"[{ "name": "Solo", "slug": "solo", "pricing_tier": "enterprise" }]"#)
        .expect("temp file writable");

    let profiles = load_catalogue(Some(file.path())).expect("file parses");

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "Solo");
    assert_eq!(profiles[0].ai_capability, 3);
    assert!(profiles[0].supports_api);
}

#[test]
fn missing_data_file_reports_its_path() {
    let error = load_json_file::<AnswerSet>(Path::new("/nonexistent/answers.json"))
        .expect_err("file does not exist");

    assert!(matches!(error, DataFileError::Io { .. }));
    assert!(error.to_string().contains("/nonexistent/answers.json"));
}
