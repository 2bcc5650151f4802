use serde_json::json;

use super::common::*;
use crate::workflows::selection::domain::{Tool, ToolId};
use crate::workflows::selection::scoring::{
    compute_scores, radar_labels, CriterionKey, EvaluationResult, ScoringEngine, WeightOverrides,
};

fn criterion(result: &EvaluationResult, tool_index: usize, key: CriterionKey) -> f64 {
    result.scored_tools[tool_index].criteria[&key].value
}

fn evaluate(tools: &[Tool]) -> EvaluationResult {
    ScoringEngine::default().evaluate(&answers(), None, tools)
}

#[test]
fn default_tool_resolves_catalogue_defaults() {
    let result = evaluate(&[tool(1, "Baseline")]);

    assert_close(criterion(&result, 0, CriterionKey::AiAssistance), 3.0);
    assert_close(criterion(&result, 0, CriterionKey::Maintenance), 3.0);
    assert_close(criterion(&result, 0, CriterionKey::CrossBrowser), 5.0);
    assert_close(criterion(&result, 0, CriterionKey::CiCd), 5.0);
    assert_close(criterion(&result, 0, CriterionKey::TeamSkillFit), 5.0);
    assert_close(criterion(&result, 0, CriterionKey::LanguageFit), 2.5);
}

#[test]
fn matching_free_budget_scores_full_marks() {
    let result = evaluate(&[tool(1, "Free Tool")]);
    assert_close(criterion(&result, 0, CriterionKey::BudgetFit), 5.0);

    let mut enterprise = tool(2, "Enterprise Tool");
    enterprise.profile.pricing_tier = "enterprise".to_string();
    let result = evaluate(&[enterprise]);
    assert_close(criterion(&result, 0, CriterionKey::BudgetFit), 1.0);
}

#[test]
fn other_language_scores_neutral() {
    let mut answers = answers();
    answers.primary_language = "other".to_string();
    let mut python_tool = tool(1, "Python Tool");
    python_tool.profile.languages_supported = vec!["Python".to_string()];

    let result = compute_scores(
        &[python_tool],
        &answers,
        &ScoringEngine::default().effective_weights(&answers, None),
    );

    assert_close(criterion(&result, 0, CriterionKey::LanguageFit), 3.0);
}

#[test]
fn language_membership_ignores_case() {
    let mut python_tool = tool(1, "Python Tool");
    python_tool.profile.languages_supported = vec!["python".to_string()];
    let result = evaluate(&[python_tool]);
    assert_close(criterion(&result, 0, CriterionKey::LanguageFit), 5.0);
}

#[test]
fn heavy_maintenance_inverts_to_low_score() {
    let mut heavy = tool(1, "Heavy");
    heavy.profile.maintenance_effort = 5;
    let result = evaluate(&[heavy]);
    assert_close(criterion(&result, 0, CriterionKey::Maintenance), 1.0);
}

#[test]
fn tool_criteria_scores_replace_derived_values() {
    let mut tuned = tool(1, "Tuned");
    tuned
        .profile
        .criteria_scores
        .insert("execution_speed".to_string(), 4.5);
    tuned
        .profile
        .criteria_scores
        .insert("cross_browser_support".to_string(), 9.0);
    tuned.profile.supports_cross_browser = false;

    let result = evaluate(&[tuned]);

    assert_close(criterion(&result, 0, CriterionKey::Execution), 4.5);
    assert_close(criterion(&result, 0, CriterionKey::CrossBrowser), 5.0);
}

#[test]
fn flawless_tool_normalises_to_one_hundred() {
    let flawless = Tool {
        id: ToolId(1),
        profile: flawless_profile("Flawless"),
    };
    let result = evaluate(&[flawless, tool(2, "Baseline")]);

    let top = result.top_recommendation().expect("has a leader");
    assert_eq!(top.tool_name, "Flawless");
    assert_close(top.normalized_score, 100.0);
    assert_close(top.total_score, result.default_weights.max_possible());
    assert!(result.scored_tools[1].normalized_score < 100.0);
}

#[test]
fn equal_totals_keep_input_order() {
    let result = evaluate(&[tool(2, "Second"), tool(1, "First")]);

    let ranked: Vec<(u32, usize)> = result
        .scored_tools
        .iter()
        .map(|score| (score.tool_id.0, score.rank))
        .collect();
    assert_eq!(ranked, vec![(2, 1), (1, 2)]);
}

#[test]
fn top_slices_follow_the_ranking() {
    let tools: Vec<Tool> = (1..=6)
        .map(|id| {
            let mut entry = tool(id, &format!("Tool {id}"));
            entry.profile.execution_speed = (id % 5 + 1) as u8;
            entry.profile.community_strength = (id % 3 + 1) as u8;
            entry
        })
        .collect();

    let result = evaluate(&tools);

    assert_eq!(result.scored_tools.len(), 6);
    assert_eq!(result.recommended_tool_ids.len(), 3);
    assert_eq!(result.bar_chart_data.len(), 5);
    for (rank, score) in result.scored_tools.iter().enumerate() {
        assert_eq!(score.rank, rank + 1);
    }
    assert!(result
        .scored_tools
        .windows(2)
        .all(|pair| pair[0].total_score >= pair[1].total_score));
    for (id, score) in result.recommended_tool_ids.iter().zip(&result.scored_tools) {
        assert_eq!(*id, score.tool_id);
    }
    for (row, score) in result.bar_chart_data.iter().zip(&result.scored_tools) {
        assert_eq!(row.tool, score.tool_name);
        assert_close(row.score, score.normalized_score);
        assert_close(row.maintenance, score.criteria[&CriterionKey::Maintenance].value);
        assert_close(row.reporting, score.criteria[&CriterionKey::Reporting].value);
        assert_close(row.ai, score.criteria[&CriterionKey::AiAssistance].value);
    }
}

#[test]
fn empty_catalogue_yields_empty_result() {
    let result = evaluate(&[]);

    assert!(result.scored_tools.is_empty());
    assert!(result.recommended_tool_ids.is_empty());
    assert!(result.bar_chart_data.is_empty());
    assert_eq!(result.radar_categories, radar_labels());
    assert!(result.top_recommendation().is_none());
}

#[test]
fn scores_carry_summary_and_use_cases() {
    let mut described = tool(1, "Described");
    described.profile.summary = Some("Browser automation".to_string());
    described.profile.additional_metadata.insert(
        "best_for".to_string(),
        json!(["Regression suites", 42, "Smoke tests"]),
    );

    let result = evaluate(&[described]);
    let score = &result.scored_tools[0];

    assert_eq!(score.summary, "Browser automation");
    assert_eq!(
        score.recommended_use_cases,
        vec!["Regression suites".to_string(), "Smoke tests".to_string()]
    );
    assert_eq!(score.criteria.len(), CriterionKey::COUNT);
    assert_eq!(
        score.criteria[&CriterionKey::Community].rationale,
        "Ecosystem maturity and community strength"
    );
}

#[test]
fn evaluation_is_deterministic() {
    let tools = vec![tool(1, "Alpha"), tool(2, "Beta")];
    assert_eq!(evaluate(&tools), evaluate(&tools));
}

#[test]
fn result_serializes_with_public_field_names() {
    let encoded = serde_json::to_value(evaluate(&[tool(1, "Alpha")])).expect("serializes");

    for field in [
        "default_weights",
        "scored_tools",
        "recommended_tool_ids",
        "radar_categories",
        "bar_chart_data",
    ] {
        assert!(encoded.get(field).is_some(), "missing {field}");
    }
    assert_eq!(encoded["recommended_tool_ids"], json!([1]));
    assert!(encoded["scored_tools"][0]["criteria"]["budget_fit"]["value"].is_number());

    let decoded: EvaluationResult = serde_json::from_value(encoded).expect("round-trips");
    assert_eq!(decoded.scored_tools.len(), 1);
}

#[test]
fn rescore_without_overrides_reproduces_the_ranking() {
    let engine = ScoringEngine::default();
    let result = engine.evaluate(&answers(), None, &[tool(1, "Alpha"), tool(2, "Beta")]);

    assert_eq!(engine.rescore(&result, &WeightOverrides::new()), result);
}

#[test]
fn rescore_reorders_under_new_emphasis() {
    let mut assisted = tool(1, "Assisted");
    assisted.profile.ai_capability = 5;
    assisted.profile.community_strength = 1;
    let mut popular = tool(2, "Popular");
    popular.profile.ai_capability = 1;
    popular.profile.community_strength = 5;

    let engine = ScoringEngine::default();
    let result = engine.evaluate(&answers(), None, &[assisted, popular]);
    assert_eq!(result.recommended_tool_ids[0], ToolId(1));

    let mut overrides = WeightOverrides::new();
    overrides.insert("community".to_string(), 10.0);
    let rescored = engine.rescore(&result, &overrides);

    assert_eq!(rescored.recommended_tool_ids[0], ToolId(2));
    assert_close(rescored.default_weights.get(CriterionKey::Community), 10.0);
    assert_eq!(rescored.scored_tools[0].rank, 1);
    assert_eq!(
        rescored.scored_tools[0].criteria,
        result.scored_tools[1].criteria
    );
}

#[test]
fn oversized_override_keeps_scores_bounded_and_restorable() {
    let mut overrides = WeightOverrides::new();
    overrides.insert("execution".to_string(), 1e307);
    let tools = [
        tool(1, "Baseline"),
        Tool {
            id: ToolId(2),
            profile: flawless_profile("Flawless"),
        },
    ];

    let result = ScoringEngine::default().evaluate(&answers(), Some(&overrides), &tools);

    for score in &result.scored_tools {
        assert!(score.total_score.is_finite());
        assert!(
            (0.0..=100.0).contains(&score.normalized_score),
            "{} normalized to {}",
            score.tool_name,
            score.normalized_score
        );
    }
    let encoded = serde_json::to_string(&result).expect("result serializes");
    let restored: EvaluationResult = serde_json::from_str(&encoded).expect("snapshot restores");
    assert_eq!(restored.recommended_tool_ids, result.recommended_tool_ids);
    assert_eq!(restored.scored_tools.len(), 2);
    assert_eq!(restored.scored_tools[0].tool_name, "Flawless");
}
