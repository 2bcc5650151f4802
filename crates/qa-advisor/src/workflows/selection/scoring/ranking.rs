use std::collections::BTreeMap;

use super::super::domain::{AnswerSet, Tool, ToolId};
use super::criteria::{radar_labels, CriterionKey, CRITERIA};
use super::rules::scale;
use super::weights::WeightProfile;
use super::{round2, BarRow, CriterionScore, EvaluationResult, ToolScore};

const RECOMMENDED_COUNT: usize = 3;
const BAR_CHART_COUNT: usize = 5;

/// Score every tool, rank them, and derive the chart aggregates.
///
/// `tools` order is the tie-break order: equal totals keep their relative input position.
pub fn compute_scores(
    tools: &[Tool],
    answers: &AnswerSet,
    weights: &WeightProfile,
) -> EvaluationResult {
    let scored = tools
        .iter()
        .map(|tool| score_tool(tool, answers, weights))
        .collect();

    assemble(*weights, scored)
}

fn score_tool(tool: &Tool, answers: &AnswerSet, weights: &WeightProfile) -> ToolScore {
    let mut criteria = BTreeMap::new();
    for rule in &CRITERIA {
        let value = scale((rule.resolve)(tool, answers));
        criteria.insert(
            rule.key,
            CriterionScore {
                value,
                rationale: rule.rationale.to_string(),
            },
        );
    }

    let (total_score, normalized_score) = totals(&criteria, weights);

    ToolScore {
        tool_id: tool.id,
        tool_name: tool.profile.name.clone(),
        total_score,
        normalized_score,
        rank: 0,
        criteria,
        summary: tool.profile.summary.clone().unwrap_or_default(),
        recommended_use_cases: tool.profile.best_for(),
    }
}

/// Weighted total (rounded) and its share of the best achievable total.
fn totals(
    criteria: &BTreeMap<CriterionKey, CriterionScore>,
    weights: &WeightProfile,
) -> (f64, f64) {
    let total: f64 = weights
        .iter()
        .map(|(key, weight)| criterion_value(criteria, key) * weight)
        .sum();
    let max_possible = weights.max_possible();

    let normalized = if max_possible > 0.0 {
        round2(total / max_possible * 100.0)
    } else {
        0.0
    };

    (round2(total), normalized)
}

fn criterion_value(criteria: &BTreeMap<CriterionKey, CriterionScore>, key: CriterionKey) -> f64 {
    criteria.get(&key).map_or(0.0, |score| score.value)
}

/// Re-rank stored scores under a new profile without consulting the catalogue.
pub(crate) fn rerank(scored: &[ToolScore], weights: &WeightProfile) -> EvaluationResult {
    let rescored = scored
        .iter()
        .map(|entry| {
            let (total_score, normalized_score) = totals(&entry.criteria, weights);
            ToolScore {
                total_score,
                normalized_score,
                ..entry.clone()
            }
        })
        .collect();

    assemble(*weights, rescored)
}

fn assemble(weights: WeightProfile, mut scored: Vec<ToolScore>) -> EvaluationResult {
    // `sort_by` is stable, which keeps input order for equal totals.
    scored.sort_by(|left, right| right.total_score.total_cmp(&left.total_score));
    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    let recommended_tool_ids: Vec<ToolId> = scored
        .iter()
        .take(RECOMMENDED_COUNT)
        .map(|entry| entry.tool_id)
        .collect();

    let bar_chart_data = scored
        .iter()
        .take(BAR_CHART_COUNT)
        .map(|entry| BarRow {
            tool: entry.tool_name.clone(),
            score: entry.normalized_score,
            maintenance: criterion_value(&entry.criteria, CriterionKey::Maintenance),
            reporting: criterion_value(&entry.criteria, CriterionKey::Reporting),
            ai: criterion_value(&entry.criteria, CriterionKey::AiAssistance),
        })
        .collect();

    EvaluationResult {
        default_weights: weights,
        scored_tools: scored,
        recommended_tool_ids,
        radar_categories: radar_labels(),
        bar_chart_data,
    }
}
