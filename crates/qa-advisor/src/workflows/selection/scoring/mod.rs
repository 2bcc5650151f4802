mod config;
mod criteria;
mod ranking;
mod rules;
mod weights;

pub use config::ScoringConfig;
pub use criteria::{radar_labels, CriterionKey};
pub use ranking::compute_scores;
pub use weights::{derive_weights, WeightOverrides, WeightProfile};

use std::collections::BTreeMap;

use super::domain::{AnswerSet, Tool, ToolId};
use serde::{Deserialize, Serialize};

/// Round half away from zero to two decimals. Magnitudes too large to scale are returned as is.
pub(crate) fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Stateless engine turning answers and a catalogue snapshot into a ranked result.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Derived profile with caller overrides applied on top.
    pub fn effective_weights(
        &self,
        answers: &AnswerSet,
        overrides: Option<&WeightOverrides>,
    ) -> WeightProfile {
        let derived = derive_weights(answers, &self.config);
        match overrides {
            Some(overrides) => derived.with_overrides(overrides, self.config.override_floor),
            None => derived,
        }
    }

    pub fn evaluate(
        &self,
        answers: &AnswerSet,
        overrides: Option<&WeightOverrides>,
        tools: &[Tool],
    ) -> EvaluationResult {
        let weights = self.effective_weights(answers, overrides);
        compute_scores(tools, answers, &weights)
    }

    /// Re-rank a stored result under adjusted weights, using the criterion values it
    /// already carries.
    pub fn rescore(
        &self,
        result: &EvaluationResult,
        overrides: &WeightOverrides,
    ) -> EvaluationResult {
        let weights = result
            .default_weights
            .with_overrides(overrides, self.config.override_floor);
        ranking::rerank(&result.scored_tools, &weights)
    }
}

/// Value of one criterion for one tool, with the reason it is measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub value: f64,
    pub rationale: String,
}

/// Ranked, explainable score for a single tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolScore {
    pub tool_id: ToolId,
    pub tool_name: String,
    pub total_score: f64,
    pub normalized_score: f64,
    pub rank: usize,
    pub criteria: BTreeMap<CriterionKey, CriterionScore>,
    pub summary: String,
    pub recommended_use_cases: Vec<String>,
}

/// Bar chart row for the leading tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRow {
    pub tool: String,
    pub score: f64,
    pub maintenance: f64,
    pub reporting: f64,
    pub ai: f64,
}

/// Full engine output; also the snapshot persisted alongside an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub default_weights: WeightProfile,
    pub scored_tools: Vec<ToolScore>,
    pub recommended_tool_ids: Vec<ToolId>,
    pub radar_categories: Vec<String>,
    pub bar_chart_data: Vec<BarRow>,
}

impl EvaluationResult {
    pub fn top_recommendation(&self) -> Option<&ToolScore> {
        self.scored_tools.first()
    }
}
