use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{AnswerSet, EvaluationId, Tool, ToolId, ToolPatch, ToolProfile};
use super::intake::{QuestionnaireGuard, QuestionnaireViolation, DEFAULT_TITLE};
use super::repository::{
    EvaluationExport, EvaluationHeader, EvaluationPayload, EvaluationRecord,
    EvaluationRepository, EvaluationStatus, RepositoryError, ToolCatalogue,
};
use super::scoring::{EvaluationResult, ScoringConfig, ScoringEngine, WeightOverrides};

/// Body of a run or update call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub answers: AnswerSet,
    #[serde(default)]
    pub weight_overrides: Option<WeightOverrides>,
    #[serde(default = "default_persist")]
    pub persist: bool,
}

const fn default_persist() -> bool {
    true
}

impl EvaluationRequest {
    pub fn for_answers(answers: AnswerSet) -> Self {
        Self {
            title: None,
            summary: None,
            answers,
            weight_overrides: None,
            persist: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RescoreRequest {
    #[serde(default)]
    pub weight_overrides: WeightOverrides,
}

/// Service composing the questionnaire guard, scoring engine, catalogue, and evaluation store.
pub struct SelectionService<C, E> {
    guard: QuestionnaireGuard,
    engine: Arc<ScoringEngine>,
    catalogue: Arc<C>,
    evaluations: Arc<E>,
    sequence: AtomicU64,
}

impl<C, E> SelectionService<C, E>
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    pub fn new(catalogue: Arc<C>, evaluations: Arc<E>, config: ScoringConfig) -> Self {
        Self {
            guard: QuestionnaireGuard,
            engine: Arc::new(ScoringEngine::new(config)),
            catalogue,
            evaluations,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    fn next_evaluation_id(&self) -> EvaluationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        EvaluationId(format!("eval-{id:06}"))
    }

    fn score(
        &self,
        answers: &AnswerSet,
        overrides: Option<&WeightOverrides>,
    ) -> Result<EvaluationResult, SelectionServiceError> {
        let tools = self.list_tools()?;
        let result = self.engine.evaluate(answers, overrides, &tools);
        info!(
            tools = tools.len(),
            top = result.top_recommendation().map(|score| score.tool_name.as_str()),
            "evaluation scored"
        );
        Ok(result)
    }

    /// Score the answers against the current catalogue, storing the run unless told otherwise.
    pub fn run(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationPayload, SelectionServiceError> {
        let answers = self.guard.accept(request.answers)?;
        let title = self.guard.title(request.title.as_deref())?;
        let result = self.score(&answers, request.weight_overrides.as_ref())?;

        if !request.persist {
            return Ok(EvaluationPayload {
                evaluation: None,
                result,
            });
        }

        let now = Utc::now();
        let record = EvaluationRecord {
            id: self.next_evaluation_id(),
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            summary: request.summary,
            answers,
            weight_profile: result.default_weights,
            results_snapshot: result,
            status: EvaluationStatus::Completed,
            created_at: now,
            updated_at: now,
        };

        let stored = self.evaluations.insert(record)?;
        debug!(evaluation_id = %stored.id.0, "evaluation stored");
        Ok(stored.payload())
    }

    /// Stored evaluations, newest first.
    pub fn list_evaluations(&self) -> Result<Vec<EvaluationHeader>, SelectionServiceError> {
        let mut records = self.evaluations.list()?;
        records.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });
        Ok(records.iter().map(EvaluationRecord::header).collect())
    }

    pub fn get_evaluation(
        &self,
        id: &EvaluationId,
    ) -> Result<EvaluationPayload, SelectionServiceError> {
        Ok(self.fetch_evaluation(id)?.payload())
    }

    /// Re-run a stored evaluation with new inputs, keeping its identity and creation time.
    pub fn update_evaluation(
        &self,
        id: &EvaluationId,
        request: EvaluationRequest,
    ) -> Result<EvaluationPayload, SelectionServiceError> {
        let mut record = self.fetch_evaluation(id)?;
        let answers = self.guard.accept(request.answers)?;
        let title = self.guard.title(request.title.as_deref())?;
        let result = self.score(&answers, request.weight_overrides.as_ref())?;

        if let Some(title) = title {
            record.title = title;
        }
        if let Some(summary) = request.summary {
            record.summary = Some(summary);
        }
        record.answers = answers;
        record.weight_profile = result.default_weights;
        record.results_snapshot = result;
        record.status = EvaluationStatus::Completed;
        record.updated_at = Utc::now();

        self.evaluations.update(record.clone())?;
        Ok(record.payload())
    }

    pub fn delete_evaluation(&self, id: &EvaluationId) -> Result<(), SelectionServiceError> {
        self.evaluations.remove(id)?;
        Ok(())
    }

    pub fn export_evaluation(
        &self,
        id: &EvaluationId,
    ) -> Result<EvaluationExport, SelectionServiceError> {
        Ok(self.fetch_evaluation(id)?.export())
    }

    /// Re-rank a stored evaluation under adjusted weights. Nothing is persisted.
    pub fn rescore_evaluation(
        &self,
        id: &EvaluationId,
        overrides: &WeightOverrides,
    ) -> Result<EvaluationResult, SelectionServiceError> {
        let record = self.fetch_evaluation(id)?;
        Ok(self.engine.rescore(&record.results_snapshot, overrides))
    }

    fn fetch_evaluation(
        &self,
        id: &EvaluationId,
    ) -> Result<EvaluationRecord, SelectionServiceError> {
        let record = self
            .evaluations
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Catalogue ordered by descending overall score; equal scores keep id order.
    pub fn list_tools(&self) -> Result<Vec<Tool>, SelectionServiceError> {
        let mut tools = self.catalogue.list()?;
        tools.sort_by(|left, right| {
            right
                .profile
                .overall_score
                .total_cmp(&left.profile.overall_score)
        });
        Ok(tools)
    }

    pub fn get_tool(&self, id: ToolId) -> Result<Tool, SelectionServiceError> {
        let tool = self.catalogue.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(tool)
    }

    pub fn create_tool(&self, profile: ToolProfile) -> Result<Tool, SelectionServiceError> {
        self.guard.tool_name(&profile)?;
        let tool = self.catalogue.insert(profile)?;
        info!(tool_id = tool.id.0, name = %tool.profile.name, "tool added to catalogue");
        Ok(tool)
    }

    pub fn update_tool(
        &self,
        id: ToolId,
        patch: ToolPatch,
    ) -> Result<Tool, SelectionServiceError> {
        let mut tool = self.get_tool(id)?;
        patch.apply(&mut tool.profile);
        self.guard.tool_name(&tool.profile)?;
        self.catalogue.update(tool.clone())?;
        Ok(tool)
    }

    pub fn delete_tool(&self, id: ToolId) -> Result<(), SelectionServiceError> {
        self.catalogue.remove(id)?;
        Ok(())
    }

    /// Catalogue ordered by name, suitable for a later import.
    pub fn export_tools(&self) -> Result<Vec<Tool>, SelectionServiceError> {
        let mut tools = self.catalogue.list()?;
        tools.sort_by(|left, right| left.profile.name.cmp(&right.profile.name));
        Ok(tools)
    }

    /// Replace the whole catalogue. Stored evaluations keep their snapshots.
    pub fn import_tools(
        &self,
        profiles: Vec<ToolProfile>,
    ) -> Result<Vec<Tool>, SelectionServiceError> {
        for profile in &profiles {
            self.guard.tool_name(profile)?;
        }
        let tools = self.catalogue.replace_all(profiles)?;
        info!(tools = tools.len(), "catalogue replaced");
        Ok(tools)
    }
}

/// Error raised by the selection service.
#[derive(Debug, thiserror::Error)]
pub enum SelectionServiceError {
    #[error(transparent)]
    Questionnaire(#[from] QuestionnaireViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
