use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AnswerSet, EvaluationId, Tool, ToolId, ToolProfile};
use super::scoring::{EvaluationResult, WeightProfile};

/// Lifecycle marker for stored evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    Completed,
}

/// Stored evaluation: request inputs plus the result snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub title: String,
    pub summary: Option<String>,
    pub answers: AnswerSet,
    pub weight_profile: WeightProfile,
    pub results_snapshot: EvaluationResult,
    pub status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn header(&self) -> EvaluationHeader {
        EvaluationHeader {
            id: self.id.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            answers: self.answers.clone(),
            weight_profile: self.weight_profile,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Restore the result for redisplay, with the stored header attached.
    pub fn payload(&self) -> EvaluationPayload {
        EvaluationPayload {
            evaluation: Some(self.header()),
            result: self.results_snapshot.clone(),
        }
    }

    pub fn export(&self) -> EvaluationExport {
        EvaluationExport {
            id: self.id.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            answers: self.answers.clone(),
            weight_profile: self.weight_profile,
            results: self.results_snapshot.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Evaluation metadata returned by list and attached to result payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationHeader {
    pub id: EvaluationId,
    pub title: String,
    pub summary: Option<String>,
    pub answers: AnswerSet,
    pub weight_profile: WeightProfile,
    pub status: EvaluationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Engine result plus the stored header when the run was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    pub evaluation: Option<EvaluationHeader>,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

/// Downloadable JSON document for a stored evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationExport {
    pub id: EvaluationId,
    pub title: String,
    pub summary: Option<String>,
    pub answers: AnswerSet,
    pub weight_profile: WeightProfile,
    pub results: EvaluationResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for the tool catalogue.
pub trait ToolCatalogue: Send + Sync {
    fn list(&self) -> Result<Vec<Tool>, RepositoryError>;
    fn fetch(&self, id: ToolId) -> Result<Option<Tool>, RepositoryError>;
    fn insert(&self, profile: ToolProfile) -> Result<Tool, RepositoryError>;
    fn update(&self, tool: Tool) -> Result<(), RepositoryError>;
    fn remove(&self, id: ToolId) -> Result<(), RepositoryError>;
    fn replace_all(&self, profiles: Vec<ToolProfile>) -> Result<Vec<Tool>, RepositoryError>;
}

/// Storage abstraction for evaluation snapshots.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn update(&self, record: EvaluationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError>;
    fn remove(&self, id: &EvaluationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
