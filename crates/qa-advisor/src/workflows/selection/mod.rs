//! Tool selection workflow: questionnaire intake, weight derivation, catalogue scoring, and the
//! evaluation store that keeps each ranked result for later review.
//!
//! The scoring engine in [`scoring`] is pure; everything else in this module wires it to the
//! catalogue and evaluation repositories and exposes it over HTTP.

pub mod access;
pub mod domain;
pub(crate) mod intake;
pub mod memory;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::{AccessError, AccessPolicy, LoginRequest, LoginResponse, Principal};
pub use domain::{
    AnswerSet, BudgetTier, EvaluationId, MaintenanceTeamSize, ProjectDuration, ProjectType,
    RunFrequency, ScriptingSkill, TestingApproach, Tool, ToolId, ToolPatch, ToolProfile,
};
pub use intake::{QuestionnaireGuard, QuestionnaireViolation};
pub use memory::{InMemoryEvaluationRepository, InMemoryToolCatalogue};
pub use repository::{
    EvaluationExport, EvaluationHeader, EvaluationPayload, EvaluationRecord,
    EvaluationRepository, EvaluationStatus, RepositoryError, ToolCatalogue,
};
pub use router::{selection_router, SelectionState};
pub use scoring::{
    compute_scores, derive_weights, radar_labels, BarRow, CriterionKey, CriterionScore,
    EvaluationResult, ScoringConfig, ScoringEngine, ToolScore, WeightOverrides, WeightProfile,
};
pub use seed::{load_catalogue, load_json_file, seed_catalogue, DataFileError};
pub use service::{EvaluationRequest, RescoreRequest, SelectionService, SelectionServiceError};
