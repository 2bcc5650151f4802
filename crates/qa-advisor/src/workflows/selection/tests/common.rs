use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use crate::config::AuthConfig;
use crate::workflows::selection::domain::{
    AnswerSet, BudgetTier, EvaluationId, MaintenanceTeamSize, ProjectDuration, ProjectType,
    RunFrequency, ScriptingSkill, TestingApproach, Tool, ToolId, ToolProfile,
};
use crate::workflows::selection::repository::{
    EvaluationRecord, EvaluationRepository, RepositoryError, ToolCatalogue,
};
use crate::workflows::selection::{
    selection_router, AccessPolicy, InMemoryEvaluationRepository, InMemoryToolCatalogue,
    ScoringConfig, SelectionService,
};

pub(super) const SECRET: &str = "test-secret";
pub(super) const ADMIN_EMAIL: &str = "qa.lead@example.com";
pub(super) const ADMIN_PASSWORD: &str = "qa-team";

pub(super) fn answers() -> AnswerSet {
    AnswerSet {
        project_type: ProjectType::Web,
        team_scripting_skill: ScriptingSkill::Medium,
        primary_language: "Python".to_string(),
        budget: BudgetTier::Free,
        test_run_frequency: RunFrequency::Daily,
        ci_cd_required: true,
        ai_automation_preference: 50,
        maintenance_team_size: MaintenanceTeamSize::FourToTen,
        cross_browser_required: true,
        reporting_importance: 80,
        preferred_approach: TestingApproach::Hybrid,
        expected_duration: ProjectDuration::OverOneYear,
    }
}

/// Same questionnaire as [`answers`] in the capitalised form the web form submits.
pub(super) fn answers_json() -> Value {
    serde_json::json!({
        "project_type": "Web",
        "team_scripting_skill": "Medium",
        "primary_language": "Python",
        "budget": "Free",
        "test_run_frequency": "Daily",
        "ci_cd_required": true,
        "ai_automation_preference": 50,
        "maintenance_team_size": "4-10",
        "cross_browser_required": true,
        "reporting_importance": 80,
        "preferred_approach": "Hybrid",
        "expected_duration": ">1 year"
    })
}

pub(super) fn tool(id: u32, name: &str) -> Tool {
    Tool {
        id: ToolId(id),
        profile: ToolProfile::named(name, name.to_ascii_lowercase()),
    }
}

/// A tool that maxes every criterion for [`answers`].
pub(super) fn flawless_profile(name: &str) -> ToolProfile {
    let mut profile = ToolProfile::named(name, name.to_ascii_lowercase());
    profile.ai_capability = 5;
    profile.reporting_quality = 5;
    profile.maintenance_effort = 1;
    profile.execution_speed = 5;
    profile.analytics_depth = 5;
    profile.community_strength = 5;
    profile.languages_supported = vec!["Python".to_string()];
    profile
}

pub(super) fn catalogue_profiles() -> Vec<ToolProfile> {
    let mut scriptless = ToolProfile::named("Scriptless Cloud", "scriptless-cloud");
    scriptless.overall_score = 3.9;
    scriptless.pricing_tier = "enterprise".to_string();
    scriptless.ai_capability = 5;
    scriptless.maintenance_effort = 1;
    scriptless.recommended_team_skill = "low".to_string();

    let mut framework = ToolProfile::named("Open Framework", "open-framework");
    framework.overall_score = 4.4;
    framework.execution_speed = 5;
    framework.community_strength = 5;
    framework.languages_supported = vec!["Python".to_string(), "Java".to_string()];

    let mut recorder = ToolProfile::named("Recorder Suite", "recorder-suite");
    recorder.overall_score = 3.1;
    recorder.pricing_tier = "> $500".to_string();
    recorder.supports_cross_browser = false;

    vec![scriptless, framework, recorder]
}

pub(super) fn auth_config() -> AuthConfig {
    AuthConfig {
        secret_key: SECRET.to_string(),
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
    }
}

pub(super) type MemoryService =
    SelectionService<InMemoryToolCatalogue, InMemoryEvaluationRepository>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryToolCatalogue>,
    Arc<InMemoryEvaluationRepository>,
) {
    let catalogue = Arc::new(
        InMemoryToolCatalogue::seeded(catalogue_profiles()).expect("fixture catalogue is unique"),
    );
    let evaluations = Arc::new(InMemoryEvaluationRepository::default());
    let service = SelectionService::new(
        catalogue.clone(),
        evaluations.clone(),
        ScoringConfig::default(),
    );
    (service, catalogue, evaluations)
}

pub(super) fn router_with_service<C, E>(service: SelectionService<C, E>) -> Router
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    selection_router(
        Arc::new(service),
        Arc::new(AccessPolicy::from_config(&auth_config())),
    )
}

pub(super) fn bearer() -> String {
    format!("Bearer {SECRET}")
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Evaluation store whose backing service is down.
#[derive(Default, Clone)]
pub(super) struct UnavailableEvaluations;

impl EvaluationRepository for UnavailableEvaluations {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EvaluationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &EvaluationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
