use metrics_exporter_prometheus::PrometheusHandle;
use qa_advisor::config::AppConfig;
use qa_advisor::error::AppError;
use qa_advisor::workflows::selection::{
    load_catalogue, AccessPolicy, InMemoryEvaluationRepository, InMemoryToolCatalogue,
    SelectionService,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type AdvisorService =
    SelectionService<InMemoryToolCatalogue, InMemoryEvaluationRepository>;

/// Service backed by in-memory stores, seeded from `catalogue` or the configured path.
pub(crate) fn build_service(
    config: &AppConfig,
    catalogue: Option<&Path>,
) -> Result<AdvisorService, AppError> {
    let path = catalogue.or(config.catalogue.path.as_deref());
    let profiles = load_catalogue(path)?;
    let source = path.map_or_else(
        || "bundled seed".to_string(),
        |path| path.display().to_string(),
    );
    info!(tools = profiles.len(), %source, "catalogue loaded");

    let tools = InMemoryToolCatalogue::seeded(profiles)?;
    Ok(SelectionService::new(
        Arc::new(tools),
        Arc::new(InMemoryEvaluationRepository::default()),
        config.scoring.clone(),
    ))
}

pub(crate) fn access_policy(config: &AppConfig) -> AccessPolicy {
    AccessPolicy::from_config(&config.auth)
}
