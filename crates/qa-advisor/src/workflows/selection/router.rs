use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::access::{AccessError, AccessPolicy, LoginRequest, Principal};
use super::domain::{EvaluationId, ToolId, ToolPatch, ToolProfile};
use super::repository::{EvaluationRepository, RepositoryError, ToolCatalogue};
use super::service::{
    EvaluationRequest, RescoreRequest, SelectionService, SelectionServiceError,
};

/// Shared handler state: the service plus the bearer-token policy.
pub struct SelectionState<C, E> {
    pub service: Arc<SelectionService<C, E>>,
    pub access: Arc<AccessPolicy>,
}

impl<C, E> Clone for SelectionState<C, E> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            access: Arc::clone(&self.access),
        }
    }
}

/// Router exposing the catalogue, evaluation, and login endpoints.
pub fn selection_router<C, E>(
    service: Arc<SelectionService<C, E>>,
    access: Arc<AccessPolicy>,
) -> Router
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<C, E>))
        .route("/api/v1/auth/me", get(me_handler::<C, E>))
        .route(
            "/api/v1/tools",
            get(list_tools_handler::<C, E>).post(create_tool_handler::<C, E>),
        )
        .route("/api/v1/tools/export/json", get(export_tools_handler::<C, E>))
        .route("/api/v1/tools/import/json", post(import_tools_handler::<C, E>))
        .route(
            "/api/v1/tools/:tool_id",
            get(get_tool_handler::<C, E>)
                .put(update_tool_handler::<C, E>)
                .delete(delete_tool_handler::<C, E>),
        )
        .route("/api/v1/evaluations", get(list_evaluations_handler::<C, E>))
        .route("/api/v1/evaluations/run", post(run_handler::<C, E>))
        .route(
            "/api/v1/evaluations/:evaluation_id",
            get(get_evaluation_handler::<C, E>)
                .put(update_evaluation_handler::<C, E>)
                .delete(delete_evaluation_handler::<C, E>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/export/json",
            get(export_evaluation_handler::<C, E>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/rescore",
            post(rescore_handler::<C, E>),
        )
        .with_state(SelectionState { service, access })
}

fn respond<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn respond_with<T: Serialize>(
    status: StatusCode,
    outcome: Result<T, SelectionServiceError>,
) -> Response {
    match outcome {
        Ok(body) => respond(status, body),
        Err(error) => service_error(error),
    }
}

fn service_error(error: SelectionServiceError) -> Response {
    let status = match &error {
        SelectionServiceError::Questionnaire(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SelectionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SelectionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SelectionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    respond(status, json!({ "error": error.to_string() }))
}

fn access_error(error: AccessError) -> Response {
    respond(StatusCode::UNAUTHORIZED, json!({ "error": error.to_string() }))
}

fn authorize<C, E>(
    state: &SelectionState<C, E>,
    headers: &HeaderMap,
) -> Result<Principal, Response> {
    state.access.authorize(headers).map_err(access_error)
}

pub(crate) async fn login_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    match state.access.login(&request) {
        Ok(token) => respond(StatusCode::OK, token),
        Err(error) => access_error(error),
    }
}

pub(crate) async fn me_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    headers: HeaderMap,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    match authorize(&state, &headers) {
        Ok(_) => respond(StatusCode::OK, state.access.session()),
        Err(response) => response,
    }
}

pub(crate) async fn list_tools_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    respond_with(StatusCode::OK, state.service.list_tools())
}

pub(crate) async fn create_tool_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    headers: HeaderMap,
    Json(profile): Json<ToolProfile>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    respond_with(StatusCode::CREATED, state.service.create_tool(profile))
}

pub(crate) async fn get_tool_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(tool_id): Path<u32>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    respond_with(StatusCode::OK, state.service.get_tool(ToolId(tool_id)))
}

pub(crate) async fn update_tool_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(tool_id): Path<u32>,
    headers: HeaderMap,
    Json(patch): Json<ToolPatch>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    respond_with(StatusCode::OK, state.service.update_tool(ToolId(tool_id), patch))
}

pub(crate) async fn delete_tool_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(tool_id): Path<u32>,
    headers: HeaderMap,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    match state.service.delete_tool(ToolId(tool_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn export_tools_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    respond_with(StatusCode::OK, state.service.export_tools())
}

pub(crate) async fn import_tools_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    headers: HeaderMap,
    Json(profiles): Json<Vec<ToolProfile>>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    respond_with(StatusCode::CREATED, state.service.import_tools(profiles))
}

pub(crate) async fn run_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    headers: HeaderMap,
    Json(request): Json<EvaluationRequest>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    respond_with(StatusCode::OK, state.service.run(request))
}

pub(crate) async fn list_evaluations_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    respond_with(StatusCode::OK, state.service.list_evaluations())
}

pub(crate) async fn get_evaluation_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    respond_with(StatusCode::OK, state.service.get_evaluation(&id))
}

pub(crate) async fn update_evaluation_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(evaluation_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<EvaluationRequest>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    let id = EvaluationId(evaluation_id);
    respond_with(StatusCode::OK, state.service.update_evaluation(&id, request))
}

pub(crate) async fn delete_evaluation_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(evaluation_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    match state.service.delete_evaluation(&EvaluationId(evaluation_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn export_evaluation_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    respond_with(StatusCode::OK, state.service.export_evaluation(&id))
}

pub(crate) async fn rescore_handler<C, E>(
    State(state): State<SelectionState<C, E>>,
    Path(evaluation_id): Path<String>,
    Json(request): Json<RescoreRequest>,
) -> Response
where
    C: ToolCatalogue + 'static,
    E: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    respond_with(
        StatusCode::OK,
        state
            .service
            .rescore_evaluation(&id, &request.weight_overrides),
    )
}
