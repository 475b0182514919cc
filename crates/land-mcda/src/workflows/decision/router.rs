use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::blueprint::DecisionBlueprint;
use super::domain::{Alternative, Criterion, RankedAlternative, ScenarioId};
use super::engine::{is_valid_weighting, normalize_weights, total_weight, validate_weights};
use super::history::{ScenarioRepository, ScenarioSummaryView};
use super::interchange::results_csv_string;
use super::service::{AnalysisRequest, AnalysisServiceError, DecisionAnalysisService};

#[derive(Debug, Deserialize)]
pub(crate) struct RankingRequest {
    pub(crate) criteria: Vec<Criterion>,
    pub(crate) alternatives: Vec<Alternative>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub(crate) total_weight: u32,
    pub(crate) valid_weighting: bool,
    pub(crate) alternatives: Vec<RankedAlternative>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeightRequest {
    pub(crate) criteria: Vec<Criterion>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WeightValidationView {
    pub(crate) valid: bool,
    pub(crate) total_weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Router builder exposing ranking, weight checks, and scenario history.
pub fn decision_router<R>(service: Arc<DecisionAnalysisService<R>>) -> Router
where
    R: ScenarioRepository + 'static,
{
    Router::new()
        .route("/api/v1/decision/blueprint", get(blueprint_handler))
        .route("/api/v1/decision/rankings", post(rankings_handler::<R>))
        .route(
            "/api/v1/decision/weights/validation",
            post(weight_validation_handler),
        )
        .route(
            "/api/v1/decision/weights/normalization",
            post(weight_normalization_handler),
        )
        .route(
            "/api/v1/decision/scenarios",
            post(create_scenario_handler::<R>).get(list_scenarios_handler::<R>),
        )
        .route(
            "/api/v1/decision/scenarios/:scenario_id",
            get(scenario_handler::<R>),
        )
        .route(
            "/api/v1/decision/scenarios/:scenario_id/export",
            get(export_handler::<R>),
        )
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    let payload = json!({ "error": message.to_string() });
    (status, Json(payload)).into_response()
}

fn service_error_response(error: AnalysisServiceError) -> Response {
    let status = match &error {
        AnalysisServiceError::ScenarioNotFound(_) => StatusCode::NOT_FOUND,
        AnalysisServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_response(status, error)
}

pub(crate) async fn blueprint_handler() -> Json<DecisionBlueprint> {
    Json(DecisionBlueprint::land_use())
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<DecisionAnalysisService<R>>>,
    Json(request): Json<RankingRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let RankingRequest {
        criteria,
        alternatives,
    } = request;
    let weight_total = total_weight(&criteria);
    let weights_balanced = is_valid_weighting(&criteria);

    match service.preview(criteria, alternatives) {
        Ok(alternatives) => {
            let view = RankingResponse {
                total_weight: weight_total,
                valid_weighting: weights_balanced,
                alternatives,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn weight_validation_handler(
    Json(request): Json<WeightRequest>,
) -> Json<WeightValidationView> {
    let outcome = validate_weights(&request.criteria);
    Json(WeightValidationView {
        valid: outcome.is_ok(),
        total_weight: total_weight(&request.criteria),
        error: outcome.err().map(|error| error.to_string()),
    })
}

pub(crate) async fn weight_normalization_handler(Json(request): Json<WeightRequest>) -> Response {
    match normalize_weights(&request.criteria) {
        Ok(criteria) => (StatusCode::OK, Json(json!({ "criteria": criteria }))).into_response(),
        Err(error) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error),
    }
}

pub(crate) async fn create_scenario_handler<R>(
    State(service): State<Arc<DecisionAnalysisService<R>>>,
    Json(request): Json<AnalysisRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.run_analysis(request) {
        Ok(scenario) => (StatusCode::CREATED, Json(scenario)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_scenarios_handler<R>(
    State(service): State<Arc<DecisionAnalysisService<R>>>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let limit = query.limit.unwrap_or_else(|| service.recent_limit());
    match service.recent(limit) {
        Ok(scenarios) => {
            let views: Vec<ScenarioSummaryView> =
                scenarios.iter().map(ScenarioSummaryView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn scenario_handler<R>(
    State(service): State<Arc<DecisionAnalysisService<R>>>,
    Path(scenario_id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.scenario(&ScenarioId(scenario_id)) {
        Ok(scenario) => (StatusCode::OK, Json(scenario)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<DecisionAnalysisService<R>>>,
    Path(scenario_id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let scenario = match service.scenario(&ScenarioId(scenario_id)) {
        Ok(scenario) => scenario,
        Err(error) => return service_error_response(error),
    };

    match results_csv_string(&scenario) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, error),
    }
}
