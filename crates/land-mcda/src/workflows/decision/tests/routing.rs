use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::decision::history::ScenarioRepository;
use crate::workflows::decision::router::{
    create_scenario_handler, export_handler, rankings_handler, scenario_handler,
    weight_validation_handler, RankingRequest, WeightRequest,
};
use crate::workflows::decision::{
    AnalysisRequest, DecisionAnalysisService, InMemoryScenarioHistory, MissingScorePolicy, Region,
    ScoringConfig,
};

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn scenario_payload(name: &str) -> Value {
    let blueprint = blueprint();
    json!({
        "name": name,
        "region": "sumatra",
        "criteria": blueprint.criteria,
        "alternatives": blueprint.alternatives,
    })
}

#[tokio::test]
async fn blueprint_route_serves_seed_data() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/decision/blueprint"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["criteria"].as_array().map(Vec::len), Some(5));
    assert_eq!(payload["alternatives"].as_array().map(Vec::len), Some(4));
    assert_eq!(payload["weight_bounds"]["step"], json!(5));
    assert_eq!(payload["regions"][0], json!("kalimantan"));
}

#[tokio::test]
async fn rankings_route_reports_order_and_weight_state() {
    let (service, history) = build_service();
    let router = router_with_service(service);
    let (criteria, alternatives) = sixty_forty();

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/decision/rankings",
            &json!({ "criteria": criteria, "alternatives": alternatives }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_weight"], json!(100));
    assert_eq!(payload["valid_weighting"], json!(true));
    assert_eq!(payload["alternatives"][0]["id"], json!("second"));
    assert_eq!(payload["alternatives"][0]["rank"], json!(1));
    assert_eq!(payload["alternatives"][2]["id"], json!("third"));
    assert_eq!(history.count().expect("count"), 0);
}

#[tokio::test]
async fn rankings_route_rejects_missing_scores_under_strict_policy() {
    let history = Arc::new(InMemoryScenarioHistory::new());
    let service = DecisionAnalysisService::new(
        history,
        ScoringConfig {
            missing_score: MissingScorePolicy::Reject,
            enforce_weight_sum: false,
        },
    );
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/decision/rankings",
            &json!({
                "criteria": [criterion("a", 60), criterion("b", 40)],
                "alternatives": [alternative("partial", &[("a", 10.0)])],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn rankings_route_rejects_out_of_range_scores() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/decision/rankings",
            &json!({
                "criteria": [criterion("a", 50), criterion("b", 50)],
                "alternatives": [
                    alternative("low", &[("a", 10.0), ("b", 15.0)]),
                    alternative("broken", &[("a", 1e308), ("b", -1e308)]),
                    alternative("high", &[("a", 40.0), ("b", 40.0)]),
                ],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("broken")));
}

#[tokio::test]
async fn rankings_handler_rejects_invalid_criteria() {
    let (service, _) = build_service();
    let service = Arc::new(service);

    let oversized = rankings_handler(
        State(service.clone()),
        axum::Json(RankingRequest {
            criteria: vec![criterion("a", 200), criterion("b", 200)],
            alternatives: vec![alternative("high", &[("a", 40.0), ("b", 40.0)])],
        }),
    )
    .await;
    assert_eq!(oversized.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let duplicated = rankings_handler(
        State(service),
        axum::Json(RankingRequest {
            criteria: vec![criterion("a", 50), criterion("a", 50)],
            alternatives: Vec::new(),
        }),
    )
    .await;
    assert_eq!(duplicated.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn weight_validation_reports_totals() {
    let valid = weight_validation_handler(axum::Json(WeightRequest {
        criteria: blueprint().criteria,
    }))
    .await;
    assert!(valid.valid);
    assert_eq!(valid.total_weight, 100);
    assert!(valid.error.is_none());

    let invalid = weight_validation_handler(axum::Json(WeightRequest {
        criteria: vec![criterion("a", 30), criterion("b", 30)],
    }))
    .await;
    assert!(!invalid.valid);
    assert_eq!(invalid.total_weight, 60);
    assert!(invalid.error.is_some());
}

#[tokio::test]
async fn normalization_route_rescales_weights() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/decision/weights/normalization",
            &json!({ "criteria": [criterion("a", 1), criterion("b", 1), criterion("c", 1)] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let weights: Vec<u64> = payload["criteria"]
        .as_array()
        .expect("criteria array")
        .iter()
        .filter_map(|criterion| criterion["weight"].as_u64())
        .collect();
    assert_eq!(weights, vec![34, 33, 33]);
}

#[tokio::test]
async fn normalization_route_rejects_zero_totals() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/decision/weights/normalization",
            &json!({ "criteria": [criterion("a", 0)] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn scenario_route_creates_and_lists_history() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    for name in ["north", "south", "east", "west"] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/decision/scenarios",
                &scenario_payload(name),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .clone()
        .oneshot(get_request("/api/v1/decision/scenarios"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let names: Vec<&str> = payload
        .as_array()
        .expect("summary array")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert_eq!(names, vec!["west", "east", "south"]);
    assert_eq!(payload[0]["leader"], json!("Ecotourism Development"));

    let response = router
        .oneshot(get_request("/api/v1/decision/scenarios?limit=10"))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn create_handler_rejects_invalid_weights() {
    let (service, _) = build_service();
    let mut request = AnalysisRequest::from_blueprint("heavy", Region::Papua, &blueprint());
    request.criteria[1].weight = 50;

    let response = create_scenario_handler(State(Arc::new(service)), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("130%")));
}

#[tokio::test]
async fn create_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(DecisionAnalysisService::new(
        Arc::new(UnavailableHistory),
        ScoringConfig::default(),
    ));
    let request = AnalysisRequest::from_blueprint("offline", Region::Java, &blueprint());

    let response =
        create_scenario_handler::<UnavailableHistory>(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn scenario_handler_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();

    let response =
        scenario_handler(State(Arc::new(service)), Path("scn-000404".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn scenario_handler_returns_recorded_snapshot() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let scenario = service
        .run_analysis(AnalysisRequest::from_blueprint(
            "snapshot",
            Region::Sulawesi,
            &blueprint(),
        ))
        .expect("analysis succeeds");

    let response = scenario_handler(State(service), Path(scenario.id().0.clone())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!(scenario.id().0));
    assert_eq!(payload["region"], json!("sulawesi"));
    assert_eq!(payload["alternatives"][0]["total_score"], json!(76.5));
}

#[tokio::test]
async fn export_handler_streams_csv() {
    let (service, _) = build_service();
    let service = Arc::new(service);
    let scenario = service
        .run_analysis(AnalysisRequest::from_blueprint(
            "export",
            Region::Kalimantan,
            &blueprint(),
        ))
        .expect("analysis succeeds");

    let response = export_handler(State(service), Path(scenario.id().0.clone())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("rank,id,name,total_score,biodiversity,carbon,economic,social,sustainability")
    );
    assert!(lines
        .next()
        .is_some_and(|line| line.starts_with("1,ecotourism,")));
}
