use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::decision::domain::{
    Alternative, Criterion, CriterionCategory, Scenario, ScenarioId,
};
use crate::workflows::decision::history::{
    InMemoryScenarioHistory, RepositoryError, ScenarioRepository,
};
use crate::workflows::decision::{
    decision_router, DecisionAnalysisService, DecisionBlueprint, ScoringConfig,
};

pub(super) fn criterion(id: &str, weight: u32) -> Criterion {
    Criterion::new(id, id.to_uppercase(), weight, CriterionCategory::Environmental)
}

pub(super) fn alternative(id: &str, scores: &[(&str, f64)]) -> Alternative {
    scores
        .iter()
        .fold(Alternative::new(id, id.to_uppercase()), |alt, (key, score)| {
            alt.with_score(*key, *score)
        })
}

/// Two criteria weighted 60/40 and three alternatives totalling 80, 95 and 60.
pub(super) fn sixty_forty() -> (Vec<Criterion>, Vec<Alternative>) {
    let criteria = vec![criterion("a", 60), criterion("b", 40)];
    let alternatives = vec![
        alternative("first", &[("a", 100.0), ("b", 50.0)]),
        alternative("second", &[("a", 100.0), ("b", 87.5)]),
        alternative("third", &[("a", 60.0), ("b", 60.0)]),
    ];
    (criteria, alternatives)
}

pub(super) fn blueprint() -> DecisionBlueprint {
    DecisionBlueprint::land_use()
}

pub(super) fn build_service() -> (
    DecisionAnalysisService<InMemoryScenarioHistory>,
    Arc<InMemoryScenarioHistory>,
) {
    let history = Arc::new(InMemoryScenarioHistory::new());
    let service = DecisionAnalysisService::new(history.clone(), ScoringConfig::default());
    (service, history)
}

pub(super) fn router_with_service(
    service: DecisionAnalysisService<InMemoryScenarioHistory>,
) -> axum::Router {
    decision_router(Arc::new(service))
}

pub(super) struct UnavailableHistory;

impl ScenarioRepository for UnavailableHistory {
    fn append(&self, _scenario: Scenario) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _limit: usize) -> Result<Vec<Scenario>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ScenarioId) -> Result<Option<Scenario>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
