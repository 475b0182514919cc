use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use land_mcda::config::AppConfig;
use land_mcda::error::AppError;
use land_mcda::telemetry;
use land_mcda::workflows::decision::{DecisionAnalysisService, InMemoryScenarioHistory};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let history = Arc::new(InMemoryScenarioHistory::new());
    let decision_service = Arc::new(
        DecisionAnalysisService::new(history, config.decision.scoring)
            .with_recent_limit(config.decision.recent_scenarios),
    );

    let app = with_decision_routes(decision_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        missing_score = config.decision.scoring.missing_score.label(),
        enforce_weight_sum = config.decision.scoring.enforce_weight_sum,
        "land-use decision service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
