use land_mcda::workflows::decision::{CriterionId, MissingScorePolicy, Region};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses `criterion=weight`, e.g. `economic=35`.
pub(crate) fn parse_weight(raw: &str) -> Result<(CriterionId, u32), String> {
    let (id, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CRITERION=WEIGHT, got '{raw}'"))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing criterion id in '{raw}'"));
    }

    let weight = weight
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("failed to parse weight in '{raw}' ({err})"))?;

    Ok((CriterionId::new(id), weight))
}

pub(crate) fn parse_region(raw: &str) -> Result<Region, String> {
    Region::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Region::all().iter().map(|region| region.key()).collect();
        format!("unknown region '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_missing_score(raw: &str) -> Result<MissingScorePolicy, String> {
    MissingScorePolicy::parse(raw)
        .ok_or_else(|| format!("unknown missing-score policy '{raw}' (expected zero or reject)"))
}
