use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use super::alternatives::{AlternativeSet, AlternativeStoreError};
use super::blueprint::DecisionBlueprint;
use super::criteria::{CriterionSet, CriterionStoreError};
use super::domain::{Alternative, Criterion, RankedAlternative, Region, Scenario, ScenarioId};
use super::engine::{ScoringConfig, ScoringEngine, ScoringError, WeightValidationError};
use super::history::{RepositoryError, ScenarioRecorder, ScenarioRepository};

/// Inputs of one analysis run as submitted by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<Alternative>,
}

impl AnalysisRequest {
    pub fn from_blueprint(
        name: impl Into<String>,
        region: Region,
        blueprint: &DecisionBlueprint,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            region: Some(region),
            criteria: blueprint.criteria.clone(),
            alternatives: blueprint.alternatives.clone(),
        }
    }
}

/// Service composing weight validation, the scoring engine, and scenario history.
pub struct DecisionAnalysisService<R> {
    engine: ScoringEngine,
    recorder: ScenarioRecorder<R>,
    recent_limit: usize,
}

/// History listings return this many scenarios unless told otherwise.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

impl<R> DecisionAnalysisService<R>
where
    R: ScenarioRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            engine: ScoringEngine::new(config),
            recorder: ScenarioRecorder::new(repository),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    pub fn scoring_config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    /// Rank without recording anything.
    pub fn rank(
        &self,
        criteria: &[Criterion],
        alternatives: &[Alternative],
    ) -> Result<Vec<RankedAlternative>, ScoringError> {
        let ranked = self.engine.rank(criteria, alternatives)?;
        debug!(
            criteria = criteria.len(),
            alternatives = ranked.len(),
            "ranked alternatives"
        );
        Ok(ranked)
    }

    /// Check both stores and rank without recording. Weights need not sum to 100.
    pub fn preview(
        &self,
        criteria: Vec<Criterion>,
        alternatives: Vec<Alternative>,
    ) -> Result<Vec<RankedAlternative>, AnalysisServiceError> {
        let criteria = CriterionSet::new(criteria)?;
        let alternatives = AlternativeSet::new(alternatives)?;
        alternatives.ensure_known_criteria(&criteria)?;

        Ok(self.rank(criteria.as_slice(), alternatives.as_slice())?)
    }

    /// Validate, rank, and record a complete analysis.
    pub fn run_analysis(
        &self,
        request: AnalysisRequest,
    ) -> Result<Scenario, AnalysisServiceError> {
        let AnalysisRequest {
            name,
            description,
            region,
            criteria,
            alternatives,
        } = request;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AnalysisServiceError::MissingName);
        }
        let region = region.ok_or(AnalysisServiceError::MissingRegion)?;

        let criteria = CriterionSet::new(criteria)?;
        criteria.validate_weights()?;
        let alternatives = AlternativeSet::new(alternatives)?;
        alternatives.ensure_known_criteria(&criteria)?;

        let ranked = self.rank(criteria.as_slice(), alternatives.as_slice())?;

        let description = description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| format!("MCDA analysis for {}", region.label()));

        let scenario = self.recorder.record(
            name,
            description,
            Some(region),
            criteria.as_slice(),
            &ranked,
        )?;

        info!(
            scenario = %scenario.id(),
            region = region.key(),
            leader = scenario.leader().map(|entry| entry.name()).unwrap_or("none"),
            "recorded decision scenario"
        );

        Ok(scenario)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<Scenario>, AnalysisServiceError> {
        Ok(self.recorder.recent(limit)?)
    }

    pub fn scenario(&self, id: &ScenarioId) -> Result<Scenario, AnalysisServiceError> {
        self.recorder
            .get(id)?
            .ok_or_else(|| AnalysisServiceError::ScenarioNotFound(id.clone()))
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("scenario name is required")]
    MissingName,
    #[error("target region is required")]
    MissingRegion,
    #[error(transparent)]
    Criteria(#[from] CriterionStoreError),
    #[error(transparent)]
    Alternatives(#[from] AlternativeStoreError),
    #[error(transparent)]
    Weights(#[from] WeightValidationError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("scenario '{0}' not found")]
    ScenarioNotFound(ScenarioId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AnalysisServiceError {
    /// Caller supplied inputs that cannot be analysed as given.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(
            self,
            AnalysisServiceError::ScenarioNotFound(_) | AnalysisServiceError::Repository(_)
        )
    }
}
