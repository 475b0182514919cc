//! Weighted multi-criteria ranking of land-use alternatives and scenario history.
//!
//! Criteria and alternatives live in explicit stores owned by the caller; the
//! engine borrows them and returns fresh ranked copies, and the recorder keeps
//! immutable snapshots of finished analyses.

pub mod alternatives;
pub mod blueprint;
pub mod criteria;
pub mod domain;
pub mod engine;
pub mod history;
pub mod interchange;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use alternatives::{AlternativeSet, AlternativeStoreError};
pub use blueprint::DecisionBlueprint;
pub use criteria::{CriterionSet, CriterionStoreError, WeightBounds};
pub use domain::{
    Alternative, AlternativeId, Criterion, CriterionCategory, CriterionId, RankedAlternative,
    Region, Scenario, ScenarioId, ScoreComponent,
};
pub use engine::{
    compute_ranking, is_valid_weighting, normalize_weights, validate_weights, MissingScorePolicy,
    ScoringConfig, ScoringEngine, ScoringError, WeightValidationError,
};
pub use history::{
    InMemoryScenarioHistory, RepositoryError, ScenarioRecorder, ScenarioRepository,
    ScenarioSummaryView,
};
pub use interchange::{
    results_csv_string, write_results_csv, AlternativeCsvImporter, AlternativeImportError,
};
pub use router::decision_router;
pub use service::{AnalysisRequest, AnalysisServiceError, DecisionAnalysisService};
