mod config;
mod ranking;
mod rules;
pub mod validation;

pub use config::{MissingScorePolicy, ScoringConfig};
pub use validation::{
    is_valid_weighting, normalize_weights, total_weight, validate_weights, WeightValidationError,
    REQUIRED_WEIGHT_TOTAL,
};

use super::domain::{Alternative, AlternativeId, Criterion, CriterionId, RankedAlternative};
use rules::{first_missing, weighted_total};

/// Rank alternatives by weighted sum, defaulting missing scores to zero.
///
/// Inputs are only borrowed. Weights that do not add up to 100 are scored as
/// given; run [`validate_weights`] first when that matters.
pub fn compute_ranking(
    criteria: &[Criterion],
    alternatives: &[Alternative],
) -> Vec<RankedAlternative> {
    let scored = alternatives
        .iter()
        .map(|alternative| score(alternative, criteria))
        .collect();

    ranking::assign_ranks(scored)
}

fn score(alternative: &Alternative, criteria: &[Criterion]) -> RankedAlternative {
    let (total_score, components) = weighted_total(alternative, criteria);
    RankedAlternative {
        alternative: alternative.clone(),
        total_score,
        rank: 0,
        components,
    }
}

/// Stateless scorer that applies a [`ScoringConfig`] to a criterion set.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn rank(
        &self,
        criteria: &[Criterion],
        alternatives: &[Alternative],
    ) -> Result<Vec<RankedAlternative>, ScoringError> {
        if self.config.enforce_weight_sum {
            validate_weights(criteria)?;
        }

        if self.config.missing_score == MissingScorePolicy::Reject {
            for alternative in alternatives {
                if let Some(criterion) = first_missing(alternative, criteria) {
                    return Err(ScoringError::MissingScore {
                        alternative: alternative.id.clone(),
                        criterion: criterion.clone(),
                    });
                }
            }
        }

        Ok(compute_ranking(criteria, alternatives))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("alternative '{alternative}' has no score for criterion '{criterion}'")]
    MissingScore {
        alternative: AlternativeId,
        criterion: CriterionId,
    },
    #[error(transparent)]
    InvalidWeights(#[from] WeightValidationError),
}
