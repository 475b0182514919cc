use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Criterion, CriterionId};
use super::engine::{self, WeightValidationError, REQUIRED_WEIGHT_TOTAL};

/// Allowed range and granularity for interactive weight adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl Default for WeightBounds {
    fn default() -> Self {
        Self {
            min: 0,
            max: REQUIRED_WEIGHT_TOTAL,
            step: 1,
        }
    }
}

impl WeightBounds {
    /// Slider limits used by the analysis setup screen.
    pub const fn slider() -> Self {
        Self {
            min: 5,
            max: 50,
            step: 5,
        }
    }

    fn admits(&self, weight: u32) -> bool {
        let step = self.step.max(1);
        weight >= self.min && weight <= self.max && (weight - self.min) % step == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriterionStoreError {
    #[error("criterion '{0}' is defined more than once")]
    DuplicateCriterion(CriterionId),
    #[error("criterion '{0}' does not exist")]
    UnknownCriterion(CriterionId),
    #[error("weight {weight} for criterion '{criterion}' exceeds {REQUIRED_WEIGHT_TOTAL}")]
    WeightOutOfRange { criterion: CriterionId, weight: u32 },
    #[error("weight {weight} for criterion '{criterion}' is outside {min}..={max} in steps of {step}")]
    WeightOffStep {
        criterion: CriterionId,
        weight: u32,
        min: u32,
        max: u32,
        step: u32,
    },
}

/// Live, ordered set of criteria for one analysis.
///
/// Weights may be adjusted freely and need not sum to 100 between edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CriterionSet {
    criteria: Vec<Criterion>,
}

impl CriterionSet {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, CriterionStoreError> {
        let mut seen = HashSet::new();
        for criterion in &criteria {
            if !seen.insert(&criterion.id) {
                return Err(CriterionStoreError::DuplicateCriterion(
                    criterion.id.clone(),
                ));
            }
            check_weight(&criterion.id, criterion.weight)?;
        }

        Ok(Self { criteria })
    }

    pub fn get(&self, id: &CriterionId) -> Option<&Criterion> {
        self.criteria.iter().find(|criterion| &criterion.id == id)
    }

    pub fn contains(&self, id: &CriterionId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &CriterionId> {
        self.criteria.iter().map(|criterion| &criterion.id)
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn set_weight(&mut self, id: &CriterionId, weight: u32) -> Result<(), CriterionStoreError> {
        check_weight(id, weight)?;
        let criterion = self.get_mut(id)?;
        criterion.weight = weight;
        Ok(())
    }

    pub fn adjust_weight(
        &mut self,
        id: &CriterionId,
        weight: u32,
        bounds: WeightBounds,
    ) -> Result<(), CriterionStoreError> {
        if !bounds.admits(weight) {
            return Err(CriterionStoreError::WeightOffStep {
                criterion: id.clone(),
                weight,
                min: bounds.min,
                max: bounds.max,
                step: bounds.step,
            });
        }
        self.set_weight(id, weight)
    }

    pub fn total_weight(&self) -> u32 {
        engine::total_weight(&self.criteria)
    }

    pub fn is_valid_weighting(&self) -> bool {
        engine::is_valid_weighting(&self.criteria)
    }

    pub fn validate_weights(&self) -> Result<(), WeightValidationError> {
        engine::validate_weights(&self.criteria)
    }

    /// Replace every weight with its proportional share of 100.
    pub fn normalize(&mut self) -> Result<(), WeightValidationError> {
        self.criteria = engine::normalize_weights(&self.criteria)?;
        Ok(())
    }

    /// Owned copy for recording; later edits to this set do not reach it.
    pub fn snapshot(&self) -> Vec<Criterion> {
        self.criteria.clone()
    }

    fn get_mut(&mut self, id: &CriterionId) -> Result<&mut Criterion, CriterionStoreError> {
        self.criteria
            .iter_mut()
            .find(|criterion| &criterion.id == id)
            .ok_or_else(|| CriterionStoreError::UnknownCriterion(id.clone()))
    }
}

fn check_weight(id: &CriterionId, weight: u32) -> Result<(), CriterionStoreError> {
    if weight > REQUIRED_WEIGHT_TOTAL {
        return Err(CriterionStoreError::WeightOutOfRange {
            criterion: id.clone(),
            weight,
        });
    }
    Ok(())
}
