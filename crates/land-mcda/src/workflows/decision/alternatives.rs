use std::collections::HashSet;

use serde::Serialize;

use super::criteria::CriterionSet;
use super::domain::{Alternative, AlternativeId, CriterionId};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlternativeStoreError {
    #[error("alternative '{0}' is defined more than once")]
    DuplicateAlternative(AlternativeId),
    #[error("alternative '{0}' does not exist")]
    UnknownAlternative(AlternativeId),
    #[error("score {score} for '{alternative}' on '{criterion}' is outside 0..=100")]
    ScoreOutOfRange {
        alternative: AlternativeId,
        criterion: CriterionId,
        score: f64,
    },
    #[error("alternative '{alternative}' scores unknown criterion '{criterion}'")]
    UnknownCriterion {
        alternative: AlternativeId,
        criterion: CriterionId,
    },
}

/// Ordered set of candidate options compared in one analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlternativeSet {
    alternatives: Vec<Alternative>,
}

impl AlternativeSet {
    pub fn new(alternatives: Vec<Alternative>) -> Result<Self, AlternativeStoreError> {
        let mut seen = HashSet::new();
        for alternative in &alternatives {
            if !seen.insert(&alternative.id) {
                return Err(AlternativeStoreError::DuplicateAlternative(
                    alternative.id.clone(),
                ));
            }
            for (criterion, score) in &alternative.scores {
                check_score(&alternative.id, criterion, *score)?;
            }
        }

        Ok(Self { alternatives })
    }

    pub fn get(&self, id: &AlternativeId) -> Option<&Alternative> {
        self.alternatives
            .iter()
            .find(|alternative| &alternative.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alternative> {
        self.alternatives.iter()
    }

    pub fn as_slice(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn set_score(
        &mut self,
        alternative: &AlternativeId,
        criterion: &CriterionId,
        score: f64,
    ) -> Result<(), AlternativeStoreError> {
        check_score(alternative, criterion, score)?;
        let entry = self
            .alternatives
            .iter_mut()
            .find(|candidate| &candidate.id == alternative)
            .ok_or_else(|| AlternativeStoreError::UnknownAlternative(alternative.clone()))?;
        entry.scores.insert(criterion.clone(), score);
        Ok(())
    }

    /// Score keys that do not name a criterion in `criteria`.
    pub fn unknown_criteria(&self, criteria: &CriterionSet) -> Vec<(AlternativeId, CriterionId)> {
        self.alternatives
            .iter()
            .flat_map(move |alternative| {
                alternative
                    .scores
                    .keys()
                    .filter(move |criterion| !criteria.contains(criterion))
                    .map(move |criterion| (alternative.id.clone(), criterion.clone()))
            })
            .collect()
    }

    /// Active criteria an alternative has no score for.
    pub fn missing_scores(&self, criteria: &CriterionSet) -> Vec<(AlternativeId, CriterionId)> {
        self.alternatives
            .iter()
            .flat_map(move |alternative| {
                criteria
                    .ids()
                    .filter(move |criterion| !alternative.scores.contains_key(*criterion))
                    .map(move |criterion| (alternative.id.clone(), criterion.clone()))
            })
            .collect()
    }

    pub fn ensure_known_criteria(
        &self,
        criteria: &CriterionSet,
    ) -> Result<(), AlternativeStoreError> {
        match self.unknown_criteria(criteria).into_iter().next() {
            Some((alternative, criterion)) => Err(AlternativeStoreError::UnknownCriterion {
                alternative,
                criterion,
            }),
            None => Ok(()),
        }
    }

    /// Owned copy for recording; later edits to this set do not reach it.
    pub fn snapshot(&self) -> Vec<Alternative> {
        self.alternatives.clone()
    }
}

fn check_score(
    alternative: &AlternativeId,
    criterion: &CriterionId,
    score: f64,
) -> Result<(), AlternativeStoreError> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(AlternativeStoreError::ScoreOutOfRange {
            alternative: alternative.clone(),
            criterion: criterion.clone(),
            score,
        })
    }
}
