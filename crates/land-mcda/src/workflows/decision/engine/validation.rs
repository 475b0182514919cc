use super::super::domain::Criterion;

/// Weights of an active criterion set must add up to this many percentage points.
pub const REQUIRED_WEIGHT_TOTAL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightValidationError {
    #[error("no criteria supplied")]
    NoCriteria,
    #[error("criterion weights total {total}%, expected {REQUIRED_WEIGHT_TOTAL}%")]
    SumMismatch { total: u32 },
    #[error("criterion weights total 0%, nothing to rescale")]
    ZeroTotal,
}

pub fn total_weight(criteria: &[Criterion]) -> u32 {
    criteria
        .iter()
        .fold(0u32, |total, criterion| total.saturating_add(criterion.weight))
}

pub fn is_valid_weighting(criteria: &[Criterion]) -> bool {
    total_weight(criteria) == REQUIRED_WEIGHT_TOTAL
}

/// Precondition check callers run before handing criteria to the engine.
pub fn validate_weights(criteria: &[Criterion]) -> Result<(), WeightValidationError> {
    if criteria.is_empty() {
        return Err(WeightValidationError::NoCriteria);
    }

    let total = total_weight(criteria);
    if total == REQUIRED_WEIGHT_TOTAL {
        Ok(())
    } else {
        Err(WeightValidationError::SumMismatch { total })
    }
}

/// Rescale weights proportionally so they sum to exactly 100.
///
/// Each weight is floored to its proportional share and the leftover points go
/// to the largest remainders; equal remainders favour the earlier criterion.
pub fn normalize_weights(criteria: &[Criterion]) -> Result<Vec<Criterion>, WeightValidationError> {
    if criteria.is_empty() {
        return Err(WeightValidationError::NoCriteria);
    }

    let total = u64::from(total_weight(criteria));
    if total == 0 {
        return Err(WeightValidationError::ZeroTotal);
    }

    let target = u64::from(REQUIRED_WEIGHT_TOTAL);
    let mut shares: Vec<(usize, u64, u64)> = criteria
        .iter()
        .enumerate()
        .map(|(index, criterion)| {
            let scaled = u64::from(criterion.weight) * target;
            (index, scaled / total, scaled % total)
        })
        .collect();

    let allotted: u64 = shares.iter().map(|(_, floor, _)| floor).sum();
    let leftover = target.saturating_sub(allotted) as usize;

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|&a, &b| shares[b].2.cmp(&shares[a].2));
    for &position in by_remainder.iter().take(leftover) {
        shares[position].1 += 1;
    }

    Ok(criteria
        .iter()
        .zip(shares)
        .map(|(criterion, (_, weight, _))| Criterion {
            weight: weight as u32,
            ..criterion.clone()
        })
        .collect())
}
