use super::super::domain::{Alternative, Criterion, CriterionId, ScoreComponent};

pub(crate) fn contribution(raw_score: f64, weight: u32) -> f64 {
    raw_score * f64::from(weight) / 100.0
}

/// First active criterion the alternative has no score for, in criterion order.
pub(crate) fn first_missing<'a>(
    alternative: &Alternative,
    criteria: &'a [Criterion],
) -> Option<&'a CriterionId> {
    criteria
        .iter()
        .map(|criterion| &criterion.id)
        .find(|id| !alternative.scores.contains_key(*id))
}

/// Weighted sum of one alternative across the criteria. Missing scores count as zero.
pub(crate) fn weighted_total(
    alternative: &Alternative,
    criteria: &[Criterion],
) -> (f64, Vec<ScoreComponent>) {
    let mut components = Vec::with_capacity(criteria.len());
    let mut total = 0.0;

    for criterion in criteria {
        let (raw_score, defaulted) = match alternative.score(&criterion.id) {
            Some(score) => (score, false),
            None => (0.0, true),
        };

        let share = contribution(raw_score, criterion.weight);
        total += share;
        components.push(ScoreComponent {
            criterion_id: criterion.id.clone(),
            weight: criterion.weight,
            raw_score,
            contribution: share,
            defaulted,
        });
    }

    (total, components)
}
