use super::super::domain::RankedAlternative;

/// Order by total descending and assign consecutive ranks from 1.
///
/// The sort is stable, so equal totals keep their input order and still get
/// distinct ranks. `total_cmp` keeps the order total even for NaN totals.
pub(crate) fn assign_ranks(mut scored: Vec<RankedAlternative>) -> Vec<RankedAlternative> {
    scored.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    scored
}
