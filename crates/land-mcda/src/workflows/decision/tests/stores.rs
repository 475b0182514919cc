use super::common::*;
use crate::workflows::decision::domain::{AlternativeId, CriterionId};
use crate::workflows::decision::{
    AlternativeSet, AlternativeStoreError, CriterionSet, CriterionStoreError, WeightBounds,
    WeightValidationError,
};

#[test]
fn criterion_set_rejects_duplicates_and_oversized_weights() {
    let duplicate = CriterionSet::new(vec![criterion("a", 50), criterion("a", 50)]);
    assert_eq!(
        duplicate,
        Err(CriterionStoreError::DuplicateCriterion(CriterionId::new("a")))
    );

    let oversized = CriterionSet::new(vec![criterion("a", 120)]);
    assert_eq!(
        oversized,
        Err(CriterionStoreError::WeightOutOfRange {
            criterion: CriterionId::new("a"),
            weight: 120,
        })
    );
}

#[test]
fn criterion_set_tracks_weight_total_between_edits() {
    let mut criteria = blueprint().criterion_set().expect("blueprint criteria");
    assert_eq!(criteria.total_weight(), 100);
    assert!(criteria.is_valid_weighting());

    criteria
        .set_weight(&CriterionId::new("social"), 25)
        .expect("weight accepted");

    assert_eq!(criteria.total_weight(), 110);
    assert!(!criteria.is_valid_weighting());
    assert_eq!(
        criteria.validate_weights(),
        Err(WeightValidationError::SumMismatch { total: 110 })
    );
}

#[test]
fn set_weight_reports_unknown_criteria() {
    let mut criteria = blueprint().criterion_set().expect("blueprint criteria");

    let outcome = criteria.set_weight(&CriterionId::new("water"), 10);

    assert_eq!(
        outcome,
        Err(CriterionStoreError::UnknownCriterion(CriterionId::new("water")))
    );
}

#[test]
fn slider_adjustments_respect_bounds_and_step() {
    let mut criteria = blueprint().criterion_set().expect("blueprint criteria");
    let carbon = CriterionId::new("carbon");

    criteria
        .adjust_weight(&carbon, 35, WeightBounds::slider())
        .expect("on step");
    assert_eq!(criteria.get(&carbon).map(|c| c.weight), Some(35));

    assert!(matches!(
        criteria.adjust_weight(&carbon, 37, WeightBounds::slider()),
        Err(CriterionStoreError::WeightOffStep { weight: 37, .. })
    ));
    assert!(matches!(
        criteria.adjust_weight(&carbon, 55, WeightBounds::slider()),
        Err(CriterionStoreError::WeightOffStep { weight: 55, .. })
    ));
    assert!(criteria
        .adjust_weight(&carbon, 0, WeightBounds::default())
        .is_ok());
}

#[test]
fn normalize_rebalances_live_weights() {
    let mut criteria =
        CriterionSet::new(vec![criterion("a", 30), criterion("b", 30), criterion("c", 20)])
            .expect("criteria");

    criteria.normalize().expect("normalizes");

    let weights: Vec<u32> = criteria.iter().map(|c| c.weight).collect();
    assert_eq!(weights, vec![38, 37, 25]);
    assert!(criteria.is_valid_weighting());
}

#[test]
fn criterion_snapshot_is_detached_from_later_edits() {
    let mut criteria = blueprint().criterion_set().expect("blueprint criteria");
    let snapshot = criteria.snapshot();

    criteria
        .set_weight(&CriterionId::new("biodiversity"), 5)
        .expect("weight accepted");

    assert_eq!(snapshot[0].weight, 25);
}

#[test]
fn alternative_set_rejects_out_of_range_scores() {
    let outcome = AlternativeSet::new(vec![alternative("bad", &[("a", 101.0)])]);
    assert!(matches!(
        outcome,
        Err(AlternativeStoreError::ScoreOutOfRange { score, .. }) if score == 101.0
    ));

    let negative = AlternativeSet::new(vec![alternative("bad", &[("a", -1.0)])]);
    assert!(negative.is_err());

    let nan = AlternativeSet::new(vec![alternative("bad", &[("a", f64::NAN)])]);
    assert!(nan.is_err());
}

#[test]
fn alternative_set_rejects_duplicate_ids() {
    let outcome = AlternativeSet::new(vec![alternative("x", &[]), alternative("x", &[])]);

    assert_eq!(
        outcome,
        Err(AlternativeStoreError::DuplicateAlternative(
            AlternativeId::new("x")
        ))
    );
}

#[test]
fn set_score_updates_and_validates() {
    let mut alternatives = blueprint().alternative_set().expect("blueprint alternatives");
    let ecotourism = AlternativeId::new("ecotourism");
    let social = CriterionId::new("social");

    alternatives
        .set_score(&ecotourism, &social, 10.0)
        .expect("score accepted");
    assert_eq!(
        alternatives.get(&ecotourism).and_then(|alt| alt.score(&social)),
        Some(10.0)
    );

    assert!(matches!(
        alternatives.set_score(&ecotourism, &social, 150.0),
        Err(AlternativeStoreError::ScoreOutOfRange { .. })
    ));
    assert_eq!(
        alternatives.set_score(&AlternativeId::new("mining"), &social, 10.0),
        Err(AlternativeStoreError::UnknownAlternative(AlternativeId::new(
            "mining"
        )))
    );
}

#[test]
fn alternatives_report_missing_and_unknown_criteria() {
    let criteria =
        CriterionSet::new(vec![criterion("a", 60), criterion("b", 40)]).expect("criteria");
    let alternatives = AlternativeSet::new(vec![
        alternative("partial", &[("a", 10.0)]),
        alternative("stray", &[("a", 10.0), ("b", 10.0), ("z", 10.0)]),
    ])
    .expect("alternatives");

    assert_eq!(
        alternatives.missing_scores(&criteria),
        vec![(AlternativeId::new("partial"), CriterionId::new("b"))]
    );
    assert_eq!(
        alternatives.unknown_criteria(&criteria),
        vec![(AlternativeId::new("stray"), CriterionId::new("z"))]
    );
    assert_eq!(
        alternatives.ensure_known_criteria(&criteria),
        Err(AlternativeStoreError::UnknownCriterion {
            alternative: AlternativeId::new("stray"),
            criterion: CriterionId::new("z"),
        })
    );
}
