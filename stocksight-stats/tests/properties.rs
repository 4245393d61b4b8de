//! Property tests for stocksight-stats.
//!
//! Validates that:
//! 1. Confidence is always within [0, 100] for any non-empty series
//! 2. Suggested reorder points never drop below 1
//! 3. Growth never fails, whatever the series length
//! 4. Determinism: same inputs always produce the same outputs

use proptest::prelude::*;

use stocksight_stats::confidence;
use stocksight_stats::growth::{self, GrowthDirection};
use stocksight_stats::reorder::{self, GrowthCategory};
use stocksight_stats::series::summarize;
use stocksight_stats::{AdvisoryThresholds, TimeFrame};

fn time_frame() -> impl Strategy<Value = TimeFrame> {
    prop_oneof![
        Just(TimeFrame::Week),
        Just(TimeFrame::Month),
        Just(TimeFrame::Year),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_confidence_is_bounded(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40),
        tf in time_frame()
    ) {
        let c = confidence::score_series(&values, tf, &AdvisoryThresholds::default()).unwrap();
        prop_assert!(c.percentage >= 0.0 && c.percentage <= 100.0);
        prop_assert!(!c.percentage.is_nan());
    }

    #[test]
    fn prop_cv_is_non_negative(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..40)) {
        let s = summarize(&values).unwrap();
        prop_assert!(s.cv >= 0.0);
        prop_assert!(s.variance >= 0.0);
    }

    #[test]
    fn prop_suggestion_never_below_one(
        current in 0u32..10_000,
        historical in 0.0f64..1.0e5,
        predicted in prop::option::of(0.0f64..1.0e5)
    ) {
        let s = reorder::advise(current, historical, predicted, &AdvisoryThresholds::default());
        prop_assert!(s.suggested_point >= 1);
    }

    #[test]
    fn prop_growth_up_never_lowers_point(
        current in 1u32..10_000,
        historical in 1.0f64..1.0e5,
        bump in 0.0f64..2.0
    ) {
        let s = reorder::advise(
            current,
            historical,
            Some(historical * (1.0 + bump)),
            &AdvisoryThresholds::default(),
        );
        prop_assert!(s.category != GrowthCategory::Declining);
        prop_assert!(s.suggested_point >= current);
    }

    #[test]
    fn prop_growth_total_over_any_length(values in prop::collection::vec(-1.0e6f64..1.0e6, 0..5)) {
        let g = growth::analyze(&values);
        prop_assert!(g.rate.is_finite());
        if values.len() < 2 {
            prop_assert_eq!(g.direction, GrowthDirection::Neutral);
        }
    }

    #[test]
    fn prop_components_are_idempotent(
        values in prop::collection::vec(0.0f64..1.0e4, 1..30),
        current in 0u32..500,
        tf in time_frame()
    ) {
        let th = AdvisoryThresholds::default();
        let a = confidence::score_series(&values, tf, &th).unwrap();
        let b = confidence::score_series(&values, tf, &th).unwrap();
        prop_assert_eq!(a.percentage.to_bits(), b.percentage.to_bits());

        prop_assert_eq!(growth::analyze(&values), growth::analyze(&values));

        let half = values.len() / 2;
        let r1 = reorder::advise_series(current, &values[..half], &values[half..], &th);
        let r2 = reorder::advise_series(current, &values[..half], &values[half..], &th);
        prop_assert_eq!(r1, r2);
    }
}

#[test]
fn constant_series_gives_full_monthly_confidence() {
    let s = summarize(&[5.0, 5.0, 5.0, 5.0]).unwrap();
    assert_eq!(s.cv, 0.0);
    let c = confidence::score(s.cv, TimeFrame::Month, 10, &AdvisoryThresholds::default()).unwrap();
    assert_eq!(c.percentage, 100.0);
}

#[test]
fn reorder_examples() {
    let th = AdvisoryThresholds::default();

    let high = reorder::advise(10, 100.0, Some(125.0), &th);
    assert_eq!((high.category, high.suggested_point), (GrowthCategory::HighGrowth, 15));

    let declining = reorder::advise(10, 100.0, Some(80.0), &th);
    assert_eq!((declining.category, declining.suggested_point), (GrowthCategory::Declining, 9));

    let from_zero = reorder::advise(0, 100.0, Some(100.0), &th);
    assert_eq!((from_zero.category, from_zero.suggested_point), (GrowthCategory::Stable, 1));
}

#[test]
fn growth_examples() {
    let up = growth::analyze(&[100.0, 150.0]);
    assert_eq!((up.rate, up.direction), (0.5, GrowthDirection::Up));

    let down = growth::analyze(&[100.0, 0.0]);
    assert_eq!((down.rate, down.direction), (-1.0, GrowthDirection::Down));

    let guarded = growth::analyze(&[0.0, 12.0]);
    assert_eq!(guarded.rate, 0.0);
}
