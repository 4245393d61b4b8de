//! Reorder-point advice from historical vs. predicted demand.
//!
//! The advisor compares the average of the predicted series against the
//! average of the historical series, buckets the growth into a category and
//! scales the item's current reorder point by that category's multiplier.
//! Output is advisory only; applying it is the inventory store's job.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::series::mean;
use crate::thresholds::AdvisoryThresholds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthCategory {
    HighGrowth,
    ModerateGrowth,
    Stable,
    Declining,
    InsufficientData,
}

impl GrowthCategory {
    /// Phrase used in the suggestion reason ("Based on high growth (...)").
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            GrowthCategory::HighGrowth => "high growth",
            GrowthCategory::ModerateGrowth => "moderate growth",
            GrowthCategory::Stable => "stable demand",
            GrowthCategory::Declining => "declining demand",
            GrowthCategory::InsufficientData => "insufficient forecast data",
        }
    }

    pub fn classify(growth_rate: f64, thresholds: &AdvisoryThresholds) -> Self {
        if growth_rate > thresholds.high_growth_threshold {
            GrowthCategory::HighGrowth
        } else if growth_rate > thresholds.moderate_growth_threshold {
            GrowthCategory::ModerateGrowth
        } else if growth_rate >= 0.0 {
            GrowthCategory::Stable
        } else {
            GrowthCategory::Declining
        }
    }

    /// Multiplier applied to the current reorder point.
    ///
    /// Insufficient data keeps the stable multiplier: with no prediction the
    /// growth rate is zero, which is the stable bucket.
    pub fn multiplier(&self, thresholds: &AdvisoryThresholds) -> f64 {
        match self {
            GrowthCategory::HighGrowth => thresholds.high_growth_multiplier,
            GrowthCategory::ModerateGrowth => thresholds.moderate_growth_multiplier,
            GrowthCategory::Stable | GrowthCategory::InsufficientData => {
                thresholds.stable_multiplier
            }
            GrowthCategory::Declining => thresholds.declining_multiplier,
        }
    }
}

impl fmt::Display for GrowthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthCategory::HighGrowth => write!(f, "High Growth"),
            GrowthCategory::ModerateGrowth => write!(f, "Moderate Growth"),
            GrowthCategory::Stable => write!(f, "Stable"),
            GrowthCategory::Declining => write!(f, "Declining"),
            GrowthCategory::InsufficientData => write!(f, "Insufficient Data"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReorderSuggestion {
    /// Never below 1.
    pub suggested_point: u32,
    pub category: GrowthCategory,
    pub growth_rate_percent: f64,
}

impl ReorderSuggestion {
    /// Human-readable justification, e.g. `Based on high growth (25.0%)`.
    pub fn reason(&self) -> String {
        format!(
            "Based on {} ({:.1}%)",
            self.category.reason_phrase(),
            self.growth_rate_percent
        )
    }
}

/// Advise from precomputed averages.
///
/// `predicted_average` is `None` when the provider returned no prediction
/// points at all; the suggestion then carries `InsufficientData` and a zero
/// growth rate.
pub fn advise(
    current_reorder_point: u32,
    historical_average: f64,
    predicted_average: Option<f64>,
    thresholds: &AdvisoryThresholds,
) -> ReorderSuggestion {
    let (growth_rate, category) = match predicted_average {
        Some(predicted) => {
            let rate = if historical_average > 0.0 && predicted.is_finite() {
                (predicted - historical_average) / historical_average
            } else {
                0.0
            };
            (rate, GrowthCategory::classify(rate, thresholds))
        }
        None => (0.0, GrowthCategory::InsufficientData),
    };

    let current = current_reorder_point as f64;
    let scaled = current * category.multiplier(thresholds);
    let suggested = if category == GrowthCategory::Declining {
        scaled.floor()
    } else {
        scaled.ceil()
    };
    // `as` saturates, so absurd multipliers cannot wrap.
    let suggested_point = (suggested as u32).max(1);

    ReorderSuggestion {
        suggested_point,
        category,
        growth_rate_percent: growth_rate * 100.0,
    }
}

/// Advise from the raw historical and predicted value series.
///
/// An empty historical series averages to zero (no growth computable).
pub fn advise_series(
    current_reorder_point: u32,
    historical: &[f64],
    predicted: &[f64],
    thresholds: &AdvisoryThresholds,
) -> ReorderSuggestion {
    let historical_average = mean(historical).unwrap_or(0.0);
    advise(
        current_reorder_point,
        historical_average,
        mean(predicted),
        thresholds,
    )
}

/// One item's inputs for batch advice.
#[derive(Clone, Debug)]
pub struct ReorderInput<'a> {
    pub current_reorder_point: u32,
    pub historical: &'a [f64],
    pub predicted: &'a [f64],
}

/// Advise a batch of items in parallel. Output order matches input order.
pub fn advise_batch(
    inputs: &[ReorderInput<'_>],
    thresholds: &AdvisoryThresholds,
) -> Vec<ReorderSuggestion> {
    inputs
        .par_iter()
        .map(|input| {
            advise_series(
                input.current_reorder_point,
                input.historical,
                input.predicted,
                thresholds,
            )
        })
        .collect()
}
