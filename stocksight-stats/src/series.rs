//! Summary statistics over a historical series.

use serde::Serialize;

use crate::error::{StatsError, StatsResult};

/// Mean, population variance and coefficient of variation of a series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub mean: f64,
    /// Population variance (divides by n, not n - 1).
    pub variance: f64,
    /// `stddev / mean` when the mean is positive, otherwise 1.0.
    pub cv: f64,
    pub sample_count: usize,
}

/// Summarize a historical series.
///
/// The trailing prediction point, if the provider appended one, must be
/// stripped by the caller first. A non-positive mean yields `cv = 1.0`
/// (maximal uncertainty) rather than an error.
pub fn summarize(values: &[f64]) -> StatsResult<SeriesSummary> {
    if values.is_empty() {
        return Err(StatsError::invalid("cannot summarize an empty series"));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(StatsError::invalid(format!(
            "series value at index {} is not finite",
            pos
        )));
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = if mean > 0.0 {
        variance.sqrt() / mean
    } else {
        1.0
    };

    Ok(SeriesSummary {
        mean,
        variance,
        cv,
        sample_count: values.len(),
    })
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
