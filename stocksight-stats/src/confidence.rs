//! Forecast confidence scoring.
//!
//! Higher relative variability erodes confidence. The erosion is scaled per
//! time frame and down-weighted while few samples are available:
//!
//! ```text
//! data_point_factor = min(1, samples / full_weight_samples)
//! raw = 100 - (cv * scaling_factor * 100) * data_point_factor
//! confidence = clamp(raw, 0, 100)
//! ```

use serde::Serialize;

use crate::error::{StatsError, StatsResult};
use crate::series::{summarize, SeriesSummary};
use crate::thresholds::AdvisoryThresholds;
use crate::time_frame::TimeFrame;

/// Bounded confidence percentage in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConfidenceResult {
    pub percentage: f64,
}

/// Coarse band used by presentation to pick an arrow and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceResult {
    pub fn band(&self, thresholds: &AdvisoryThresholds) -> ConfidenceBand {
        if self.percentage > thresholds.high_confidence_band {
            ConfidenceBand::High
        } else if self.percentage > thresholds.medium_confidence_band {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Score confidence from a CV and an explicit scaling factor.
///
/// A zero sample count is rejected: with no evidence the formula would
/// report full confidence.
pub fn score_with_scaling(
    cv: f64,
    scaling_factor: f64,
    sample_count: usize,
    thresholds: &AdvisoryThresholds,
) -> StatsResult<ConfidenceResult> {
    if sample_count == 0 {
        return Err(StatsError::invalid(
            "confidence requires at least one historical sample",
        ));
    }

    let data_point_factor = (sample_count as f64 / thresholds.full_weight_samples).min(1.0);
    let raw = 100.0 - (cv * scaling_factor * 100.0) * data_point_factor;
    // NaN only arises from overflowing inputs; report no confidence.
    let percentage = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };

    Ok(ConfidenceResult { percentage })
}

/// Score confidence for a time frame.
pub fn score(
    cv: f64,
    time_frame: TimeFrame,
    sample_count: usize,
    thresholds: &AdvisoryThresholds,
) -> StatsResult<ConfidenceResult> {
    score_with_scaling(cv, thresholds.scaling_factor(time_frame), sample_count, thresholds)
}

/// Score confidence from an already computed summary.
pub fn score_summary(
    summary: &SeriesSummary,
    time_frame: TimeFrame,
    thresholds: &AdvisoryThresholds,
) -> StatsResult<ConfidenceResult> {
    score(summary.cv, time_frame, summary.sample_count, thresholds)
}

/// Summarize a historical series and score it in one step.
pub fn score_series(
    historical: &[f64],
    time_frame: TimeFrame,
    thresholds: &AdvisoryThresholds,
) -> StatsResult<ConfidenceResult> {
    let summary = summarize(historical)?;
    score_summary(&summary, time_frame, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> AdvisoryThresholds {
        AdvisoryThresholds::default()
    }

    #[test]
    fn zero_cv_is_full_confidence() {
        let c = score(0.0, TimeFrame::Month, 10, &t()).unwrap();
        assert_eq!(c.percentage, 100.0);
    }

    #[test]
    fn constant_series_scores_full_confidence() {
        let c = score_series(&[5.0; 10], TimeFrame::Month, &t()).unwrap();
        assert_eq!(c.percentage, 100.0);
    }

    #[test]
    fn penalty_scales_with_time_frame() {
        // cv 0.1 at full weight: week 70, month 50, year 20
        let week = score(0.1, TimeFrame::Week, 10, &t()).unwrap().percentage;
        let month = score(0.1, TimeFrame::Month, 10, &t()).unwrap().percentage;
        let year = score(0.1, TimeFrame::Year, 10, &t()).unwrap().percentage;
        assert!((week - 70.0).abs() < 1e-9);
        assert!((month - 50.0).abs() < 1e-9);
        assert!((year - 20.0).abs() < 1e-9);
    }

    #[test]
    fn few_samples_soften_the_penalty() {
        // 5 samples -> factor 0.5: 100 - 0.1*5*100*0.5 = 75
        let c = score(0.1, TimeFrame::Month, 5, &t()).unwrap();
        assert!((c.percentage - 75.0).abs() < 1e-9);
        // beyond 10 samples the factor saturates at 1
        let c = score(0.1, TimeFrame::Month, 40, &t()).unwrap();
        assert!((c.percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn result_is_clamped_at_zero() {
        let c = score(1.0, TimeFrame::Year, 12, &t()).unwrap();
        assert_eq!(c.percentage, 0.0);
    }

    #[test]
    fn zero_samples_are_rejected() {
        assert!(matches!(
            score(1.0, TimeFrame::Week, 0, &t()),
            Err(StatsError::InvalidInput(_))
        ));
    }

    #[test]
    fn nan_cv_reports_no_confidence() {
        let c = score(f64::NAN, TimeFrame::Week, 3, &t()).unwrap();
        assert_eq!(c.percentage, 0.0);
    }

    #[test]
    fn bands_follow_display_thresholds() {
        let th = t();
        assert_eq!(ConfidenceResult { percentage: 71.0 }.band(&th), ConfidenceBand::High);
        assert_eq!(ConfidenceResult { percentage: 70.0 }.band(&th), ConfidenceBand::Medium);
        assert_eq!(ConfidenceResult { percentage: 40.0 }.band(&th), ConfidenceBand::Low);
    }
}
