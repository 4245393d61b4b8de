//! Centralized advisory thresholds.
//!
//! The constants below are the calibrated defaults. `AdvisoryThresholds`
//! bundles them into one structure so a deployment can override any of
//! them from a config file and tests can target each boundary by name.

use serde::{Deserialize, Serialize};

use crate::time_frame::{FrameLabel, TimeFrame};

/// Growth above this fraction is classified as high growth.
pub const HIGH_GROWTH_THRESHOLD: f64 = 0.20;

/// Growth above this fraction (and up to the high cutoff) is moderate growth.
pub const MODERATE_GROWTH_THRESHOLD: f64 = 0.05;

/// Reorder-point multiplier for high-growth items.
pub const HIGH_GROWTH_MULTIPLIER: f64 = 1.50;

/// Reorder-point multiplier for moderate-growth items.
pub const MODERATE_GROWTH_MULTIPLIER: f64 = 1.20;

/// Reorder-point multiplier for stable items (and items without predictions).
pub const STABLE_MULTIPLIER: f64 = 1.05;

/// Reorder-point multiplier for declining items. Rounded down, not up.
pub const DECLINING_MULTIPLIER: f64 = 0.90;

/// CV scaling factor for weekly data. Weekly data is noisy, so variability
/// is penalized least.
pub const WEEK_SCALING_FACTOR: f64 = 3.0;

/// CV scaling factor for monthly data.
pub const MONTH_SCALING_FACTOR: f64 = 5.0;

/// CV scaling factor for yearly data. Yearly aggregates should be smooth,
/// so variability there is penalized most.
pub const YEAR_SCALING_FACTOR: f64 = 8.0;

/// CV scaling factor for time-frame labels that are not recognized.
pub const DEFAULT_SCALING_FACTOR: f64 = 5.0;

/// Sample count at which the CV penalty reaches full weight.
pub const FULL_WEIGHT_SAMPLES: f64 = 10.0;

/// Confidence above this is shown as favorable.
pub const HIGH_CONFIDENCE_BAND: f64 = 70.0;

/// Confidence above this (and up to the high band) is shown as a warning.
pub const MEDIUM_CONFIDENCE_BAND: f64 = 40.0;

/// On-hand quantity up to this multiple of the reorder point counts as low stock.
pub const LOW_STOCK_FACTOR: f64 = 2.0;

/// Every tunable number used by the advisory engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryThresholds {
    pub high_growth_threshold: f64,
    pub moderate_growth_threshold: f64,
    pub high_growth_multiplier: f64,
    pub moderate_growth_multiplier: f64,
    pub stable_multiplier: f64,
    pub declining_multiplier: f64,
    pub week_scaling_factor: f64,
    pub month_scaling_factor: f64,
    pub year_scaling_factor: f64,
    pub default_scaling_factor: f64,
    pub full_weight_samples: f64,
    pub high_confidence_band: f64,
    pub medium_confidence_band: f64,
    pub low_stock_factor: f64,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            high_growth_threshold: HIGH_GROWTH_THRESHOLD,
            moderate_growth_threshold: MODERATE_GROWTH_THRESHOLD,
            high_growth_multiplier: HIGH_GROWTH_MULTIPLIER,
            moderate_growth_multiplier: MODERATE_GROWTH_MULTIPLIER,
            stable_multiplier: STABLE_MULTIPLIER,
            declining_multiplier: DECLINING_MULTIPLIER,
            week_scaling_factor: WEEK_SCALING_FACTOR,
            month_scaling_factor: MONTH_SCALING_FACTOR,
            year_scaling_factor: YEAR_SCALING_FACTOR,
            default_scaling_factor: DEFAULT_SCALING_FACTOR,
            full_weight_samples: FULL_WEIGHT_SAMPLES,
            high_confidence_band: HIGH_CONFIDENCE_BAND,
            medium_confidence_band: MEDIUM_CONFIDENCE_BAND,
            low_stock_factor: LOW_STOCK_FACTOR,
        }
    }
}

impl AdvisoryThresholds {
    pub fn scaling_factor(&self, time_frame: TimeFrame) -> f64 {
        match time_frame {
            TimeFrame::Week => self.week_scaling_factor,
            TimeFrame::Month => self.month_scaling_factor,
            TimeFrame::Year => self.year_scaling_factor,
        }
    }

    /// Scaling factor for a raw time-frame label; unrecognized labels get
    /// the default factor instead of an error.
    pub fn scaling_factor_for_label(&self, label: &str) -> f64 {
        match label.parse::<TimeFrame>() {
            Ok(tf) => self.scaling_factor(tf),
            Err(_) => {
                log::debug!("unrecognized time frame '{}', using default scaling", label);
                self.default_scaling_factor
            }
        }
    }

    /// Scaling factor for a document's own time-frame label.
    pub fn scaling_factor_for_frame(&self, label: &FrameLabel) -> f64 {
        match label {
            FrameLabel::Known(tf) => self.scaling_factor(*tf),
            FrameLabel::Unrecognized(raw) => self.scaling_factor_for_label(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_table_matches_constants() {
        let t = AdvisoryThresholds::default();
        assert_eq!(t.scaling_factor(TimeFrame::Week), 3.0);
        assert_eq!(t.scaling_factor(TimeFrame::Month), 5.0);
        assert_eq!(t.scaling_factor(TimeFrame::Year), 8.0);
    }

    #[test]
    fn unknown_label_falls_back_to_default() {
        let t = AdvisoryThresholds::default();
        assert_eq!(t.scaling_factor_for_label("quarter"), 5.0);
        assert_eq!(t.scaling_factor_for_label("year"), 8.0);
        assert_eq!(
            t.scaling_factor_for_frame(&FrameLabel::Unrecognized("quarter".into())),
            5.0
        );
        assert_eq!(t.scaling_factor_for_frame(&FrameLabel::Known(TimeFrame::Week)), 3.0);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let t: AdvisoryThresholds =
            serde_json::from_str(r#"{ "high_growth_threshold": 0.3 }"#).unwrap();
        assert_eq!(t.high_growth_threshold, 0.3);
        assert_eq!(t.moderate_growth_threshold, MODERATE_GROWTH_THRESHOLD);
        assert_eq!(t.year_scaling_factor, YEAR_SCALING_FACTOR);
    }
}
