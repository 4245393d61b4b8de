//! Period-over-period growth of a series.

use std::fmt;

use serde::Serialize;

/// Which way the latest period moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GrowthDirection {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for GrowthDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrowthDirection::Up => write!(f, "up"),
            GrowthDirection::Down => write!(f, "down"),
            GrowthDirection::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GrowthResult {
    /// Fractional change, not a percentage.
    pub rate: f64,
    pub direction: GrowthDirection,
}

impl GrowthResult {
    pub fn from_rate(rate: f64) -> Self {
        let direction = if rate > 0.0 {
            GrowthDirection::Up
        } else if rate < 0.0 {
            GrowthDirection::Down
        } else {
            GrowthDirection::Neutral
        };
        Self { rate, direction }
    }

    pub fn percent(&self) -> f64 {
        self.rate * 100.0
    }

    /// True for flat or rising series.
    pub fn is_non_negative(&self) -> bool {
        self.rate >= 0.0
    }
}

/// Growth of the last value over the one immediately before it.
///
/// Fewer than two points, or a zero (or non-finite) previous value, yield
/// a neutral zero rate rather than an error.
pub fn analyze(values: &[f64]) -> GrowthResult {
    let current = values.last().copied().unwrap_or(0.0);
    let previous = if values.len() >= 2 {
        values[values.len() - 2]
    } else {
        0.0
    };
    between(previous, current)
}

/// Growth from `previous` to `current`.
pub fn between(previous: f64, current: f64) -> GrowthResult {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return GrowthResult::from_rate(0.0);
    }
    GrowthResult::from_rate((current - previous) / previous)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_percent_rise() {
        let g = analyze(&[100.0, 150.0]);
        assert_eq!(g.rate, 0.5);
        assert_eq!(g.direction, GrowthDirection::Up);
        assert_eq!(g.percent(), 50.0);
    }

    #[test]
    fn drop_to_zero_is_full_decline() {
        let g = analyze(&[100.0, 0.0]);
        assert_eq!(g.rate, -1.0);
        assert_eq!(g.direction, GrowthDirection::Down);
    }

    #[test]
    fn zero_previous_is_guarded() {
        let g = analyze(&[0.0, 40.0]);
        assert_eq!(g.rate, 0.0);
        assert_eq!(g.direction, GrowthDirection::Neutral);
    }

    #[test]
    fn only_last_two_points_matter() {
        let g = analyze(&[1.0, 999.0, 200.0, 100.0]);
        assert_eq!(g.rate, -0.5);
    }

    #[test]
    fn short_series_is_neutral() {
        assert_eq!(analyze(&[]), GrowthResult::from_rate(0.0));
        let g = analyze(&[75.0]);
        assert_eq!(g.rate, 0.0);
        assert_eq!(g.direction, GrowthDirection::Neutral);
    }

    #[test]
    fn flat_series_is_neutral() {
        assert_eq!(analyze(&[10.0, 10.0]).direction, GrowthDirection::Neutral);
    }

    #[test]
    fn negative_previous_keeps_sign_of_formula() {
        // (-50 - -100) / -100 = -0.5
        let g = analyze(&[-100.0, -50.0]);
        assert_eq!(g.rate, -0.5);
        assert_eq!(g.direction, GrowthDirection::Down);
    }
}
