//! Display-ready metric cards.
//!
//! Pure formatting over growth and confidence results. Nothing here does
//! arithmetic beyond rounding for display.

use serde::Serialize;
use std::fmt;
use stocksight_stats::{
    AdvisoryThresholds, ConfidenceBand, ConfidenceResult, GrowthDirection, GrowthResult,
    StatsResult,
};

use crate::types::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricTrend {
    Up,
    Down,
    Neutral,
}

/// Color token understood by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricColor {
    Success,
    Warning,
    Danger,
}

impl fmt::Display for MetricTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MetricTrend::Up => "up",
            MetricTrend::Down => "down",
            MetricTrend::Neutral => "neutral",
        })
    }
}

impl fmt::Display for MetricColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            MetricColor::Success => "success",
            MetricColor::Warning => "warning",
            MetricColor::Danger => "danger",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryMetric {
    pub title: String,
    pub value: String,
    pub trend: MetricTrend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    pub color: MetricColor,
}

pub const PREDICTED_SALES: &str = "Predicted Sales";
pub const SALES_GROWTH: &str = "Sales Growth";
pub const FORECAST_CONFIDENCE: &str = "Forecast Confidence";
pub const PREDICTED_PROFIT: &str = "Predicted Profit";
pub const PROFIT_MARGIN_TREND: &str = "Profit Margin Trend";
pub const TOP_GROWTH_PRODUCT: &str = "Top Growth Product";

/// Format a whole-dollar amount with comma thousands separators: `$12,345`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let whole = rounded.abs() as u64;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}{}", sign, grouped)
}

/// Signed percentage with one decimal: `+12.3%`, `-4.0%`.
pub fn format_signed_percent(percent: f64) -> String {
    let sign = if percent >= 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, percent)
}

fn favorable(growth: &GrowthResult) -> (MetricTrend, MetricColor) {
    if growth.is_non_negative() {
        (MetricTrend::Up, MetricColor::Success)
    } else {
        (MetricTrend::Down, MetricColor::Danger)
    }
}

/// "Predicted Sales" / "Predicted Profit" card.
pub fn predicted_value_metric(title: &str, current: f64, growth: &GrowthResult) -> SummaryMetric {
    let (trend, color) = favorable(growth);
    SummaryMetric {
        title: title.to_string(),
        value: format_currency(current),
        trend,
        percentage: Some(growth.percent().abs()),
        color,
    }
}

/// "Sales Growth" card: flat counts as up.
pub fn growth_metric(title: &str, growth: &GrowthResult) -> SummaryMetric {
    let (trend, color) = favorable(growth);
    SummaryMetric {
        title: title.to_string(),
        value: format_signed_percent(growth.percent()),
        trend,
        percentage: None,
        color,
    }
}

/// "Profit Margin Trend" card: flat is shown as a neutral warning.
pub fn margin_trend_metric(growth: &GrowthResult) -> SummaryMetric {
    let (trend, color) = match growth.direction {
        GrowthDirection::Up => (MetricTrend::Up, MetricColor::Success),
        GrowthDirection::Down => (MetricTrend::Down, MetricColor::Danger),
        GrowthDirection::Neutral => (MetricTrend::Neutral, MetricColor::Warning),
    };
    SummaryMetric {
        title: PROFIT_MARGIN_TREND.to_string(),
        value: format_signed_percent(growth.percent()),
        trend,
        percentage: None,
        color,
    }
}

/// "Forecast Confidence" card. An undefined confidence is shown as an
/// explicit insufficient-data state instead of a number.
pub fn confidence_metric(
    confidence: &StatsResult<ConfidenceResult>,
    thresholds: &AdvisoryThresholds,
) -> SummaryMetric {
    let (value, trend, color) = match confidence {
        Ok(c) => {
            let (trend, color) = match c.band(thresholds) {
                ConfidenceBand::High => (MetricTrend::Up, MetricColor::Success),
                ConfidenceBand::Medium => (MetricTrend::Neutral, MetricColor::Warning),
                ConfidenceBand::Low => (MetricTrend::Down, MetricColor::Danger),
            };
            (format!("{:.0}%", c.percentage), trend, color)
        }
        Err(e) => {
            log::debug!("confidence unavailable: {}", e);
            (
                "Insufficient data".to_string(),
                MetricTrend::Neutral,
                MetricColor::Warning,
            )
        }
    };
    SummaryMetric {
        title: FORECAST_CONFIDENCE.to_string(),
        value,
        trend,
        percentage: None,
        color,
    }
}

pub fn top_growth_metric(product: &Product) -> SummaryMetric {
    SummaryMetric {
        title: TOP_GROWTH_PRODUCT.to_string(),
        value: product.name.clone(),
        trend: MetricTrend::Up,
        percentage: None,
        color: MetricColor::Success,
    }
}
