//! Forecast provider documents.
//!
//! The provider keys every point by time-frame-specific field names
//! (`week_number` / `total_sales_in_week`, ...), so points are kept as raw
//! JSON objects and values are pulled out with `TimeFrame`'s field names.
//! Confidence-interval fields are passed through untouched.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stocksight_stats::{confidence, growth, series};
use stocksight_stats::{
    AdvisoryThresholds, ConfidenceResult, FrameLabel, GrowthResult, StatsResult, TimeFrame,
};

use crate::dashboard::{Availability, DashboardInputs};
use crate::error::{LoadError, LoadResult};
use crate::types::Product;

/// A single provider point, e.g.
/// `{"year": 2024, "week_number": 12, "total_sales_in_week": 310.5}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastPoint(pub Map<String, Value>);

impl ForecastPoint {
    pub fn number(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }

    /// Field rendered as a label: strings verbatim, numbers via Display.
    pub fn label(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn value(&self, time_frame: TimeFrame) -> Option<f64> {
        self.number(time_frame.value_field())
    }
}

/// Per-item forecast as returned by the provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemForecast {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub category: String,
    /// An unrecognized label keeps the rest of the bundle loadable; such
    /// an item yields no values.
    #[serde(default)]
    pub time_frame: FrameLabel,
    #[serde(default)]
    pub historical_data: Vec<ForecastPoint>,
    #[serde(default)]
    pub prediction_data: Vec<ForecastPoint>,
    #[serde(default)]
    pub has_confidence_intervals: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ItemForecast {
    pub fn historical_values(&self) -> Vec<f64> {
        extract_values(&self.historical_data, &self.time_frame, &self.sku, "historical")
    }

    pub fn predicted_values(&self) -> Vec<f64> {
        extract_values(&self.prediction_data, &self.time_frame, &self.sku, "prediction")
    }
}

fn extract_values(points: &[ForecastPoint], label: &FrameLabel, sku: &str, kind: &str) -> Vec<f64> {
    let Some(time_frame) = label.known() else {
        if !points.is_empty() {
            log::warn!("sku={} has unrecognized time frame '{}', ignoring {} data", sku, label, kind);
        }
        return Vec::new();
    };
    let field = time_frame.value_field();
    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let v = p.value(time_frame);
            if v.is_none() {
                log::warn!("sku={} {} point {} has no '{}' value, skipping", sku, kind, i, field);
            }
            v
        })
        .collect()
}

/// Total sales or total profits: past periods followed by one prediction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalSeries {
    #[serde(default)]
    pub labels: Vec<Value>,
    #[serde(default)]
    pub values: Vec<f64>,
    /// Granularity the provider says the series is in. When absent the
    /// dashboard's selected time frame applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_frame: Option<FrameLabel>,
}

impl TotalSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            labels: Vec::new(),
            values,
            time_frame: None,
        }
    }

    /// The latest value, i.e. the prediction.
    pub fn current(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Every value except the trailing prediction.
    pub fn historical(&self) -> &[f64] {
        match self.values.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    pub fn growth(&self) -> GrowthResult {
        growth::analyze(&self.values)
    }

    /// Confidence in the prediction, judged from the historical part.
    pub fn confidence(
        &self,
        time_frame: TimeFrame,
        thresholds: &AdvisoryThresholds,
    ) -> StatsResult<ConfidenceResult> {
        let summary = series::summarize(self.historical())?;
        let scaling_factor = match &self.time_frame {
            Some(label) => thresholds.scaling_factor_for_frame(label),
            None => thresholds.scaling_factor(time_frame),
        };
        confidence::score_with_scaling(summary.cv, scaling_factor, summary.sample_count, thresholds)
    }
}

/// Everything the provider returned for one dashboard render, in one file.
/// Absent members were not (or not yet) delivered.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ForecastBundle {
    #[serde(default)]
    pub items: Vec<ItemForecast>,
    #[serde(default)]
    pub total_sales: Option<TotalSeries>,
    #[serde(default)]
    pub total_profits: Option<TotalSeries>,
    #[serde(default)]
    pub top_products: Option<Vec<Product>>,
}

impl ForecastBundle {
    /// Snapshot of the dashboard inputs this bundle makes available.
    pub fn dashboard_inputs(&self) -> DashboardInputs {
        DashboardInputs {
            sales: Availability::from(self.total_sales.clone()),
            profits: Availability::from(self.total_profits.clone()),
            top_products: Availability::from(self.top_products.clone()),
        }
    }
}

pub fn load_bundle<R: Read>(reader: R) -> LoadResult<ForecastBundle> {
    let bundle: ForecastBundle = serde_json::from_reader(reader)?;
    log::debug!(
        "loaded forecast bundle: {} items, sales={}, profits={}, top_products={}",
        bundle.items.len(),
        bundle.total_sales.is_some(),
        bundle.total_profits.is_some(),
        bundle.top_products.is_some()
    );
    Ok(bundle)
}

pub fn load_bundle_file(path: &str) -> LoadResult<ForecastBundle> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    load_bundle(std::io::BufReader::new(file))
}
