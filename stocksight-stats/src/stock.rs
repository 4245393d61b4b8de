//! On-hand stock against a reorder point.
//!
//! An item at or below its reorder point needs reordering now; one within
//! `low_stock_factor` times the point is running low.

use std::fmt;

use serde::Serialize;

use crate::thresholds::AdvisoryThresholds;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    /// `quantity <= reorder_point`
    AtReorderPoint,
    /// `quantity <= reorder_point * low_stock_factor`
    Low,
    Healthy,
}

impl StockLevel {
    pub fn classify(quantity: i64, reorder_point: u32, thresholds: &AdvisoryThresholds) -> Self {
        let quantity = quantity as f64;
        let point = reorder_point as f64;
        if quantity <= point {
            StockLevel::AtReorderPoint
        } else if quantity <= point * thresholds.low_stock_factor {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }

    /// Anything short of healthy.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockLevel::Healthy)
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            StockLevel::AtReorderPoint => "reorder now",
            StockLevel::Low => "low",
            StockLevel::Healthy => "healthy",
        })
    }
}
