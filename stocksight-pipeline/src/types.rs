use serde::{Deserialize, Serialize};
use stocksight_stats::{GrowthResult, ReorderSuggestion, StockLevel, TimeFrame};

use crate::candidate_pipeline::HasRequestId;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Request for reorder advice over (a subset of) the inventory.
#[derive(Clone, Debug, Default)]
pub struct AdvisoryQuery {
    pub request_id: String,
    /// Filled in by `TimeFrameQueryHydrator` when the caller leaves it unset.
    pub time_frame: Option<TimeFrame>,
    /// Restrict advice to these item IDs. Empty means every item.
    pub item_ids: Vec<String>,
}

impl AdvisoryQuery {
    pub fn time_frame(&self) -> TimeFrame {
        self.time_frame.unwrap_or_default()
    }

    pub fn wants_item(&self, item_id: &str) -> bool {
        self.item_ids.is_empty() || self.item_ids.iter().any(|id| id == item_id)
    }
}

impl HasRequestId for AdvisoryQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// One inventory item moving through the advisory pipeline.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ItemCandidate {
    pub item_id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub current_reorder_point: u32,
    /// Units on hand.
    pub quantity: i64,
    /// On-hand stock against the current reorder point.
    pub stock_level: Option<StockLevel>,

    /// Actual values, oldest first, for the query's time frame.
    pub historical: Vec<f64>,
    /// Forecast values, oldest first, for the query's time frame.
    pub predicted: Vec<f64>,
    /// Set when the provider failed or had nothing for this item.
    pub forecast_error: Option<String>,

    // Hydrated fields
    pub confidence: Option<f64>,
    pub next_period_growth: Option<GrowthResult>,

    // Scoring fields
    pub suggestion: Option<ReorderSuggestion>,
    pub priority_score: Option<f64>,
    /// On-hand stock against the suggested reorder point.
    pub suggested_stock_level: Option<StockLevel>,
}

impl ItemCandidate {
    /// Reason shown next to the suggestion.
    pub fn reason(&self) -> String {
        match (&self.suggestion, &self.forecast_error) {
            (Some(s), _) => s.reason(),
            (None, Some(_)) => "Unable to calculate suggestion".to_string(),
            (None, None) => String::new(),
        }
    }

    /// Reorder point to display: the suggestion, or the current point when
    /// no suggestion could be made.
    pub fn effective_reorder_point(&self) -> u32 {
        self.suggestion
            .as_ref()
            .map(|s| s.suggested_point)
            .unwrap_or(self.current_reorder_point)
    }
}

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

/// A product from the provider's top-products feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub sku: String,
    #[serde(rename = "predicted_increase")]
    pub predicted_increase_percent: f64,
}
