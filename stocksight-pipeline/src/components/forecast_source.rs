use async_trait::async_trait;
use std::collections::HashMap;
use stocksight_stats::{AdvisoryThresholds, FrameLabel, StockLevel};

use crate::forecast_loader::ItemForecast;
use crate::inventory_loader::InventoryRecord;
use crate::source::Source;
use crate::types::{AdvisoryQuery, ItemCandidate};

const NO_FORECAST: &str = "No forecast data available";

/// Joins inventory records with the provider's item forecasts.
///
/// One candidate per requested inventory item. Forecasts are matched by SKU
/// and must be for the query's time frame; an item with no matching
/// forecast still becomes a candidate, flagged with a forecast error.
/// Stock level against the current reorder point is set here so that
/// every candidate carries it, failed forecasts included.
pub struct ForecastSource {
    records: Vec<InventoryRecord>,
    forecasts: Vec<ItemForecast>,
    thresholds: AdvisoryThresholds,
}

impl ForecastSource {
    pub fn new(records: Vec<InventoryRecord>, forecasts: Vec<ItemForecast>) -> Self {
        Self::with_thresholds(records, forecasts, AdvisoryThresholds::default())
    }

    pub fn with_thresholds(
        records: Vec<InventoryRecord>,
        forecasts: Vec<ItemForecast>,
        thresholds: AdvisoryThresholds,
    ) -> Self {
        Self {
            records,
            forecasts,
            thresholds,
        }
    }

    fn join(&self, query: &AdvisoryQuery) -> Vec<ItemCandidate> {
        let time_frame = query.time_frame();
        let by_sku: HashMap<&str, &ItemForecast> = self
            .forecasts
            .iter()
            .filter(|f| f.time_frame.known() == Some(time_frame))
            .map(|f| (f.sku.as_str(), f))
            .collect();
        let unrecognized: HashMap<&str, &str> = self
            .forecasts
            .iter()
            .filter_map(|f| match &f.time_frame {
                FrameLabel::Unrecognized(label) => Some((f.sku.as_str(), label.as_str())),
                FrameLabel::Known(_) => None,
            })
            .collect();

        self.records
            .iter()
            .filter(|r| query.wants_item(&r.item_id))
            .map(|record| {
                let mut candidate = record.to_candidate();
                candidate.stock_level = Some(StockLevel::classify(
                    record.quantity,
                    record.reorder_point,
                    &self.thresholds,
                ));
                let sku = record.sku.as_str();
                match (by_sku.get(sku), unrecognized.get(sku)) {
                    (Some(forecast), _) => match &forecast.error {
                        Some(err) => candidate.forecast_error = Some(err.clone()),
                        None => {
                            candidate.historical = forecast.historical_values();
                            candidate.predicted = forecast.predicted_values();
                        }
                    },
                    (None, Some(label)) => {
                        log::warn!(
                            "request_id={} sku={} forecast has unrecognized time frame '{}'",
                            query.request_id,
                            sku,
                            label
                        );
                        candidate.forecast_error = Some(format!("Unsupported time frame '{}'", label));
                    }
                    (None, None) => {
                        log::debug!(
                            "request_id={} sku={} has no {} forecast",
                            query.request_id,
                            sku,
                            time_frame
                        );
                        candidate.forecast_error = Some(NO_FORECAST.to_string());
                    }
                }
                candidate
            })
            .collect()
    }
}

#[async_trait]
impl Source<AdvisoryQuery, ItemCandidate> for ForecastSource {
    fn enable(&self, _query: &AdvisoryQuery) -> bool {
        !self.records.is_empty()
    }

    async fn get_candidates(&self, query: &AdvisoryQuery) -> Result<Vec<ItemCandidate>, String> {
        Ok(self.join(query))
    }
}
