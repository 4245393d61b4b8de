use async_trait::async_trait;
use std::sync::Arc;

use stocksight_stats::AdvisoryThresholds;

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::advisory_log_side_effect::AdvisoryLogSideEffect;
use crate::components::forecast_error_filter::ForecastErrorFilter;
use crate::components::forecast_source::ForecastSource;
use crate::components::reorder_point_scorer::ReorderPointScorer;
use crate::components::series_stats_hydrator::SeriesStatsHydrator;
use crate::components::time_frame_query_hydrator::TimeFrameQueryHydrator;
use crate::components::top_growth_selector::TopGrowthSelector;
use crate::filter::Filter;
use crate::forecast_loader::ItemForecast;
use crate::hydrator::Hydrator;
use crate::inventory_loader::InventoryRecord;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::source::Source;
use crate::types::{AdvisoryQuery, ItemCandidate};

/// Reorder-point advice for the inventory.
///
/// Pipeline flow:
/// 1. TimeFrameQueryHydrator defaults the time frame to weekly
/// 2. ForecastSource joins inventory records with item forecasts and
///    grades stock on hand against the current reorder point
/// 3. SeriesStatsHydrator attaches confidence and next-period growth
/// 4. ForecastErrorFilter sets aside items without a usable forecast
/// 5. ReorderPointScorer computes each suggestion and re-grades stock
///    against it
/// 6. TopGrowthSelector keeps the fastest-growing N
/// 7. AdvisoryLogSideEffect logs the result
pub struct ReorderAdvisoryPipeline {
    query_hydrators: Vec<Box<dyn QueryHydrator<AdvisoryQuery>>>,
    sources: Vec<Box<dyn Source<AdvisoryQuery, ItemCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<AdvisoryQuery, ItemCandidate>>>,
    filters: Vec<Box<dyn Filter<AdvisoryQuery, ItemCandidate>>>,
    scorers: Vec<Box<dyn Scorer<AdvisoryQuery, ItemCandidate>>>,
    selector: TopGrowthSelector,
    side_effects: Arc<Vec<Box<dyn SideEffect<AdvisoryQuery, ItemCandidate>>>>,
    result_size: usize,
}

impl ReorderAdvisoryPipeline {
    /// Pipeline with default thresholds returning the top 5 items.
    pub fn new(records: Vec<InventoryRecord>, forecasts: Vec<ItemForecast>) -> Self {
        Self::with_config(records, forecasts, AdvisoryThresholds::default(), 5)
    }

    pub fn with_config(
        records: Vec<InventoryRecord>,
        forecasts: Vec<ItemForecast>,
        thresholds: AdvisoryThresholds,
        result_size: usize,
    ) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<AdvisoryQuery>>> =
            vec![Box::new(TimeFrameQueryHydrator::new())];

        let sources: Vec<Box<dyn Source<AdvisoryQuery, ItemCandidate>>> =
            vec![Box::new(ForecastSource::with_thresholds(
                records,
                forecasts,
                thresholds.clone(),
            ))];

        let hydrators: Vec<Box<dyn Hydrator<AdvisoryQuery, ItemCandidate>>> =
            vec![Box::new(SeriesStatsHydrator::new(thresholds.clone()))];

        let filters: Vec<Box<dyn Filter<AdvisoryQuery, ItemCandidate>>> =
            vec![Box::new(ForecastErrorFilter)];

        let scorers: Vec<Box<dyn Scorer<AdvisoryQuery, ItemCandidate>>> =
            vec![Box::new(ReorderPointScorer::new(thresholds))];

        let side_effects: Arc<Vec<Box<dyn SideEffect<AdvisoryQuery, ItemCandidate>>>> =
            Arc::new(vec![Box::new(AdvisoryLogSideEffect)]);

        Self {
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector: TopGrowthSelector { k: result_size },
            side_effects,
            result_size,
        }
    }
}

#[async_trait]
impl CandidatePipeline<AdvisoryQuery, ItemCandidate> for ReorderAdvisoryPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<AdvisoryQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<AdvisoryQuery, ItemCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<AdvisoryQuery, ItemCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<AdvisoryQuery, ItemCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<AdvisoryQuery, ItemCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<AdvisoryQuery, ItemCandidate> {
        &self.selector
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<AdvisoryQuery, ItemCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        self.result_size
    }
}
