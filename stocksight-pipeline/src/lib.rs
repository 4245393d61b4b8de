//! Reorder advisory pipeline and forecast dashboard for StockSight.
//!
//! Loads provider forecasts and inventory, runs them through a staged
//! candidate pipeline backed by `stocksight-stats`, and turns dashboard
//! series into display-ready metric cards.

pub mod candidate_pipeline;
pub mod chart;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod forecast_loader;
pub mod hydrator;
pub mod inventory_loader;
pub mod metrics;
pub mod pipelines;
pub mod query_hydrator;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod source;
pub mod types;
pub mod util;

pub use candidate_pipeline::{CandidatePipeline, PipelineResult};
pub use dashboard::{Availability, DashboardInputs, DashboardMetrics};
pub use error::{LoadError, LoadResult};
pub use pipelines::reorder_advisory::ReorderAdvisoryPipeline;
pub use types::{AdvisoryQuery, ItemCandidate, Product};
