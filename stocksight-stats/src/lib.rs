//! Numeric core of the StockSight advisory engine.
//!
//! Everything here is a pure function of its inputs: no I/O, no clocks,
//! no randomness. Identical inputs always produce identical outputs.

pub mod confidence;
pub mod error;
pub mod growth;
pub mod reorder;
pub mod series;
pub mod stock;
pub mod thresholds;
pub mod time_frame;

pub use confidence::{ConfidenceBand, ConfidenceResult};
pub use error::{StatsError, StatsResult};
pub use growth::{GrowthDirection, GrowthResult};
pub use reorder::{GrowthCategory, ReorderInput, ReorderSuggestion};
pub use series::SeriesSummary;
pub use stock::StockLevel;
pub use thresholds::AdvisoryThresholds;
pub use time_frame::{FrameLabel, TimeFrame};
