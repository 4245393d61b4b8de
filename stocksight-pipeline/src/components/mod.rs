pub mod advisory_log_side_effect;
pub mod forecast_error_filter;
pub mod forecast_source;
pub mod reorder_point_scorer;
pub mod series_stats_hydrator;
pub mod time_frame_query_hydrator;
pub mod top_growth_selector;
