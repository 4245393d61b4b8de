//! Forecast dashboard metrics.
//!
//! The three dashboard inputs (sales series, profit series, top products)
//! arrive independently and in any order. Instead of patching a previously
//! emitted metric list as each one lands, callers keep a snapshot of what
//! is available and `reduce` recomputes the whole metric set from it. Same
//! snapshot, same output, regardless of arrival order.

use serde::Serialize;
use stocksight_stats::{AdvisoryThresholds, TimeFrame};

use crate::components::top_growth_selector::{rank_products, select_top_growth};
use crate::forecast_loader::TotalSeries;
use crate::metrics::{self, SummaryMetric};
use crate::types::Product;

/// Number of products listed under "Top Products".
pub const TOP_PRODUCTS_SHOWN: usize = 5;

/// Whether an input has been delivered yet.
#[derive(Clone, Debug, PartialEq)]
pub enum Availability<T> {
    NotLoaded,
    Loaded(T),
}

impl<T> Default for Availability<T> {
    fn default() -> Self {
        Availability::NotLoaded
    }
}

impl<T> Availability<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Availability::Loaded(_))
    }

    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Availability::Loaded(v) => Some(v),
            Availability::NotLoaded => None,
        }
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Availability::Loaded(v),
            None => Availability::NotLoaded,
        }
    }
}

/// Snapshot of every dashboard input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardInputs {
    pub sales: Availability<TotalSeries>,
    pub profits: Availability<TotalSeries>,
    pub top_products: Availability<Vec<Product>>,
}

impl DashboardInputs {
    pub fn with_sales(self, sales: TotalSeries) -> Self {
        Self {
            sales: Availability::Loaded(sales),
            ..self
        }
    }

    pub fn with_profits(self, profits: TotalSeries) -> Self {
        Self {
            profits: Availability::Loaded(profits),
            ..self
        }
    }

    pub fn with_top_products(self, products: Vec<Product>) -> Self {
        Self {
            top_products: Availability::Loaded(products),
            ..self
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub sales: Vec<SummaryMetric>,
    pub profit: Vec<SummaryMetric>,
    /// Highest predicted increase first.
    pub top_products: Vec<Product>,
}

/// Recompute every dashboard metric from the available inputs.
pub fn reduce(
    inputs: &DashboardInputs,
    time_frame: TimeFrame,
    thresholds: &AdvisoryThresholds,
) -> DashboardMetrics {
    let mut out = DashboardMetrics::default();

    if let Some(sales) = inputs.sales.as_loaded() {
        if let Some(current) = sales.current() {
            let growth = sales.growth();
            out.sales = vec![
                metrics::predicted_value_metric(metrics::PREDICTED_SALES, current, &growth),
                metrics::growth_metric(metrics::SALES_GROWTH, &growth),
                metrics::confidence_metric(&sales.confidence(time_frame, thresholds), thresholds),
            ];
        }
    }

    if let Some(profits) = inputs.profits.as_loaded() {
        if let Some(current) = profits.current() {
            let growth = profits.growth();
            out.profit = vec![
                metrics::predicted_value_metric(metrics::PREDICTED_PROFIT, current, &growth),
                metrics::margin_trend_metric(&growth),
            ];
        }
    }

    if let Some(products) = inputs.top_products.as_loaded() {
        if let Ok(top) = select_top_growth(products) {
            out.profit.push(metrics::top_growth_metric(top));
        }
        out.top_products = rank_products(products, TOP_PRODUCTS_SHOWN);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricColor, MetricTrend};

    fn products() -> Vec<Product> {
        vec![
            Product {
                name: "Hammer".into(),
                sku: "HMR-100".into(),
                predicted_increase_percent: 5.0,
            },
            Product {
                name: "Drill".into(),
                sku: "DRL-900".into(),
                predicted_increase_percent: 9.0,
            },
            Product {
                name: "Gloves".into(),
                sku: "GLV-010".into(),
                predicted_increase_percent: 9.0,
            },
        ]
    }

    fn th() -> AdvisoryThresholds {
        AdvisoryThresholds::default()
    }

    #[test]
    fn nothing_loaded_yields_no_metrics() {
        let m = reduce(&DashboardInputs::default(), TimeFrame::Week, &th());
        assert!(m.sales.is_empty());
        assert!(m.profit.is_empty());
        assert!(m.top_products.is_empty());
    }

    #[test]
    fn sales_metrics_from_series() {
        let inputs =
            DashboardInputs::default().with_sales(TotalSeries::new(vec![1000.0, 1000.0, 1200.0]));
        let m = reduce(&inputs, TimeFrame::Week, &th());
        assert_eq!(m.sales.len(), 3);
        assert_eq!(m.sales[0].value, "$1,200");
        assert_eq!(m.sales[1].value, "+20.0%");
        // historical [1000, 1000] has zero CV
        assert_eq!(m.sales[2].value, "100%");
        assert_eq!(m.sales[2].color, MetricColor::Success);
    }

    #[test]
    fn empty_sales_series_is_skipped() {
        let inputs = DashboardInputs::default().with_sales(TotalSeries::new(vec![]));
        assert!(reduce(&inputs, TimeFrame::Week, &th()).sales.is_empty());
    }

    #[test]
    fn top_growth_product_appears_once_whatever_the_order() {
        let profits = TotalSeries::new(vec![500.0, 450.0]);

        let products_first = DashboardInputs::default()
            .with_top_products(products())
            .with_profits(profits.clone());
        let profits_first = DashboardInputs::default()
            .with_profits(profits)
            .with_top_products(products());

        let a = reduce(&products_first, TimeFrame::Month, &th());
        let b = reduce(&profits_first, TimeFrame::Month, &th());
        assert_eq!(a, b);

        let titles: Vec<&str> = a.profit.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![metrics::PREDICTED_PROFIT, metrics::PROFIT_MARGIN_TREND, metrics::TOP_GROWTH_PRODUCT]
        );
        // first of the tied maxima
        assert_eq!(a.profit[2].value, "Drill");
        assert_eq!(a.profit[1].trend, MetricTrend::Down);
    }

    #[test]
    fn reducing_twice_is_idempotent() {
        let inputs = DashboardInputs::default()
            .with_sales(TotalSeries::new(vec![10.0, 12.0, 9.0, 11.0]))
            .with_top_products(products());
        let once = reduce(&inputs, TimeFrame::Year, &th());
        let twice = reduce(&inputs, TimeFrame::Year, &th());
        assert_eq!(once, twice);
        assert_eq!(once.profit.len(), 1);
    }

    #[test]
    fn top_products_are_ranked() {
        let inputs = DashboardInputs::default().with_top_products(products());
        let m = reduce(&inputs, TimeFrame::Week, &th());
        let names: Vec<&str> = m.top_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Drill", "Gloves", "Hammer"]);
    }
}
