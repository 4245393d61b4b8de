//! Chart series preparation for a single item's forecast.
//!
//! Historical and predicted points go on separate lines, so each chart
//! point fills exactly one of `historical` / `predicted`. Confidence bounds
//! are copied from predicted points only, and only when the provider says
//! it sent them.

use serde::Serialize;
use stocksight_stats::TimeFrame;

use crate::forecast_loader::{ForecastPoint, ItemForecast};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    /// `"<year>-<period>"`, e.g. `"2024-12"`.
    pub time: String,
    pub historical: Option<f64>,
    pub predicted: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

fn time_label(point: &ForecastPoint, time_frame: TimeFrame) -> String {
    let year = point.label("year").unwrap_or_default();
    let period = point.label(time_frame.period_field()).unwrap_or_default();
    format!("{}-{}", year, period)
}

/// Numeric value of a field, also accepting numeric strings. Anything else
/// sorts after every real period.
fn ordinal(point: &ForecastPoint, field: &str) -> f64 {
    point
        .number(field)
        .or_else(|| point.label(field).and_then(|l| l.trim().parse().ok()))
        .unwrap_or(f64::INFINITY)
}

fn sort_key(point: &ForecastPoint, time_frame: TimeFrame) -> (f64, f64) {
    (ordinal(point, "year"), ordinal(point, time_frame.period_field()))
}

/// Chart points for one item, ordered by (year, period).
///
/// Provider order is not trusted; the sort is stable, so points sharing a
/// period keep historical before predicted.
pub fn prepare_chart(forecast: &ItemForecast) -> Vec<ChartPoint> {
    let Some(tf) = forecast.time_frame.known() else {
        log::warn!(
            "sku={} has unrecognized time frame '{}', no chart",
            forecast.sku,
            forecast.time_frame
        );
        return Vec::new();
    };

    let historical = forecast.historical_data.iter().map(|p| {
        let point = ChartPoint {
            time: time_label(p, tf),
            historical: p.value(tf),
            predicted: None,
            lower: None,
            upper: None,
        };
        (sort_key(p, tf), point)
    });

    let predicted = forecast.prediction_data.iter().map(|p| {
        let (lower, upper) = if forecast.has_confidence_intervals {
            (p.number(tf.lower_bound_field()), p.number(tf.upper_bound_field()))
        } else {
            (None, None)
        };
        let point = ChartPoint {
            time: time_label(p, tf),
            historical: None,
            predicted: p.value(tf),
            lower,
            upper,
        };
        (sort_key(p, tf), point)
    });

    let mut keyed: Vec<((f64, f64), ChartPoint)> = historical.chain(predicted).collect();
    keyed.sort_by(|(a, _), (b, _)| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    keyed.into_iter().map(|(_, point)| point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_forecast(with_intervals: bool) -> ItemForecast {
        let json = format!(
            r#"{{
                "sku": "DRL-900",
                "time_frame": "month",
                "historical_data": [
                    {{"year": 2024, "month_number": 11, "total_sales_in_month": 40}},
                    {{"year": 2024, "month_number": 12, "total_sales_in_month": 52}}
                ],
                "prediction_data": [
                    {{"year": 2025, "month_number": 1, "total_sales_in_month": 58,
                      "total_sales_in_month_lower": 45, "total_sales_in_month_upper": 70}}
                ],
                "has_confidence_intervals": {}
            }}"#,
            with_intervals
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn historical_and_predicted_are_separate_lines() {
        let points = prepare_chart(&monthly_forecast(true));
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].time, "2024-11");
        assert_eq!(points[0].historical, Some(40.0));
        assert_eq!(points[0].predicted, None);
        assert_eq!(points[2].time, "2025-1");
        assert_eq!(points[2].historical, None);
        assert_eq!(points[2].predicted, Some(58.0));
        assert_eq!((points[2].lower, points[2].upper), (Some(45.0), Some(70.0)));
    }

    #[test]
    fn bounds_are_dropped_without_interval_flag() {
        let points = prepare_chart(&monthly_forecast(false));
        assert_eq!((points[2].lower, points[2].upper), (None, None));
    }

    #[test]
    fn points_are_ordered_by_year_then_period() {
        let forecast: ItemForecast = serde_json::from_str(
            r#"{
                "sku": "HMR-100",
                "time_frame": "week",
                "historical_data": [
                    {"year": 2024, "week_number": 12, "total_sales_in_week": 3},
                    {"year": 2024, "week_number": 9, "total_sales_in_week": 1},
                    {"year": 2024, "week_number": "10", "total_sales_in_week": 2}
                ],
                "prediction_data": [
                    {"year": 2024, "week_number": 13, "total_sales_in_week": 4},
                    {"year": 2023, "week_number": 52, "total_sales_in_week": 0}
                ]
            }"#,
        )
        .unwrap();
        let times: Vec<String> = prepare_chart(&forecast).into_iter().map(|p| p.time).collect();
        assert_eq!(times, vec!["2023-52", "2024-9", "2024-10", "2024-12", "2024-13"]);
    }

    #[test]
    fn unrecognized_time_frame_has_no_chart() {
        let forecast: ItemForecast = serde_json::from_str(
            r#"{"sku": "X", "time_frame": "quarter", "historical_data": [{"year": 2024}]}"#,
        )
        .unwrap();
        assert!(prepare_chart(&forecast).is_empty());
    }
}
