use std::collections::HashMap;
use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use stocksight_pipeline::candidate_pipeline::{CandidatePipeline, PipelineResult};
use stocksight_pipeline::chart::{prepare_chart, ChartPoint};
use stocksight_pipeline::config::load_thresholds_file;
use stocksight_pipeline::dashboard::{self, DashboardMetrics};
use stocksight_pipeline::forecast_loader::{load_bundle_file, ItemForecast};
use stocksight_pipeline::inventory_loader::load_inventory_file;
use stocksight_pipeline::metrics::SummaryMetric;
use stocksight_pipeline::pipelines::reorder_advisory::ReorderAdvisoryPipeline;
use stocksight_pipeline::types::{AdvisoryQuery, ItemCandidate};
use stocksight_stats::{AdvisoryThresholds, StockLevel, TimeFrame};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    time_frame: TimeFrame,
    pipeline_ms: u128,
    dashboard: DashboardMetrics,
    advisories: Vec<AdvisoryJson>,
    failed: Vec<FailedJson>,
    low_stock: Vec<LowStockJson>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct AdvisoryJson {
    item_id: String,
    sku: String,
    name: String,
    category: String,
    current_reorder_point: u32,
    suggested_reorder_point: u32,
    growth_category: String,
    growth_rate_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_period: Option<NextPeriodJson>,
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stock_level: Option<StockLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_stock_level: Option<StockLevel>,
    reason: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    chart: Vec<ChartPoint>,
}

/// Growth from the last actual period to the first predicted one.
#[derive(Serialize)]
struct NextPeriodJson {
    growth_percent: f64,
    direction: String,
}

#[derive(Serialize)]
struct FailedJson {
    item_id: String,
    sku: String,
    name: String,
    current_reorder_point: u32,
    quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stock_level: Option<StockLevel>,
    error: String,
    reason: String,
}

#[derive(Serialize)]
struct LowStockJson {
    item_id: String,
    sku: String,
    name: String,
    quantity: i64,
    reorder_point: u32,
    stock_level: StockLevel,
}

#[derive(Serialize)]
struct SummaryJson {
    items_processed: usize,
    items_advised: usize,
    items_failed: usize,
    advisories_returned: usize,
    low_stock_items: usize,
}

/// Every retrieved item whose stock needs attention, worst first.
fn low_stock_items(result: &PipelineResult<AdvisoryQuery, ItemCandidate>) -> Vec<&ItemCandidate> {
    let mut items: Vec<&ItemCandidate> = result
        .retrieved_candidates
        .iter()
        .filter(|c| c.stock_level.is_some_and(|l| l.needs_attention()))
        .collect();
    items.sort_by_key(|c| c.stock_level != Some(StockLevel::AtReorderPoint));
    items
}

fn build_json(
    result: &PipelineResult<AdvisoryQuery, ItemCandidate>,
    dashboard: DashboardMetrics,
    forecasts: &HashMap<&str, &ItemForecast>,
    time_frame: TimeFrame,
    pipeline_ms: u128,
) -> ReportJson {
    let retrieved = result.retrieved_candidates.len();
    let failed = result.filtered_candidates.len();
    let low_stock: Vec<LowStockJson> = low_stock_items(result)
        .into_iter()
        .filter_map(|c| {
            c.stock_level.map(|stock_level| LowStockJson {
                item_id: c.item_id.clone(),
                sku: c.sku.clone(),
                name: c.name.clone(),
                quantity: c.quantity,
                reorder_point: c.current_reorder_point,
                stock_level,
            })
        })
        .collect();

    ReportJson {
        generated_at: Utc::now().to_rfc3339(),
        time_frame,
        pipeline_ms,
        dashboard,
        advisories: result
            .selected_candidates
            .iter()
            .map(|c| AdvisoryJson {
                item_id: c.item_id.clone(),
                sku: c.sku.clone(),
                name: c.name.clone(),
                category: c.category.clone(),
                current_reorder_point: c.current_reorder_point,
                suggested_reorder_point: c.effective_reorder_point(),
                growth_category: c
                    .suggestion
                    .as_ref()
                    .map(|s| s.category.to_string())
                    .unwrap_or_default(),
                growth_rate_percent: c
                    .suggestion
                    .as_ref()
                    .map(|s| s.growth_rate_percent)
                    .unwrap_or(0.0),
                confidence: c.confidence,
                next_period: c.next_period_growth.map(|g| NextPeriodJson {
                    growth_percent: g.percent(),
                    direction: g.direction.to_string(),
                }),
                quantity: c.quantity,
                stock_level: c.stock_level,
                suggested_stock_level: c.suggested_stock_level,
                reason: c.reason(),
                chart: forecasts
                    .get(c.sku.as_str())
                    .map(|f| prepare_chart(f))
                    .unwrap_or_default(),
            })
            .collect(),
        failed: result
            .filtered_candidates
            .iter()
            .map(|c| FailedJson {
                item_id: c.item_id.clone(),
                sku: c.sku.clone(),
                name: c.name.clone(),
                current_reorder_point: c.current_reorder_point,
                quantity: c.quantity,
                stock_level: c.stock_level,
                error: c.forecast_error.clone().unwrap_or_default(),
                reason: c.reason(),
            })
            .collect(),
        summary: SummaryJson {
            items_processed: retrieved,
            items_advised: retrieved.saturating_sub(failed),
            items_failed: failed,
            advisories_returned: result.selected_candidates.len(),
            low_stock_items: low_stock.len(),
        },
        low_stock,
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

fn print_metrics(heading: &str, metrics: &[SummaryMetric]) {
    if metrics.is_empty() {
        println!("  {}: not loaded", heading);
        return;
    }
    println!("  {}", heading);
    for m in metrics {
        let pct = m
            .percentage
            .map(|p| format!("  ({:+.1}%)", p))
            .unwrap_or_default();
        println!(
            "    {:22} {:>16}  {:8} {}{}",
            m.title, m.value, m.trend, m.color, pct
        );
    }
}

fn print_human(
    result: &PipelineResult<AdvisoryQuery, ItemCandidate>,
    dashboard: &DashboardMetrics,
    time_frame: TimeFrame,
    load_ms: u128,
    pipeline_ms: u128,
) {
    println!();
    println!("  +{:-<62}+", "");
    println!("  |{:^62}|", "STOCKSIGHT  Forecast & Reorder Advisory");
    println!("  +{:-<62}+", "");
    println!();

    println!(
        "  {} items analyzed  \u{00b7}  {} forecasts failed  \u{00b7}  {} view",
        result.retrieved_candidates.len(),
        result.filtered_candidates.len(),
        time_frame.plural_label()
    );
    println!();

    print_metrics("Sales", &dashboard.sales);
    print_metrics("Profit", &dashboard.profit);
    if !dashboard.top_products.is_empty() {
        println!("  Top products");
        for (i, p) in dashboard.top_products.iter().enumerate() {
            println!(
                "    {}. {:24} {:12} {:+.1}%",
                i + 1,
                p.name,
                p.sku,
                p.predicted_increase_percent
            );
        }
    }
    println!();

    if result.selected_candidates.is_empty() {
        println!("  No reorder advice available.");
    } else {
        println!("  {:-<64}", "");
        for (i, c) in result.selected_candidates.iter().enumerate() {
            let confidence = c
                .confidence
                .map(|p| format!("{:.0}%", p))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "  {:>2}. {:10} {:24} {:>5} -> {:<5} confidence {}",
                i + 1,
                c.sku,
                c.name,
                c.current_reorder_point,
                c.effective_reorder_point(),
                confidence
            );
            println!("      {}", c.reason());
            if let Some(g) = c.next_period_growth {
                println!(
                    "      Next {}: {:+.1}% ({})",
                    time_frame.singular_label(),
                    g.percent(),
                    g.direction
                );
            }
            if let (Some(now), Some(after)) = (c.stock_level, c.suggested_stock_level) {
                if now != after {
                    println!(
                        "      Stock {} on hand: {} now, {} at the suggested point",
                        c.quantity, now, after
                    );
                }
            }
        }
        println!("  {:-<64}", "");
    }

    if !result.filtered_candidates.is_empty() {
        println!();
        println!("  Unable to advise:");
        for c in &result.filtered_candidates {
            println!(
                "    {:10} {:24} keeps {}  ({})",
                c.sku,
                c.name,
                c.current_reorder_point,
                c.forecast_error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let low_stock = low_stock_items(result);
    if !low_stock.is_empty() {
        println!();
        println!("  Low stock:");
        for c in low_stock {
            println!(
                "    {:10} {:24} {:>6} on hand  reorder point {:<5} {}",
                c.sku,
                c.name,
                c.quantity,
                c.current_reorder_point,
                c.stock_level.unwrap_or(StockLevel::Healthy)
            );
        }
    }

    println!();
    println!(
        "  Inputs loaded in {}ms \u{00b7} Pipeline ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: stocksight-server <inventory.csv> <forecast.json> [options]");
    eprintln!();
    eprintln!("Options:");
    let frames: Vec<&str> = TimeFrame::ALL.iter().map(|tf| tf.as_str()).collect();
    eprintln!(
        "  --time-frame  {} (default: {})",
        frames.join(", "),
        TimeFrame::default()
    );
    eprintln!("  --top         Number of advisories to return (default: 5)");
    eprintln!("  --thresholds  JSON file overriding advisory thresholds");
    eprintln!("  --items       Comma-separated item IDs to advise on");
    eprintln!("  --json        Output as JSON instead of formatted text");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  stocksight-server fixtures/inventory.csv fixtures/forecast.json");
    eprintln!("  stocksight-server fixtures/inventory.csv fixtures/forecast.json --time-frame month --top 10 --json");
    process::exit(1);
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str, what: &str) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Error: {} requires {}", flag, what);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage();
    }

    let csv_path = &args[1];
    let bundle_path = &args[2];

    let mut time_frame: Option<TimeFrame> = None;
    let mut top_k: usize = 5;
    let mut thresholds_path: Option<String> = None;
    let mut item_ids: Vec<String> = Vec::new();
    let mut json_output = false;
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--time-frame" => {
                let raw = flag_value(&args, i, "--time-frame", "week, month or year");
                time_frame = match raw.parse() {
                    Ok(tf) => Some(tf),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--top" => {
                let raw = flag_value(&args, i, "--top", "a number");
                top_k = match raw.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        eprintln!("Error: --top requires a positive integer");
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--thresholds" => {
                thresholds_path =
                    Some(flag_value(&args, i, "--thresholds", "a file path").to_string());
                i += 2;
            }
            "--items" => {
                item_ids = flag_value(&args, i, "--items", "a comma-separated list of item IDs")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                i += 2;
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--help" | "-h" => usage(),
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    let load_start = Instant::now();
    let thresholds = match thresholds_path {
        Some(ref path) => match load_thresholds_file(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Error loading thresholds: {}", e);
                process::exit(1);
            }
        },
        None => AdvisoryThresholds::default(),
    };
    let records = match load_inventory_file(csv_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let bundle = match load_bundle_file(bundle_path) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error loading forecasts: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();

    let time_frame = time_frame.unwrap_or_default();
    log::info!(
        "loaded {} inventory records and {} item forecasts ({} view)",
        records.len(),
        bundle.items.len(),
        time_frame
    );

    let metrics = dashboard::reduce(&bundle.dashboard_inputs(), time_frame, &thresholds);

    let pipeline_start = Instant::now();
    let pipeline = ReorderAdvisoryPipeline::with_config(
        records,
        bundle.items.clone(),
        thresholds,
        top_k,
    );
    let query = AdvisoryQuery {
        request_id: format!("advisory-{}", Utc::now().timestamp_millis()),
        time_frame: Some(time_frame),
        item_ids,
    };
    let result = pipeline.execute(query).await;
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if json_output {
        let forecasts: HashMap<&str, &ItemForecast> = bundle
            .items
            .iter()
            .filter(|f| f.time_frame.known() == Some(time_frame) && f.error.is_none())
            .map(|f| (f.sku.as_str(), f))
            .collect();
        let report = build_json(&result, metrics, &forecasts, time_frame, pipeline_ms);
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_human(&result, &metrics, time_frame, load_ms, pipeline_ms);
    }
}
