use std::env;
use std::process;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use pulse_analytics::{
    bulk_purchase_analysis, inventory_analysis, profit_margin_comparison, summary_stats,
    top_brands_by_sales, top_vendors_by_sales, vendor_purchase_contribution, AnalyticsResult,
    BrandSales, InventoryAnalysis, MarginComparison, OrderSizeBucket, SummaryStats, VendorContribution,
    VendorSales,
};
use pulse_core::{build_summary, export, finalize, RawTables, SnapshotStore, SummarySnapshot};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

/// A query result or its local failure. Failures stay local to a section;
/// the rest of the digest is unaffected.
#[derive(Serialize)]
#[serde(untagged)]
enum Section<T: Serialize> {
    Ok(T),
    Err { error: String },
}

impl<T: Serialize> From<AnalyticsResult<T>> for Section<T> {
    fn from(result: AnalyticsResult<T>) -> Self {
        match result {
            Ok(value) => Section::Ok(value),
            Err(e) => Section::Err {
                error: e.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DigestJson {
    generated_at: String,
    snapshot_version: u64,
    rows_total: usize,
    rows_in_view: usize,
    build_ms: u128,
    summary_stats: Section<SummaryStats>,
    top_vendors: Section<Vec<VendorSales>>,
    top_brands: Section<Vec<BrandSales>>,
    vendor_contribution: Section<Vec<VendorContribution>>,
    bulk_purchases: Section<Vec<OrderSizeBucket>>,
    profit_margins: Section<MarginComparison>,
    inventory: Section<InventoryAnalysis>,
}

fn build_digest(
    snapshot: &SummarySnapshot,
    view: &[pulse_core::VendorBrandSummary],
    build_ms: u128,
) -> DigestJson {
    DigestJson {
        generated_at: Utc::now().to_rfc3339(),
        snapshot_version: snapshot.version(),
        rows_total: snapshot.len(),
        rows_in_view: view.len(),
        build_ms,
        summary_stats: summary_stats(view).into(),
        top_vendors: top_vendors_by_sales(view).into(),
        top_brands: top_brands_by_sales(view).into(),
        vendor_contribution: vendor_purchase_contribution(view).into(),
        bulk_purchases: bulk_purchase_analysis(view).into(),
        profit_margins: profit_margin_comparison(view).into(),
        inventory: inventory_analysis(view).into(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Round to whole currency units and insert thousands separators.
fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", amount.abs());
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn print_section_error(title: &str, error: &impl std::fmt::Display) {
    println!("  {title}: unavailable ({error})");
    println!();
}

fn print_human(snapshot: &SummarySnapshot, view: &[pulse_core::VendorBrandSummary], build_ms: u128) {
    println!();
    println!("  VENDOR PULSE \u{2014} Performance Digest");
    println!("  {:=<64}", "");
    println!(
        "  snapshot v{} \u{00b7} {} rows merged \u{00b7} {} in the performance view \u{00b7} built in {}ms",
        snapshot.version(),
        snapshot.len(),
        view.len(),
        build_ms
    );
    println!();

    match summary_stats(view) {
        Ok(stats) => {
            println!("  Overview");
            println!(
                "    {} vendors \u{00b7} ${} sales \u{00b7} ${} gross profit",
                stats.total_vendors,
                format_amount(stats.total_sales),
                format_amount(stats.total_profit)
            );
            println!(
                "    ${} purchases \u{00b7} {} units sold \u{00b7} avg margin {:.1}% \u{00b7} avg turnover {:.2}",
                format_amount(stats.total_purchase_dollars),
                format_amount(stats.total_sales_quantity),
                stats.avg_margin,
                stats.avg_stock_turnover
            );
            println!();
        }
        Err(e) => print_section_error("Overview", &e),
    }

    match top_vendors_by_sales(view) {
        Ok(top) => {
            println!("  Top vendors by sales");
            for (i, vendor) in top.iter().enumerate() {
                println!(
                    "    {:>2}. {:32} ${:>12}  margin {:>5.1}%",
                    i + 1,
                    vendor.vendor_name,
                    format_amount(vendor.total_sales),
                    vendor.avg_margin
                );
            }
            println!();
        }
        Err(e) => print_section_error("Top vendors by sales", &e),
    }

    match top_brands_by_sales(view) {
        Ok(top) => {
            println!("  Top brands by sales");
            for (i, brand) in top.iter().enumerate() {
                println!(
                    "    {:>2}. {:32} ${:>12}  margin {:>5.1}%",
                    i + 1,
                    brand.brand_name,
                    format_amount(brand.total_sales),
                    brand.avg_margin
                );
            }
            println!();
        }
        Err(e) => print_section_error("Top brands by sales", &e),
    }

    match vendor_purchase_contribution(view) {
        Ok(contributions) => {
            println!("  Purchase contribution (share of grand total)");
            for c in &contributions {
                println!(
                    "    {:32} ${:>12}  {:>5.1}%  cum {:>5.1}%",
                    c.vendor_name,
                    format_amount(c.purchase_dollars),
                    c.contribution_pct,
                    c.cumulative_pct
                );
            }
            println!();
        }
        Err(e) => print_section_error("Purchase contribution", &e),
    }

    match bulk_purchase_analysis(view) {
        Ok(buckets) => {
            println!("  Bulk purchasing");
            for bucket in &buckets {
                println!(
                    "    {:6}  {:>4} orders  avg unit price ${:.2}",
                    bucket.order_size.to_string(),
                    bucket.order_count,
                    bucket.avg_unit_price
                );
            }
            println!();
        }
        Err(e) => print_section_error("Bulk purchasing", &e),
    }

    match profit_margin_comparison(view) {
        Ok(comparison) => {
            println!("  Profit margins (top / low / all sellers)");
            for (label, stats) in [
                ("top", &comparison.top_vendors),
                ("low", &comparison.low_vendors),
                ("all", &comparison.all_vendors),
            ] {
                println!(
                    "    {:3}  mean {:>5.1}%  std {:>5.1}  n={}",
                    label, stats.mean, stats.std, stats.count
                );
            }
            println!();
        }
        Err(e) => print_section_error("Profit margins", &e),
    }

    match inventory_analysis(view) {
        Ok(analysis) => {
            println!(
                "  Inventory \u{00b7} ${} locked in unsold stock",
                format_amount(analysis.total_unsold_capital)
            );
            if !analysis.low_turnover_vendors.is_empty() {
                println!("    slowest movers:");
                for vendor in &analysis.low_turnover_vendors {
                    println!(
                        "      {:30} turnover {:.2}",
                        vendor.vendor_name, vendor.avg_stock_turnover
                    );
                }
            }
            if !analysis.top_locked_capital_vendors.is_empty() {
                println!("    most locked capital:");
                for vendor in &analysis.top_locked_capital_vendors {
                    println!(
                        "      {:30} ${}",
                        vendor.vendor_name,
                        format_amount(vendor.locked_capital)
                    );
                }
            }
            println!();
        }
        Err(e) => print_section_error("Inventory", &e),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn usage() -> ! {
    eprintln!("Usage: pulse-server <data-dir> [--json] [--export PATH]");
    eprintln!();
    eprintln!("Reads purchases.csv, purchase_prices.csv, vendor_invoice.csv and");
    eprintln!("sales.csv from <data-dir>, builds the vendor/brand summary snapshot");
    eprintln!("and prints the performance digest.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json          Output the digest as JSON instead of formatted text");
    eprintln!("  --export PATH   Also write the summary (.csv: full cleaned table,");
    eprintln!("                  .json: standing-filtered records)");
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let data_dir = &args[1];
    let mut json_output = false;
    let mut export_path: Option<String> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                json_output = true;
                i += 1;
            }
            "--export" => {
                if i + 1 < args.len() {
                    export_path = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --export requires a file path");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("Unknown argument: {other}");
                usage();
            }
        }
    }

    let build_start = Instant::now();
    let tables = match RawTables::load_dir(data_dir) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("Error loading raw tables: {e}");
            process::exit(1);
        }
    };

    let rows = finalize(build_summary(&tables));
    let store = SnapshotStore::new(SummarySnapshot::new(1, rows));
    let snapshot = store.current();
    let build_ms = build_start.elapsed().as_millis();

    let view = snapshot.performance_rows();
    log::info!(
        "performance view holds {} of {} rows",
        view.len(),
        snapshot.len()
    );

    if let Some(path) = export_path {
        let result = if path.ends_with(".json") {
            export::write_records_json_file(&path, &view)
        } else {
            export::write_summary_csv_file(&path, snapshot.rows())
        };
        if let Err(e) = result {
            eprintln!("Error exporting summary: {e}");
            process::exit(1);
        }
    }

    if json_output {
        let digest = build_digest(&snapshot, &view, build_ms);
        match serde_json::to_string_pretty(&digest) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error serializing digest: {e}");
                process::exit(1);
            }
        }
    } else {
        print_human(&snapshot, &view, build_ms);
    }
}
