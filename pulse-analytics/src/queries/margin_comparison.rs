//! Profit margin distribution of high-sales rows versus low-sales rows.

use pulse_core::VendorBrandSummary;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::stats::{mean, quantile, sample_std};

/// Sales-dollar percentile at or above which a row counts as "top".
const TOP_SALES_QUANTILE: f64 = 0.75;
/// Sales-dollar percentile at or below which a row counts as "low".
const LOW_SALES_QUANTILE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginStats {
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginComparison {
    pub top_vendors: MarginStats,
    pub low_vendors: MarginStats,
    pub all_vendors: MarginStats,
}

fn margin_stats(margins: &[f64]) -> MarginStats {
    MarginStats {
        mean: mean(margins),
        std: sample_std(margins),
        count: margins.len(),
    }
}

/// The groups are inclusive on both thresholds, so a degenerate
/// distribution (p25 == p75) can place the same row in both.
pub fn profit_margin_comparison(
    rows: &[VendorBrandSummary],
) -> AnalyticsResult<MarginComparison> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let sales: Vec<f64> = rows.iter().map(|r| r.total_sales_dollars).collect();
    let top_threshold = quantile(&sales, TOP_SALES_QUANTILE);
    let low_threshold = quantile(&sales, LOW_SALES_QUANTILE);

    let top_margins: Vec<f64> = rows
        .iter()
        .filter(|r| r.total_sales_dollars >= top_threshold)
        .map(|r| r.profit_margin)
        .collect();
    let low_margins: Vec<f64> = rows
        .iter()
        .filter(|r| r.total_sales_dollars <= low_threshold)
        .map(|r| r.profit_margin)
        .collect();
    let all_margins: Vec<f64> = rows.iter().map(|r| r.profit_margin).collect();

    Ok(MarginComparison {
        top_vendors: margin_stats(&top_margins),
        low_vendors: margin_stats(&low_margins),
        all_vendors: margin_stats(&all_margins),
    })
}
