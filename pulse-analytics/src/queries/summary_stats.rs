//! Headline statistics over the whole filtered collection.

use std::collections::HashSet;

use pulse_core::VendorBrandSummary;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::stats::mean;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_vendors: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    pub avg_margin: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub avg_stock_turnover: f64,
}

pub fn summary_stats(rows: &[VendorBrandSummary]) -> AnalyticsResult<SummaryStats> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let vendors: HashSet<&str> = rows.iter().map(|r| r.vendor_name.as_str()).collect();
    let margins: Vec<f64> = rows.iter().map(|r| r.profit_margin).collect();
    let turnovers: Vec<f64> = rows.iter().map(|r| r.stock_turnover).collect();

    Ok(SummaryStats {
        total_vendors: vendors.len(),
        total_sales: rows.iter().map(|r| r.total_sales_dollars).sum(),
        total_profit: rows.iter().map(|r| r.gross_profit).sum(),
        avg_margin: mean(&margins),
        total_purchase_dollars: rows.iter().map(|r| r.total_purchase_dollars).sum(),
        total_sales_quantity: rows.iter().map(|r| r.total_sales_quantity).sum(),
        avg_stock_turnover: mean(&turnovers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_fixtures::perf_row;

    #[test]
    fn empty_collection_is_no_data() {
        assert_eq!(summary_stats(&[]), Err(AnalyticsError::NoDataAvailable));
    }

    #[test]
    fn vendors_count_distinct_names() {
        let rows = vec![
            perf_row("Vendor A", "Brand 1", 1000.0, 1500.0, 100.0, 90.0, 7.0),
            perf_row("Vendor A", "Brand 2", 500.0, 700.0, 50.0, 40.0, 6.0),
            perf_row("Vendor B", "Brand 3", 2000.0, 2600.0, 200.0, 150.0, 9.0),
        ];
        let stats = summary_stats(&rows).unwrap();
        assert_eq!(stats.total_vendors, 2);
        assert!((stats.total_sales - 4800.0).abs() < 1e-9);
        assert!((stats.total_purchase_dollars - 3500.0).abs() < 1e-9);
        assert!((stats.total_sales_quantity - 280.0).abs() < 1e-9);
    }
}
