//! Top vendors ranked by summed sales dollars.

use pulse_core::VendorBrandSummary;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::group::group_rows;
use crate::stats::{mean, sort_desc_by};

/// How many vendors a ranking reports.
pub(crate) const TOP_VENDOR_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSales {
    pub vendor_name: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub avg_margin: f64,
    pub total_purchase_dollars: f64,
}

pub fn top_vendors_by_sales(rows: &[VendorBrandSummary]) -> AnalyticsResult<Vec<VendorSales>> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let mut ranked: Vec<VendorSales> = group_rows(rows, |r| r.vendor_name.clone())
        .into_iter()
        .map(|(vendor_name, members)| {
            let margins: Vec<f64> = members.iter().map(|r| r.profit_margin).collect();
            VendorSales {
                vendor_name,
                total_sales: members.iter().map(|r| r.total_sales_dollars).sum(),
                total_profit: members.iter().map(|r| r.gross_profit).sum(),
                avg_margin: mean(&margins),
                total_purchase_dollars: members
                    .iter()
                    .map(|r| r.total_purchase_dollars)
                    .sum(),
            }
        })
        .collect();

    sort_desc_by(&mut ranked, |v| v.total_sales);
    ranked.truncate(TOP_VENDOR_COUNT);
    Ok(ranked)
}
