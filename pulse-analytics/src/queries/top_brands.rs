//! Top brands ranked by summed sales dollars, grouped by description.

use pulse_core::VendorBrandSummary;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::group::group_rows;
use crate::queries::top_vendors::TOP_VENDOR_COUNT;
use crate::stats::{mean, sort_desc_by};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSales {
    pub brand_name: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub avg_margin: f64,
}

pub fn top_brands_by_sales(rows: &[VendorBrandSummary]) -> AnalyticsResult<Vec<BrandSales>> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let mut ranked: Vec<BrandSales> = group_rows(rows, |r| r.description.clone())
        .into_iter()
        .map(|(brand_name, members)| {
            let margins: Vec<f64> = members.iter().map(|r| r.profit_margin).collect();
            BrandSales {
                brand_name,
                total_sales: members.iter().map(|r| r.total_sales_dollars).sum(),
                total_profit: members.iter().map(|r| r.gross_profit).sum(),
                avg_margin: mean(&margins),
            }
        })
        .collect();

    sort_desc_by(&mut ranked, |b| b.total_sales);
    ranked.truncate(TOP_VENDOR_COUNT);
    Ok(ranked)
}
