//! Inventory turnover diagnostics and capital locked in unsold stock.

use pulse_core::VendorBrandSummary;
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::group::group_rows;
use crate::queries::top_vendors::TOP_VENDOR_COUNT;
use crate::stats::{mean, sort_asc_by, sort_desc_by};

/// Rows turning over less than once qualify as slow movers.
const LOW_TURNOVER_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorTurnover {
    pub vendor_name: String,
    pub avg_stock_turnover: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorLockedCapital {
    pub vendor_name: String,
    pub locked_capital: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAnalysis {
    pub total_unsold_capital: f64,
    pub low_turnover_vendors: Vec<VendorTurnover>,
    pub top_locked_capital_vendors: Vec<VendorLockedCapital>,
}

/// Purchased-but-unsold units valued at purchase price. Negative when
/// recorded sales exceed recorded purchases.
fn unsold_inventory_value(row: &VendorBrandSummary) -> f64 {
    (row.total_purchase_quantity - row.total_sales_quantity) * row.purchase_price
}

pub fn inventory_analysis(rows: &[VendorBrandSummary]) -> AnalyticsResult<InventoryAnalysis> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let total_unsold_capital: f64 = rows.iter().map(unsold_inventory_value).sum();

    // Slow movers: rows below the turnover threshold, averaged per vendor,
    // ten lowest first.
    let slow_rows: Vec<VendorBrandSummary> = rows
        .iter()
        .filter(|r| r.stock_turnover < LOW_TURNOVER_THRESHOLD)
        .cloned()
        .collect();
    let mut low_turnover_vendors: Vec<VendorTurnover> =
        group_rows(&slow_rows, |r| r.vendor_name.clone())
            .into_iter()
            .map(|(vendor_name, members)| {
                let turnovers: Vec<f64> = members.iter().map(|r| r.stock_turnover).collect();
                VendorTurnover {
                    vendor_name,
                    avg_stock_turnover: mean(&turnovers),
                }
            })
            .collect();
    sort_asc_by(&mut low_turnover_vendors, |v| v.avg_stock_turnover);
    low_turnover_vendors.truncate(TOP_VENDOR_COUNT);

    // Locked capital: every row participates, ten highest vendor totals.
    let mut top_locked_capital_vendors: Vec<VendorLockedCapital> =
        group_rows(rows, |r| r.vendor_name.clone())
            .into_iter()
            .map(|(vendor_name, members)| VendorLockedCapital {
                vendor_name,
                locked_capital: members.iter().map(|r| unsold_inventory_value(r)).sum(),
            })
            .collect();
    sort_desc_by(&mut top_locked_capital_vendors, |v| v.locked_capital);
    top_locked_capital_vendors.truncate(TOP_VENDOR_COUNT);

    Ok(InventoryAnalysis {
        total_unsold_capital,
        low_turnover_vendors,
        top_locked_capital_vendors,
    })
}
