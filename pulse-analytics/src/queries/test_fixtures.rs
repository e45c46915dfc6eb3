//! Shared row fixtures for query tests.

use pulse_core::clean::derive_metrics;
use pulse_core::VendorBrandSummary;

/// A row that passes the standing filter, with derived metrics computed
/// from the given base figures.
pub(crate) fn perf_row(
    vendor_name: &str,
    description: &str,
    purchase_dollars: f64,
    sales_dollars: f64,
    purchase_quantity: f64,
    sales_quantity: f64,
    purchase_price: f64,
) -> VendorBrandSummary {
    let mut row = VendorBrandSummary {
        vendor_number: 0,
        vendor_name: vendor_name.to_string(),
        brand: 0,
        description: description.to_string(),
        purchase_price,
        actual_price: purchase_price * 1.5,
        volume: 750.0,
        total_purchase_quantity: purchase_quantity,
        total_purchase_dollars: purchase_dollars,
        total_sales_quantity: sales_quantity,
        total_sales_dollars: sales_dollars,
        total_sales_price: purchase_price * 1.5,
        total_excise_tax: 1.0,
        freight_cost: 25.0,
        gross_profit: 0.0,
        profit_margin: 0.0,
        stock_turnover: 0.0,
        sales_to_purchase_ratio: 0.0,
    };
    derive_metrics(&mut row);
    row
}
