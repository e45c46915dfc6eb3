//! Normalization and derived financial metrics.
//!
//! Absent values are filled with defined defaults and every ratio goes
//! through an explicit zero-denominator guard. The upstream pipeline let
//! NaN/inf propagate quietly out of its divisions; here the policy is a
//! named sentinel applied in exactly one place.

use crate::summary::{MergedSummaryRow, VendorBrandSummary};

/// The undefined-ratio policy: a zero denominator yields 0.0, never NaN
/// or an infinity. Every derived ratio in the system routes through here.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Recompute the derived fields from the base fields. Idempotent: the
/// inputs are never themselves derived values.
pub fn derive_metrics(row: &mut VendorBrandSummary) {
    row.gross_profit = row.total_sales_dollars - row.total_purchase_dollars;
    row.profit_margin = ratio_or_zero(row.gross_profit, row.total_sales_dollars) * 100.0;
    row.stock_turnover = ratio_or_zero(row.total_sales_quantity, row.total_purchase_quantity);
    row.sales_to_purchase_ratio =
        ratio_or_zero(row.total_sales_dollars, row.total_purchase_dollars);
}

/// Clean one merged row and compute its derived metrics: absent numeric
/// sides become 0.0, names are trimmed of surrounding whitespace.
pub fn finalize_row(row: MergedSummaryRow) -> VendorBrandSummary {
    let mut cleaned = VendorBrandSummary {
        vendor_number: row.vendor_number,
        vendor_name: row.vendor_name.trim().to_string(),
        brand: row.brand,
        description: row.description.trim().to_string(),
        purchase_price: row.purchase_price,
        actual_price: row.actual_price,
        volume: row.volume,
        total_purchase_quantity: row.total_purchase_quantity,
        total_purchase_dollars: row.total_purchase_dollars,
        total_sales_quantity: row.total_sales_quantity.unwrap_or(0.0),
        total_sales_dollars: row.total_sales_dollars.unwrap_or(0.0),
        total_sales_price: row.total_sales_price.unwrap_or(0.0),
        total_excise_tax: row.total_excise_tax.unwrap_or(0.0),
        freight_cost: row.freight_cost.unwrap_or(0.0),
        gross_profit: 0.0,
        profit_margin: 0.0,
        stock_turnover: 0.0,
        sales_to_purchase_ratio: 0.0,
    };
    derive_metrics(&mut cleaned);
    cleaned
}

/// Clean a whole merged collection, preserving row order.
pub fn finalize(rows: Vec<MergedSummaryRow>) -> Vec<VendorBrandSummary> {
    let cleaned: Vec<VendorBrandSummary> = rows.into_iter().map(finalize_row).collect();
    log::info!("cleaned {} summary rows", cleaned.len());
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged_row() -> MergedSummaryRow {
        MergedSummaryRow {
            vendor_number: 1,
            vendor_name: "  Vendor A  ".to_string(),
            brand: 10,
            description: " Brand Ten ".to_string(),
            purchase_price: 7.25,
            actual_price: 11.99,
            volume: 750.0,
            total_purchase_quantity: 150.0,
            total_purchase_dollars: 1087.5,
            total_sales_quantity: Some(120.0),
            total_sales_dollars: Some(1438.8),
            total_sales_price: Some(23.98),
            total_excise_tax: Some(10.8),
            freight_cost: Some(20.0),
        }
    }

    #[test]
    fn gross_profit_is_sales_minus_purchases_exactly() {
        let row = finalize_row(merged_row());
        assert_eq!(row.gross_profit, 1438.8 - 1087.5);
    }

    #[test]
    fn derived_ratios_match_their_formulas() {
        let row = finalize_row(merged_row());
        assert!((row.profit_margin - (row.gross_profit / 1438.8) * 100.0).abs() < 1e-9);
        assert!((row.stock_turnover - 120.0 / 150.0).abs() < 1e-9);
        assert!((row.sales_to_purchase_ratio - 1438.8 / 1087.5).abs() < 1e-9);
    }

    #[test]
    fn names_are_trimmed() {
        let row = finalize_row(merged_row());
        assert_eq!(row.vendor_name, "Vendor A");
        assert_eq!(row.description, "Brand Ten");
    }

    #[test]
    fn absent_sales_side_fills_with_zero() {
        let mut merged = merged_row();
        merged.total_sales_quantity = None;
        merged.total_sales_dollars = None;
        merged.total_sales_price = None;
        merged.total_excise_tax = None;
        merged.freight_cost = None;
        let row = finalize_row(merged);
        assert_eq!(row.total_sales_dollars, 0.0);
        assert_eq!(row.freight_cost, 0.0);
        // Zero sales means gross profit is pure negative purchase dollars
        assert_eq!(row.gross_profit, -1087.5);
        // and the margin denominator is zero: the sentinel applies
        assert_eq!(row.profit_margin, 0.0);
    }

    #[test]
    fn zero_denominators_resolve_via_the_sentinel() {
        let mut merged = merged_row();
        merged.total_purchase_quantity = 0.0;
        merged.total_purchase_dollars = 0.0;
        let row = finalize_row(merged);
        assert_eq!(row.stock_turnover, 0.0);
        assert_eq!(row.sales_to_purchase_ratio, 0.0);
        assert!(row.profit_margin.is_finite());
    }

    #[test]
    fn cleaning_twice_is_a_no_op() {
        let first = finalize(vec![merged_row()]);
        let second = finalize(
            first
                .iter()
                .cloned()
                .map(MergedSummaryRow::from)
                .collect(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn derive_metrics_is_idempotent() {
        let mut row = finalize_row(merged_row());
        let before = row.clone();
        derive_metrics(&mut row);
        assert_eq!(row, before);
    }
}
