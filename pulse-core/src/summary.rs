//! Summary construction: merge the four raw tables into one row per
//! (vendor, brand) pair.
//!
//! Join semantics, preserved from the upstream reporting pipeline:
//! - purchases with a non-positive PurchasePrice are excluded before
//!   grouping;
//! - purchases inner-join the price reference on Brand, so a purchase
//!   whose brand carries no listing is dropped;
//! - the sales and freight sides are LEFT joins — a vendor/brand with
//!   purchases but no sales yields an absent sales side, resolved to
//!   zero by the cleaner, never a silent NaN;
//! - freight is aggregated per vendor and the same total lands on every
//!   brand row of that vendor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::loader::RawTables;

/// One fully cleaned and derived record per unique (VendorNumber, Brand)
/// pair. Field names serialize in the raw tables' PascalCase so exported
/// files line up with the upstream schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorBrandSummary {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub stock_turnover: f64,
    pub sales_to_purchase_ratio: f64,
}

/// Builder output: the purchase side is always present, the sales and
/// freight sides are `None` when the left join found no match.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSummaryRow {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: f64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: Option<f64>,
    pub total_sales_dollars: Option<f64>,
    pub total_sales_price: Option<f64>,
    pub total_excise_tax: Option<f64>,
    pub freight_cost: Option<f64>,
}

impl From<VendorBrandSummary> for MergedSummaryRow {
    /// An already-cleaned row seen as a merged row with every side present.
    /// Used when a cleaned collection is run through the cleaner again.
    fn from(row: VendorBrandSummary) -> Self {
        MergedSummaryRow {
            vendor_number: row.vendor_number,
            vendor_name: row.vendor_name,
            brand: row.brand,
            description: row.description,
            purchase_price: row.purchase_price,
            actual_price: row.actual_price,
            volume: row.volume,
            total_purchase_quantity: row.total_purchase_quantity,
            total_purchase_dollars: row.total_purchase_dollars,
            total_sales_quantity: Some(row.total_sales_quantity),
            total_sales_dollars: Some(row.total_sales_dollars),
            total_sales_price: Some(row.total_sales_price),
            total_excise_tax: Some(row.total_excise_tax),
            freight_cost: Some(row.freight_cost),
        }
    }
}

/// Purchase-side grouping key. Prices and volume participate in the key;
/// their bit patterns give exact-value grouping, matching a GROUP BY over
/// the raw columns.
#[derive(Clone, PartialEq, Eq, Hash)]
struct PurchaseGroupKey {
    vendor_number: i64,
    vendor_name: String,
    brand: i64,
    description: String,
    purchase_price_bits: u64,
    actual_price_bits: u64,
    volume_bits: u64,
}

struct PurchaseGroup {
    key: PurchaseGroupKey,
    quantity: f64,
    dollars: f64,
}

#[derive(Default)]
struct SalesGroup {
    quantity: f64,
    dollars: f64,
    price: f64,
    excise_tax: f64,
}

/// Merge the raw tables into one row per (vendor, brand) pair, ordered
/// descending by TotalPurchaseDollars. The sort is stable, so equal-dollar
/// rows keep their first-occurrence order from the purchase input — that
/// order seeds every later top-N tie-break.
pub fn build_summary(tables: &RawTables) -> Vec<MergedSummaryRow> {
    // Brand -> (price, volume) reference. First listing wins.
    let mut price_by_brand: HashMap<i64, (f64, f64)> = HashMap::new();
    for listing in &tables.purchase_prices {
        if price_by_brand
            .insert(listing.brand, (listing.price, listing.volume))
            .is_some()
        {
            log::debug!("duplicate price listing for brand {}", listing.brand);
        }
    }

    // Purchase aggregation, first-seen group order preserved.
    let mut group_index: HashMap<PurchaseGroupKey, usize> = HashMap::new();
    let mut groups: Vec<PurchaseGroup> = Vec::new();
    let mut dropped_non_positive = 0usize;
    let mut dropped_unlisted = 0usize;

    for purchase in &tables.purchases {
        if purchase.purchase_price <= 0.0 {
            dropped_non_positive += 1;
            continue;
        }
        let Some(&(actual_price, volume)) = price_by_brand.get(&purchase.brand) else {
            dropped_unlisted += 1;
            continue;
        };
        let key = PurchaseGroupKey {
            vendor_number: purchase.vendor_number,
            vendor_name: purchase.vendor_name.clone(),
            brand: purchase.brand,
            description: purchase.description.clone(),
            purchase_price_bits: purchase.purchase_price.to_bits(),
            actual_price_bits: actual_price.to_bits(),
            volume_bits: volume.to_bits(),
        };
        match group_index.get(&key) {
            Some(&idx) => {
                groups[idx].quantity += purchase.quantity;
                groups[idx].dollars += purchase.dollars;
            }
            None => {
                group_index.insert(key.clone(), groups.len());
                groups.push(PurchaseGroup {
                    key,
                    quantity: purchase.quantity,
                    dollars: purchase.dollars,
                });
            }
        }
    }

    // Sales aggregation by (VendorNo, Brand).
    let mut sales_by_key: HashMap<(i64, i64), SalesGroup> = HashMap::new();
    for sale in &tables.sales {
        let entry = sales_by_key
            .entry((sale.vendor_no, sale.brand))
            .or_default();
        entry.quantity += sale.sales_quantity;
        entry.dollars += sale.sales_dollars;
        entry.price += sale.sales_price;
        entry.excise_tax += sale.excise_tax;
    }

    // Freight aggregation by vendor.
    let mut freight_by_vendor: HashMap<i64, f64> = HashMap::new();
    for invoice in &tables.vendor_invoices {
        *freight_by_vendor.entry(invoice.vendor_number).or_insert(0.0) += invoice.freight;
    }

    // Left-join the sales and freight sides onto each purchase group.
    let mut rows: Vec<MergedSummaryRow> = groups
        .into_iter()
        .map(|group| {
            let sales = sales_by_key.get(&(group.key.vendor_number, group.key.brand));
            MergedSummaryRow {
                vendor_number: group.key.vendor_number,
                vendor_name: group.key.vendor_name,
                brand: group.key.brand,
                description: group.key.description,
                purchase_price: f64::from_bits(group.key.purchase_price_bits),
                actual_price: f64::from_bits(group.key.actual_price_bits),
                volume: f64::from_bits(group.key.volume_bits),
                total_purchase_quantity: group.quantity,
                total_purchase_dollars: group.dollars,
                total_sales_quantity: sales.map(|s| s.quantity),
                total_sales_dollars: sales.map(|s| s.dollars),
                total_sales_price: sales.map(|s| s.price),
                total_excise_tax: sales.map(|s| s.excise_tax),
                freight_cost: freight_by_vendor
                    .get(&group.key.vendor_number)
                    .copied(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_purchase_dollars
            .partial_cmp(&a.total_purchase_dollars)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if dropped_non_positive > 0 || dropped_unlisted > 0 {
        log::debug!(
            "builder dropped {} non-positive-price purchases, {} without a price listing",
            dropped_non_positive,
            dropped_unlisted
        );
    }

    let mut pair_seen: HashMap<(i64, i64), usize> = HashMap::new();
    for row in &rows {
        *pair_seen.entry((row.vendor_number, row.brand)).or_insert(0) += 1;
    }
    let duplicate_pairs = pair_seen.values().filter(|&&n| n > 1).count();
    if duplicate_pairs > 0 {
        log::warn!(
            "{} (vendor, brand) pairs split across multiple price points",
            duplicate_pairs
        );
    }

    log::info!("merged {} vendor/brand summary rows", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{PriceListing, PurchaseRecord, SalesRecord, VendorInvoiceRecord};

    fn purchase(
        vendor: i64,
        name: &str,
        brand: i64,
        desc: &str,
        price: f64,
        qty: f64,
        dollars: f64,
    ) -> PurchaseRecord {
        PurchaseRecord {
            vendor_number: vendor,
            vendor_name: name.to_string(),
            brand,
            description: desc.to_string(),
            purchase_price: price,
            quantity: qty,
            dollars,
        }
    }

    fn sample_tables() -> RawTables {
        RawTables {
            purchases: vec![
                purchase(1, "Vendor A", 10, "Brand Ten", 7.25, 100.0, 725.0),
                purchase(1, "Vendor A", 10, "Brand Ten", 7.25, 50.0, 362.5),
                purchase(2, "Vendor B", 20, "Brand Twenty", 12.80, 40.0, 512.0),
                // excluded: non-positive purchase price
                purchase(2, "Vendor B", 20, "Brand Twenty", 0.0, 99.0, 0.0),
                // excluded: brand 30 has no price listing
                purchase(3, "Vendor C", 30, "Brand Thirty", 5.00, 10.0, 50.0),
            ],
            purchase_prices: vec![
                PriceListing {
                    brand: 10,
                    price: 11.99,
                    volume: 750.0,
                },
                PriceListing {
                    brand: 20,
                    price: 18.49,
                    volume: 1000.0,
                },
            ],
            vendor_invoices: vec![
                VendorInvoiceRecord {
                    vendor_number: 1,
                    freight: 12.5,
                },
                VendorInvoiceRecord {
                    vendor_number: 1,
                    freight: 7.5,
                },
            ],
            sales: vec![
                SalesRecord {
                    vendor_no: 1,
                    brand: 10,
                    sales_quantity: 90.0,
                    sales_dollars: 1079.1,
                    sales_price: 11.99,
                    excise_tax: 8.1,
                },
                SalesRecord {
                    vendor_no: 1,
                    brand: 10,
                    sales_quantity: 30.0,
                    sales_dollars: 359.7,
                    sales_price: 11.99,
                    excise_tax: 2.7,
                },
            ],
        }
    }

    #[test]
    fn purchases_aggregate_by_group() {
        let rows = build_summary(&sample_tables());
        assert_eq!(rows.len(), 2);
        let a = rows.iter().find(|r| r.vendor_number == 1).unwrap();
        assert!((a.total_purchase_quantity - 150.0).abs() < 1e-9);
        assert!((a.total_purchase_dollars - 1087.5).abs() < 1e-9);
        assert!((a.actual_price - 11.99).abs() < 1e-9);
    }

    #[test]
    fn non_positive_prices_and_unlisted_brands_are_excluded() {
        let rows = build_summary(&sample_tables());
        let b = rows.iter().find(|r| r.vendor_number == 2).unwrap();
        // The zero-price purchase's 99 units must not leak into the group
        assert!((b.total_purchase_quantity - 40.0).abs() < 1e-9);
        assert!(!rows.iter().any(|r| r.vendor_number == 3));
    }

    #[test]
    fn sales_side_left_joins() {
        let rows = build_summary(&sample_tables());
        let a = rows.iter().find(|r| r.vendor_number == 1).unwrap();
        assert_eq!(a.total_sales_quantity, Some(120.0));
        assert!((a.total_sales_dollars.unwrap() - 1438.8).abs() < 1e-9);
        // Vendor B has purchases but no sales: the left join leaves None
        let b = rows.iter().find(|r| r.vendor_number == 2).unwrap();
        assert_eq!(b.total_sales_dollars, None);
    }

    #[test]
    fn freight_sums_per_vendor_and_misses_stay_none() {
        let rows = build_summary(&sample_tables());
        let a = rows.iter().find(|r| r.vendor_number == 1).unwrap();
        assert_eq!(a.freight_cost, Some(20.0));
        let b = rows.iter().find(|r| r.vendor_number == 2).unwrap();
        assert_eq!(b.freight_cost, None);
    }

    #[test]
    fn freight_duplicates_across_brands_of_one_vendor() {
        let mut tables = sample_tables();
        tables.purchases.push(purchase(
            1, "Vendor A", 20, "Brand Twenty", 9.0, 10.0, 90.0,
        ));
        let rows = build_summary(&tables);
        let vendor_a: Vec<_> = rows.iter().filter(|r| r.vendor_number == 1).collect();
        assert_eq!(vendor_a.len(), 2);
        for row in vendor_a {
            assert_eq!(row.freight_cost, Some(20.0));
        }
    }

    #[test]
    fn output_sorted_descending_by_purchase_dollars() {
        let rows = build_summary(&sample_tables());
        for pair in rows.windows(2) {
            assert!(pair[0].total_purchase_dollars >= pair[1].total_purchase_dollars);
        }
        assert_eq!(rows[0].vendor_number, 1);
    }

    #[test]
    fn equal_dollar_rows_keep_first_occurrence_order() {
        let tables = RawTables {
            purchases: vec![
                purchase(5, "Vendor E", 50, "Brand Fifty", 2.0, 10.0, 100.0),
                purchase(4, "Vendor D", 40, "Brand Forty", 2.0, 10.0, 100.0),
            ],
            purchase_prices: vec![
                PriceListing {
                    brand: 50,
                    price: 3.0,
                    volume: 500.0,
                },
                PriceListing {
                    brand: 40,
                    price: 3.0,
                    volume: 500.0,
                },
            ],
            vendor_invoices: vec![],
            sales: vec![],
        };
        let rows = build_summary(&tables);
        assert_eq!(rows[0].vendor_number, 5);
        assert_eq!(rows[1].vendor_number, 4);
    }

    #[test]
    fn empty_tables_build_an_empty_summary() {
        let rows = build_summary(&RawTables::default());
        assert!(rows.is_empty());
    }
}
