//! Grouping folds over summary rows.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use pulse_core::VendorBrandSummary;

/// Group rows by a key, preserving the first-seen order of keys. The
/// builder emits rows in descending purchase-dollar order, and keeping
/// that order here is what makes every top-N tie-break deterministic.
pub fn group_rows<'a, K, F>(
    rows: &'a [VendorBrandSummary],
    key: F,
) -> Vec<(K, Vec<&'a VendorBrandSummary>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&VendorBrandSummary) -> K,
{
    let mut order: Vec<K> = Vec::new();
    let mut members: HashMap<K, Vec<&VendorBrandSummary>> = HashMap::new();

    for row in rows {
        let k = key(row);
        match members.entry(k.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(row),
            Entry::Vacant(entry) => {
                order.push(k);
                entry.insert(vec![row]);
            }
        }
    }

    order
        .into_iter()
        .map(|k| {
            let group = members.remove(&k).unwrap_or_default();
            (k, group)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(vendor_name: &str, brand: i64) -> VendorBrandSummary {
        VendorBrandSummary {
            vendor_number: 1,
            vendor_name: vendor_name.to_string(),
            brand,
            description: format!("Brand {brand}"),
            purchase_price: 1.0,
            actual_price: 2.0,
            volume: 750.0,
            total_purchase_quantity: 10.0,
            total_purchase_dollars: 10.0,
            total_sales_quantity: 10.0,
            total_sales_dollars: 20.0,
            total_sales_price: 2.0,
            total_excise_tax: 0.1,
            freight_cost: 1.0,
            gross_profit: 10.0,
            profit_margin: 50.0,
            stock_turnover: 1.0,
            sales_to_purchase_ratio: 2.0,
        }
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let rows = vec![row("Zeta", 1), row("Alpha", 2), row("Zeta", 3)];
        let grouped = group_rows(&rows, |r| r.vendor_name.clone());
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "Zeta");
        assert_eq!(grouped[0].1.len(), 2);
        assert_eq!(grouped[1].0, "Alpha");
    }
}
