//! Vendor share of total purchase dollars, with a Pareto-style running
//! cumulative over the top ranks.

use pulse_core::{ratio_or_zero, VendorBrandSummary};
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::group::group_rows;
use crate::queries::top_vendors::TOP_VENDOR_COUNT;
use crate::stats::sort_desc_by;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorContribution {
    pub vendor_name: String,
    pub purchase_dollars: f64,
    pub contribution_pct: f64,
    pub cumulative_pct: f64,
}

/// Each top vendor's share is taken against the grand total across ALL
/// vendors, while the cumulative runs over the top 10 only — so it is not
/// guaranteed to reach 100%. That asymmetry is the upstream dashboard's
/// observed behavior and is preserved as-is.
pub fn vendor_purchase_contribution(
    rows: &[VendorBrandSummary],
) -> AnalyticsResult<Vec<VendorContribution>> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let grand_total: f64 = rows.iter().map(|r| r.total_purchase_dollars).sum();

    let mut totals: Vec<(String, f64)> = group_rows(rows, |r| r.vendor_name.clone())
        .into_iter()
        .map(|(vendor_name, members)| {
            let purchases: f64 = members.iter().map(|r| r.total_purchase_dollars).sum();
            (vendor_name, purchases)
        })
        .collect();

    sort_desc_by(&mut totals, |&(_, purchases)| purchases);
    totals.truncate(TOP_VENDOR_COUNT);

    let mut cumulative = 0.0;
    let contributions = totals
        .into_iter()
        .map(|(vendor_name, purchase_dollars)| {
            let contribution_pct = ratio_or_zero(purchase_dollars, grand_total) * 100.0;
            cumulative += contribution_pct;
            VendorContribution {
                vendor_name,
                purchase_dollars,
                contribution_pct,
                cumulative_pct: cumulative,
            }
        })
        .collect();

    Ok(contributions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_fixtures::perf_row;

    #[test]
    fn shares_are_taken_against_the_grand_total() {
        let rows = vec![
            perf_row("Vendor A", "Brand 1", 1000.0, 1500.0, 100.0, 90.0, 7.0),
            perf_row("Vendor A", "Brand 2", 500.0, 700.0, 50.0, 40.0, 6.0),
            perf_row("Vendor B", "Brand 1", 2000.0, 2800.0, 200.0, 150.0, 9.0),
        ];
        let contributions = vendor_purchase_contribution(&rows).unwrap();
        assert_eq!(contributions.len(), 2);

        // Vendor B leads: 2000 of the 3500 grand total
        assert_eq!(contributions[0].vendor_name, "Vendor B");
        assert!((contributions[0].purchase_dollars - 2000.0).abs() < 1e-9);
        assert!((contributions[0].contribution_pct - 2000.0 / 3500.0 * 100.0).abs() < 1e-9);

        assert_eq!(contributions[1].vendor_name, "Vendor A");
        assert!((contributions[1].purchase_dollars - 1500.0).abs() < 1e-9);
        assert!((contributions[1].cumulative_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_is_non_decreasing_and_stops_at_the_top_ten() {
        let rows: Vec<_> = (0..12)
            .map(|i| {
                perf_row(
                    &format!("Vendor {i:02}"),
                    &format!("Brand {i}"),
                    100.0 + i as f64,
                    300.0,
                    10.0,
                    8.0,
                    5.0,
                )
            })
            .collect();
        let contributions = vendor_purchase_contribution(&rows).unwrap();
        assert_eq!(contributions.len(), 10);
        for pair in contributions.windows(2) {
            assert!(pair[1].cumulative_pct >= pair[0].cumulative_pct);
        }
        // Two vendors fall outside the top 10, so the cumulative stays short
        let last = contributions.last().unwrap();
        assert!(last.cumulative_pct < 100.0);
    }

    #[test]
    fn empty_collection_is_no_data() {
        assert_eq!(
            vendor_purchase_contribution(&[]),
            Err(AnalyticsError::NoDataAvailable)
        );
    }
}
