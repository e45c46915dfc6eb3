//! Unit price by order size: equal-frequency Small/Medium/Large buckets
//! over total purchase quantity.

use std::fmt;

use pulse_core::{ratio_or_zero, VendorBrandSummary};
use serde::Serialize;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::stats::{distinct_count, mean, quantile};

/// Quantile cut-points cannot be formed below this many distinct values.
const MIN_DISTINCT_QUANTITIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderSize {
    Small,
    Medium,
    Large,
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSize::Small => write!(f, "Small"),
            OrderSize::Medium => write!(f, "Medium"),
            OrderSize::Large => write!(f, "Large"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSizeBucket {
    pub order_size: OrderSize,
    pub avg_unit_price: f64,
    pub order_count: usize,
}

/// Partition the filtered rows into three equal-frequency buckets by
/// TotalPurchaseQuantity (cut at the 33.3rd and 66.7th percentiles) and
/// report the mean unit purchase price per bucket. Bucket counts always
/// sum to the filtered row count.
pub fn bulk_purchase_analysis(
    rows: &[VendorBrandSummary],
) -> AnalyticsResult<Vec<OrderSizeBucket>> {
    if rows.is_empty() {
        return Err(AnalyticsError::NoDataAvailable);
    }

    let quantities: Vec<f64> = rows.iter().map(|r| r.total_purchase_quantity).collect();
    let distinct = distinct_count(&quantities);
    if distinct < MIN_DISTINCT_QUANTITIES {
        return Err(AnalyticsError::InsufficientDistinctValues {
            field: "TotalPurchaseQuantity",
            distinct,
            required: MIN_DISTINCT_QUANTITIES,
        });
    }

    let small_cut = quantile(&quantities, 1.0 / 3.0);
    let medium_cut = quantile(&quantities, 2.0 / 3.0);

    let mut unit_prices: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for row in rows {
        let unit_price = ratio_or_zero(row.total_purchase_dollars, row.total_purchase_quantity);
        let bucket = if row.total_purchase_quantity <= small_cut {
            0
        } else if row.total_purchase_quantity <= medium_cut {
            1
        } else {
            2
        };
        unit_prices[bucket].push(unit_price);
    }

    let sizes = [OrderSize::Small, OrderSize::Medium, OrderSize::Large];
    Ok(sizes
        .iter()
        .zip(unit_prices.iter())
        .map(|(&order_size, prices)| OrderSizeBucket {
            order_size,
            avg_unit_price: mean(prices),
            order_count: prices.len(),
        })
        .collect())
}
