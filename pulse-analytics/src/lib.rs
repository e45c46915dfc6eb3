//! Stateless analytical queries over the vendor/brand performance summary.
//!
//! Every query is a pure function over the standing-filtered snapshot view
//! (`SummarySnapshot::performance_rows`): no mutation, no shared state, no
//! blocking. Concurrent invocations are independent, and a failure in one
//! query never touches the snapshot other queries read.
//!
//! A shared tie-break rule applies to every ranking: sort by the stated
//! metric descending with a stable sort, so ties resolve to the builder's
//! output order.

pub mod error;
pub mod group;
pub mod queries;
pub mod stats;

pub use error::{AnalyticsError, AnalyticsResult};
pub use queries::bulk_purchases::{bulk_purchase_analysis, OrderSize, OrderSizeBucket};
pub use queries::inventory::{
    inventory_analysis, InventoryAnalysis, VendorLockedCapital, VendorTurnover,
};
pub use queries::margin_comparison::{profit_margin_comparison, MarginComparison, MarginStats};
pub use queries::summary_stats::{summary_stats, SummaryStats};
pub use queries::top_brands::{top_brands_by_sales, BrandSales};
pub use queries::top_vendors::{top_vendors_by_sales, VendorSales};
pub use queries::vendor_contribution::{vendor_purchase_contribution, VendorContribution};
