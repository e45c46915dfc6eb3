//! Core data model and batch summary construction for vendor performance
//! analytics.
//!
//! The flow is strictly forward: four raw CSV tables are loaded into typed
//! records (`loader`), merged into one row per (vendor, brand) pair
//! (`summary`), normalized and enriched with derived financial ratios
//! (`clean`), and published as an immutable, atomically replaceable
//! snapshot (`snapshot`) that any number of readers may share.

pub mod clean;
pub mod error;
pub mod export;
pub mod loader;
pub mod snapshot;
pub mod summary;

pub use clean::{finalize, ratio_or_zero};
pub use error::{CoreError, CoreResult};
pub use loader::{PriceListing, PurchaseRecord, RawTables, SalesRecord, VendorInvoiceRecord};
pub use snapshot::{SnapshotStore, SummarySnapshot};
pub use summary::{build_summary, MergedSummaryRow, VendorBrandSummary};
