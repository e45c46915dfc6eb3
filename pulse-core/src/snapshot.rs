//! Versioned, atomically replaceable summary snapshots.
//!
//! The collection is built once per batch run and is immutable afterwards.
//! Readers share it through an `Arc`; a reload swaps the whole snapshot
//! reference, so readers in flight keep the snapshot they started with and
//! never observe a half-updated collection.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::error::CoreResult;
use crate::summary::VendorBrandSummary;

/// An immutable batch of cleaned summary rows.
#[derive(Debug, Clone)]
pub struct SummarySnapshot {
    version: u64,
    built_at: DateTime<Utc>,
    rows: Vec<VendorBrandSummary>,
}

impl SummarySnapshot {
    pub fn new(version: u64, rows: Vec<VendorBrandSummary>) -> Self {
        SummarySnapshot {
            version,
            built_at: Utc::now(),
            rows,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Every row, in builder output order.
    pub fn rows(&self) -> &[VendorBrandSummary] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The standing consumer-facing view: rows with positive gross profit,
    /// positive margin, and positive sales quantity. Applied before any
    /// analytics ever sees the collection.
    pub fn performance_rows(&self) -> Vec<VendorBrandSummary> {
        self.rows
            .iter()
            .filter(|r| {
                r.gross_profit > 0.0 && r.profit_margin > 0.0 && r.total_sales_quantity > 0.0
            })
            .cloned()
            .collect()
    }
}

/// Holds the current snapshot and swaps it wholesale on reload.
pub struct SnapshotStore {
    current: RwLock<Arc<SummarySnapshot>>,
}

impl SnapshotStore {
    pub fn new(initial: SummarySnapshot) -> Self {
        SnapshotStore {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The current snapshot. Cheap: clones the `Arc`, not the rows.
    pub fn current(&self) -> Arc<SummarySnapshot> {
        Arc::clone(&read_lock(&self.current))
    }

    /// Replace the snapshot with a new batch of rows, bumping the version.
    pub fn replace(&self, rows: Vec<VendorBrandSummary>) -> u64 {
        let mut guard = write_lock(&self.current);
        let next_version = guard.version() + 1;
        *guard = Arc::new(SummarySnapshot::new(next_version, rows));
        log::info!(
            "snapshot replaced: version {} with {} rows",
            next_version,
            guard.len()
        );
        next_version
    }

    /// Rebuild through `build` and swap only on success. On failure the
    /// prior snapshot remains authoritative.
    pub fn reload_with<F>(&self, build: F) -> CoreResult<u64>
    where
        F: FnOnce() -> CoreResult<Vec<VendorBrandSummary>>,
    {
        let rows = build()?;
        Ok(self.replace(rows))
    }
}

// Lock poisoning means a panic mid-swap; the snapshot Arc itself is always
// in a consistent state, so recover the guard rather than propagate.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
