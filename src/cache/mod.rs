//! Lazy, memory-sensitive cache over the three issue partitions
//!
//! Each partition is held through a `Weak` handle: callers get an
//! `Arc<Report>` and the cache keeps a downgraded reference, so a
//! partition stays resident exactly as long as someone uses it. Once
//! the last `Arc` drops the cell expires and the next `get` rehydrates
//! the partition from the authoritative `ResultStore`.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use crate::core::Report;
use crate::storage::{PartitionKind, ResultStore};

/// Weakly referenced partition cells of one analysis result.
///
/// A single lock guards all three cells: the partitions are typically
/// read together and one lock avoids ordering hazards. The whole cache
/// is transient state; a result reloaded from storage starts with a
/// default (empty, store-less) cache that must be re-attached via
/// [`PartitionCache::attach`].
#[derive(Debug, Default)]
pub struct PartitionCache {
    cells: Mutex<Cells>,
}

#[derive(Debug, Default)]
struct Cells {
    store: Option<ResultStore>,
    outstanding: Weak<Report>,
    new: Weak<Report>,
    fixed: Weak<Report>,
}

impl Cells {
    fn slot_mut(&mut self, kind: PartitionKind) -> &mut Weak<Report> {
        match kind {
            PartitionKind::Outstanding => &mut self.outstanding,
            PartitionKind::New => &mut self.new,
            PartitionKind::Fixed => &mut self.fixed,
        }
    }
}

impl PartitionCache {
    pub fn new(store: ResultStore) -> Self {
        let cache = PartitionCache::default();
        cache.cells.lock().store = Some(store);
        cache
    }

    /// Bind (or re-bind) the backing store, e.g. after the owning
    /// result was rehydrated from durable storage.
    pub fn attach(&self, store: ResultStore) {
        self.cells.lock().store = Some(store);
    }

    /// Record a freshly computed partition without taking ownership
    pub fn seed(&self, kind: PartitionKind, report: &Arc<Report>) {
        *self.cells.lock().slot_mut(kind) = Arc::downgrade(report);
    }

    /// Return the partition, rehydrating from the store when the weak
    /// cell has expired.
    ///
    /// Never fails: a missing store or unreadable blob degrades to an
    /// empty report. Repeated calls without eviction return the same
    /// `Arc`.
    pub fn get(&self, kind: PartitionKind) -> Arc<Report> {
        let mut cells = self.cells.lock();

        if let Some(live) = cells.slot_mut(kind).upgrade() {
            return live;
        }

        let report = match &cells.store {
            Some(store) => store.load_or_empty(kind),
            None => {
                log::error!("No store attached, returning empty {kind} issues");
                Report::default()
            }
        };

        let live = Arc::new(report);
        *cells.slot_mut(kind) = Arc::downgrade(&live);
        live
    }
}
