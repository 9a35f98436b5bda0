// PhotoDex - core/store.rs
//
// Process-wide index store with a single-writer/many-reader contract.
//
// The index worker is the only writer; every HTTP handler is a reader.
// Publication is an atomic pointer swap (`ArcSwap`), so readers never lock
// and never observe a partially built snapshot. Progress counters are plain
// atomics for the same reason.

use crate::core::model::{ScanStatus, Snapshot};
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared state for the index: the current snapshot plus scan progress.
///
/// Write granularity is deliberately coarse: the worker publishes the
/// `scanned` counter and partial snapshots every N items (see the
/// `DEFAULT_PROGRESS_INTERVAL` / `DEFAULT_PUBLISH_INTERVAL` tunables) rather
/// than per item, trading reader freshness against write traffic and repeat
/// sort work.
///
/// A reader that holds an `Arc<Snapshot>` from `snapshot()` keeps a
/// temporally consistent view for as long as it likes: superseded snapshots
/// are never mutated, only dropped when the last reader releases them.
#[derive(Debug)]
pub struct IndexStore {
    /// Currently published snapshot. Swapped whole, never mutated in place.
    snapshot: ArcSwap<Snapshot>,

    /// Root entries processed so far. Published coarsely by the worker.
    scanned: AtomicUsize,

    /// Root entries discovered at scan start. Fixed once scanning begins.
    total: AtomicUsize,

    /// Current `ScanStatus`, stored as its `u8` repr.
    status: AtomicU8,

    /// Failure cause, written once by the worker before the `failed` status
    /// becomes visible. Never written again afterwards.
    failure: Mutex<Option<String>>,
}

/// Point-in-time copy of the progress counters, as read by the status API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub scanned: usize,
    pub total: usize,
    pub status: ScanStatus,

    /// Failure cause; `Some` only when `status` is `Failed`.
    pub error: Option<String>,
}

impl IndexStore {
    /// Create a store holding the empty snapshot, status `init`.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::empty()),
            scanned: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            status: AtomicU8::new(ScanStatus::Init as u8),
            failure: Mutex::new(None),
        }
    }

    // -------------------------------------------------------------------------
    // Reader interface
    // -------------------------------------------------------------------------

    /// The snapshot visible at call time.
    ///
    /// Queries must fetch this once and iterate the returned `Arc`; the
    /// store may be republished mid-query, and re-fetching would break the
    /// stable-view guarantee.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Number of records in the currently published snapshot.
    pub fn record_count(&self) -> usize {
        self.snapshot.load().len()
    }

    /// Current status value.
    pub fn status(&self) -> ScanStatus {
        // Acquire pairs with the Release in the writer's terminal-status
        // stores, so the final counters and failure cause are visible once a
        // terminal status is observed.
        ScanStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Copy of the progress counters, plus the failure cause if the scan
    /// has failed.
    pub fn progress(&self) -> ProgressView {
        let status = self.status();
        let error = if status == ScanStatus::Failed {
            // A poisoned mutex means the worker panicked mid-write; the
            // stored cause is still the best answer the reader has.
            self.failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        } else {
            None
        };
        ProgressView {
            scanned: self.scanned.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            status,
            error,
        }
    }

    /// True while the scan has not reached a terminal status.
    pub fn is_indexing(&self) -> bool {
        !self.status().is_terminal()
    }

    // -------------------------------------------------------------------------
    // Writer interface (index worker only)
    // -------------------------------------------------------------------------

    /// Atomically replace the published snapshot.
    ///
    /// Readers obtain either the previous or the new snapshot in full,
    /// never a mixture.
    pub fn publish(&self, snapshot: Snapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    /// Record the entry total and move to `scanning`.
    pub fn begin_scan(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.status
            .store(ScanStatus::Scanning as u8, Ordering::Release);
    }

    /// Publish the running `scanned` counter.
    pub fn set_scanned(&self, scanned: usize) {
        self.scanned.store(scanned, Ordering::Relaxed);
    }

    /// Terminal success: settle `scanned` to `total` and move to `done`.
    pub fn finish(&self) {
        let total = self.total.load(Ordering::Relaxed);
        self.scanned.store(total, Ordering::Relaxed);
        self.status.store(ScanStatus::Done as u8, Ordering::Release);
    }

    /// Terminal failure: record the cause, then make `failed` visible.
    ///
    /// The cause is written before the status store so any reader that
    /// observes `failed` also finds the cause.
    pub fn fail(&self, cause: String) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(cause);
        self.status
            .store(ScanStatus::Failed as u8, Ordering::Release);
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
