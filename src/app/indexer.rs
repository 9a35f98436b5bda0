// PhotoDex - app/indexer.rs
//
// Index scan lifecycle. Runs the one-shot scan on a dedicated background
// thread, publishing progress and partial snapshots to the shared store.
//
// Architecture:
//   - `spawn` is called once at process launch; the thread is never
//     restarted (no re-scan within a process lifetime).
//   - The worker is the store's only writer. Request handlers read
//     concurrently through the same `Arc<IndexStore>` and never block on
//     the scan.
//   - Per-folder failures are skip outcomes; only a root-level failure is
//     fatal, and it surfaces as the store's `failed` status.

use crate::core::model::{DatedRecord, FolderOutcome, ScanReport, Snapshot};
use crate::core::scan;
use crate::core::store::IndexStore;
use crate::util::constants::{DEFAULT_PROGRESS_INTERVAL, DEFAULT_PUBLISH_INTERVAL};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

/// Batch tunables for the scan loop.
///
/// Both intervals trade write traffic against reader freshness: the
/// `scanned` counter is published every `progress_interval` entries, and a
/// partial snapshot (sorted copy of the working list) every
/// `publish_interval` new records. The final snapshot and settled counters
/// are always published regardless.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Entries between `scanned` counter publications.
    pub progress_interval: usize,

    /// New records between partial snapshot publications.
    pub publish_interval: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            publish_interval: DEFAULT_PUBLISH_INTERVAL,
        }
    }
}

/// Spawn the background index worker for `root`.
///
/// Returns the thread handle; callers other than tests normally let the
/// thread run unjoined for the process lifetime.
pub fn spawn(root: PathBuf, store: Arc<IndexStore>, config: IndexConfig) -> JoinHandle<ScanReport> {
    std::thread::spawn(move || run(&root, &store, &config))
}

/// Full scan pipeline: list the root once, scan each entry, batch-publish
/// progress and partial snapshots, publish the final snapshot.
///
/// Synchronous; `spawn` wraps it in a thread. Exposed separately so tests
/// can drive a complete scan to its terminal state deterministically.
pub fn run(root: &Path, store: &IndexStore, config: &IndexConfig) -> ScanReport {
    let started = Instant::now();

    // Intervals are tunables; zero would mean publish-per-item and a modulo
    // by zero, so clamp to 1.
    let progress_interval = config.progress_interval.max(1);
    let publish_interval = config.publish_interval.max(1);

    let entries = match scan::list_root(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(root = %root.display(), error = %e, "Index scan aborted");
            store.fail(e.to_string());
            return ScanReport::default();
        }
    };

    store.begin_scan(entries.len());
    tracing::info!(root = %root.display(), total = entries.len(), "Index scan started");

    let mut report = ScanReport::default();
    let mut records: Vec<DatedRecord> = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let processed = idx + 1;
        if processed % progress_interval == 0 {
            store.set_scanned(processed);
        }

        match scan::scan_entry(entry) {
            FolderOutcome::Indexed(record) => {
                records.push(record);
                report.indexed += 1;

                // Partial publish: readers see a growing, always-sorted
                // index well before the scan finishes.
                if records.len() % publish_interval == 0 {
                    store.publish(Snapshot::from_unsorted(records.clone()));
                    store.set_scanned(processed);
                    tracing::debug!(records = records.len(), "Partial snapshot published");
                }
            }
            FolderOutcome::Skipped { name, reason } => {
                report.record_skip(reason);
                tracing::trace!(folder = name.as_str(), reason = %reason, "Entry skipped");
            }
        }
    }

    // The definitive snapshot; also covers the tail shorter than one batch.
    store.publish(Snapshot::from_unsorted(records));
    store.finish();

    tracing::info!(
        indexed = report.indexed,
        skipped = report.skipped_total(),
        not_directory = report.not_directory,
        invalid_date = report.invalid_date,
        no_images = report.no_images,
        unreadable = report.unreadable,
        duration_ms = started.elapsed().as_millis() as u64,
        "Index scan complete"
    );

    report
}

// =============================================================================
// Tests
// =============================================================================
