// PhotoDex - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no HTTP,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDate;
use serde::Serialize;

// =============================================================================
// Dated record (one indexed folder)
// =============================================================================

/// One indexed folder: its calendar date, original folder name, and the
/// image filenames it contains.
///
/// Immutable once constructed. `label` is the folder name exactly as it
/// appears on disk; it is what keyword searches match against and what the
/// API returns, so it is never normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedRecord {
    /// Calendar date parsed from the folder name.
    pub date: NaiveDate,

    /// Original folder name, verbatim.
    pub label: String,

    /// Image filenames, sorted in descending lexicographic order.
    pub images: Vec<String>,
}

// =============================================================================
// Snapshot (the published index)
// =============================================================================

/// An immutable, fully sorted view of the index at a point in time.
///
/// Records are strictly sorted by date descending; records sharing a date
/// are ordered by folder label ascending so the order is deterministic
/// regardless of directory-listing order. A new Snapshot fully replaces the
/// old one at the store; a published Snapshot is never mutated.
///
/// The descending sort is load-bearing: the query engine stops iterating as
/// soon as it sees a record older than the day cutoff.
#[derive(Debug, Default)]
pub struct Snapshot {
    records: Vec<DatedRecord>,
}

impl Snapshot {
    /// The empty index, published at process start before the scan begins.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a Snapshot from records in arbitrary order.
    ///
    /// This is the single place the sort invariant is established: date
    /// descending, then label ascending.
    pub fn from_unsorted(mut records: Vec<DatedRecord>) -> Self {
        records.sort_unstable_by(|a, b| b.date.cmp(&a.date).then_with(|| a.label.cmp(&b.label)));
        Self { records }
    }

    /// The records in their stored (date-descending) order.
    pub fn records(&self) -> &[DatedRecord] {
        &self.records
    }

    /// Number of indexed folders.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Scan status
// =============================================================================

/// Lifecycle of the one-shot background scan.
///
/// Stored as a single `u8` in the store so readers never lock. `Done` and
/// `Failed` are terminal; the scan is never restarted within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ScanStatus {
    /// Process started, scan thread not yet counting entries.
    Init = 0,

    /// Root entries counted; records are being built and published.
    Scanning = 1,

    /// Final snapshot published, all counters settled.
    Done = 2,

    /// The root could not be enumerated; the cause is available from the
    /// store. The index stays at whatever was last published.
    Failed = 3,
}

impl ScanStatus {
    /// Decode a status previously stored as a `u8`. Unknown values map to
    /// `Init` (they cannot occur from within this process).
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Scanning,
            2 => Self::Done,
            3 => Self::Failed,
            _ => Self::Init,
        }
    }

    /// Wire-format string, as exposed by `/api/status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Scanning => "scanning",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// True once the scan has reached a final state (done or failed).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Per-folder scan outcomes
// =============================================================================

/// Why a root entry produced no record.
///
/// Skips are expected data, not errors: a gallery root commonly holds
/// stray files and folders that are not date-named image sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is a file or symlink, not a directory.
    NotADirectory,

    /// The folder name does not parse as a calendar date.
    InvalidDate,

    /// The folder contains no files with an image extension.
    NoImages,

    /// The folder's children could not be enumerated (permissions, or the
    /// folder was deleted mid-scan).
    Unreadable,
}

impl SkipReason {
    pub fn label(self) -> &'static str {
        match self {
            Self::NotADirectory => "not a directory",
            Self::InvalidDate => "invalid date",
            Self::NoImages => "no images",
            Self::Unreadable => "unreadable",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of examining one immediate entry of the root directory.
#[derive(Debug)]
pub enum FolderOutcome {
    /// The entry is a valid dated image folder.
    Indexed(DatedRecord),

    /// The entry was excluded; `name` is kept for logging.
    Skipped { name: String, reason: SkipReason },
}

// =============================================================================
// Scan report
// =============================================================================

/// Summary counts for a completed scan run.
///
/// Returned by the scan loop so tests can assert skip counts per reason
/// instead of inferring them from what is absent in the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Folders that produced a record.
    pub indexed: usize,

    /// Root entries that were not directories.
    pub not_directory: usize,

    /// Directories whose name did not parse as a date.
    pub invalid_date: usize,

    /// Dated directories containing no image files.
    pub no_images: usize,

    /// Directories whose children could not be listed.
    pub unreadable: usize,
}

impl ScanReport {
    /// Tally one skip outcome.
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NotADirectory => self.not_directory += 1,
            SkipReason::InvalidDate => self.invalid_date += 1,
            SkipReason::NoImages => self.no_images += 1,
            SkipReason::Unreadable => self.unreadable += 1,
        }
    }

    /// Total entries skipped for any reason.
    pub fn skipped_total(&self) -> usize {
        self.not_directory + self.invalid_date + self.no_images + self.unreadable
    }
}

// =============================================================================
// Tests
// =============================================================================
