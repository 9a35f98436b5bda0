// PhotoDex - core/scan.rs
//
// Root-directory enumeration and per-folder image scanning.
//
// Architecture note: this module uses `walkdir` (depth-pinned to immediate
// children) as the filesystem enumeration boundary. It reads only directory
// listings and entry metadata, never file contents; image bytes are served
// straight from disk by the server layer.
//
// Per-folder problems are non-fatal data (`SkipReason`); only a failure to
// enumerate the root itself is an error.

use crate::core::date::parse_folder_date;
use crate::core::model::{DatedRecord, FolderOutcome, SkipReason};
use crate::util::constants::IMAGE_EXTENSIONS;
use crate::util::error::ScanError;
use std::io;
use std::path::{Path, PathBuf};

// =============================================================================
// Root listing
// =============================================================================

/// One immediate entry of the root directory, captured once at scan start.
#[derive(Debug, Clone)]
pub struct RootEntry {
    /// Full path to the entry.
    pub path: PathBuf,

    /// Entry name. Non-UTF-8 names are lossily converted; they cannot parse
    /// as dates and end up skipped.
    pub name: String,

    /// Whether the entry is a directory (symlinks are not followed).
    pub is_dir: bool,
}

/// List the immediate entries of `root`, in directory-listing order.
///
/// The listing happens exactly once per process; its length becomes the
/// `total` progress counter. Individual entries that cannot be stat'ed are
/// dropped from the listing with a debug log. Only root-level problems are
/// fatal: a missing root, a non-directory root, or a failure to read the
/// root listing itself.
pub fn list_root(root: &Path) -> Result<Vec<RootEntry>, ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ScanError::RootUnreadable {
                path: root.to_path_buf(),
                source: e,
            });
        }
    }

    let mut entries = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        match entry {
            Ok(e) => {
                let name = e.file_name().to_string_lossy().into_owned();
                entries.push(RootEntry {
                    is_dir: e.file_type().is_dir(),
                    path: e.path().to_path_buf(),
                    name,
                });
            }
            Err(e) => {
                // A failure on the root itself (e.g. it vanished between the
                // metadata check and the walk) aborts the scan.
                if e.path() == Some(root) {
                    return Err(ScanError::RootUnreadable {
                        path: root.to_path_buf(),
                        source: e.into(),
                    });
                }
                tracing::debug!(error = %e, "Root entry inaccessible, dropped from listing");
            }
        }
    }

    Ok(entries)
}

// =============================================================================
// Per-folder scanning
// =============================================================================

/// Examine one root entry and decide whether it becomes a record.
///
/// A record is produced only for a directory whose name parses as a date and
/// which directly contains at least one image file. Every exclusion is
/// reported as a named skip reason rather than silently discarded.
pub fn scan_entry(entry: &RootEntry) -> FolderOutcome {
    let skipped = |reason| FolderOutcome::Skipped {
        name: entry.name.clone(),
        reason,
    };

    if !entry.is_dir {
        return skipped(SkipReason::NotADirectory);
    }

    let Some(date) = parse_folder_date(&entry.name) else {
        return skipped(SkipReason::InvalidDate);
    };

    let images = match collect_images(&entry.path) {
        Ok(images) => images,
        Err(e) => {
            tracing::debug!(folder = %entry.path.display(), error = %e, "Cannot list folder children");
            return skipped(SkipReason::Unreadable);
        }
    };

    if images.is_empty() {
        return skipped(SkipReason::NoImages);
    }

    FolderOutcome::Indexed(DatedRecord {
        date,
        label: entry.name.clone(),
        images,
    })
}

/// List the image filenames directly inside `dir`, sorted descending.
///
/// Only files whose extension is in `IMAGE_EXTENSIONS` (case-insensitive)
/// are kept. Subdirectories are not descended into. Any enumeration error
/// fails the whole folder; the caller skips it and the scan continues.
fn collect_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut images = Vec::new();

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue; // Non-UTF-8 filename; cannot be served by the API.
        };
        if is_image_file(name) {
            images.push(name.to_string());
        }
    }

    // Descending lexicographic order: newest-style names (higher sequence
    // numbers) first, matching the published record contract.
    images.sort_unstable_by(|a, b| b.cmp(a));
    Ok(images)
}

/// Returns true if `name` has one of the recognised image extensions.
fn is_image_file(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
}

// =============================================================================
// Tests
// =============================================================================
