// PhotoDex - core/query.rs
//
// Query and pagination engine over a snapshot.
// Core layer: pure logic, no I/O. A call operates on the one snapshot
// reference it is given and never re-fetches from the store, so its view
// is stable even while the index worker publishes concurrently.

use crate::core::model::{DatedRecord, Snapshot};
use crate::util::constants::DEFAULT_PAGE_SIZE;
use chrono::{Days, NaiveDate};

/// Parameters for one `list` call. All filters are optional; the defaults
/// reproduce an unfiltered first page.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Zero-based page index.
    pub page: usize,

    /// Page length. Expected > 0; the HTTP layer defaults it to
    /// `DEFAULT_PAGE_SIZE` when absent.
    pub size: usize,

    /// Case-insensitive keyword. Empty disables keyword filtering.
    pub keyword: String,

    /// When set, only records dated within the last `days` days (relative
    /// to the `today` argument of `list`) are returned.
    pub days: Option<u32>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            keyword: String::new(),
            days: None,
        }
    }
}

/// One entry of a result page: the folder label and its (possibly
/// keyword-filtered) image filenames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    pub images: Vec<String>,
}

/// A page of results plus whether further pages exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub entries: Vec<ListEntry>,
    pub has_more: bool,
}

/// Filter and paginate a snapshot.
///
/// Records are visited in the snapshot's stored date-descending order.
/// When a day cutoff is active, iteration stops at the first record older
/// than the cutoff; every later record is older still, by the snapshot's
/// sort invariant.
///
/// Keyword matching is case-insensitive. A keyword hit on the folder label
/// includes the record with all its images; otherwise a hit on individual
/// filenames includes a derived entry with just the matching images.
///
/// `today` is supplied by the caller so the cutoff is testable against
/// fixed dates.
pub fn list(snapshot: &Snapshot, params: &ListParams, today: NaiveDate) -> ListPage {
    let cutoff = params.days.map(|days| {
        today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN)
    });
    let keyword = params.keyword.to_lowercase();

    // The filtered sequence, in snapshot order. `None` images means "all of
    // the record's images"; cloning is deferred to the page slice below.
    let mut filtered: Vec<(&DatedRecord, Option<Vec<String>>)> = Vec::new();

    for record in snapshot.records() {
        if let Some(cutoff) = cutoff {
            if record.date < cutoff {
                break; // Early exit: all remaining records are older.
            }
        }

        if keyword.is_empty() {
            filtered.push((record, None));
            continue;
        }

        if record.label.to_lowercase().contains(&keyword) {
            filtered.push((record, None));
            continue;
        }

        let matching: Vec<String> = record
            .images
            .iter()
            .filter(|image| image.to_lowercase().contains(&keyword))
            .cloned()
            .collect();
        if !matching.is_empty() {
            filtered.push((record, Some(matching)));
        }
    }

    let start = params.page.saturating_mul(params.size);
    let end = start.saturating_add(params.size);

    let entries = filtered
        .iter()
        .skip(start)
        .take(params.size)
        .map(|(record, images)| ListEntry {
            label: record.label.clone(),
            images: images.clone().unwrap_or_else(|| record.images.clone()),
        })
        .collect();

    ListPage {
        entries,
        has_more: end < filtered.len(),
    }
}

// =============================================================================
// Tests
// =============================================================================
