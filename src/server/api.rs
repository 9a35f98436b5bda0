// PhotoDex - server/api.rs
//
// JSON API handlers: /api/status and /api/list.
//
// Handlers only read through the store handle; the index worker is the
// sole writer. A list call fetches the snapshot reference exactly once, so
// its view is stable even if the worker publishes mid-request.

use crate::core::query::{self, ListParams};
use crate::core::store::IndexStore;
use crate::server::AppState;
use crate::util::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

// =============================================================================
// Wire types
// =============================================================================

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// True until the scan reaches a terminal status (done or failed).
    pub indexing: bool,

    pub progress: ProgressBody,

    /// Number of records in the currently published snapshot.
    pub db_size: usize,
}

#[derive(Debug, Serialize)]
pub struct ProgressBody {
    pub scanned: usize,
    pub total: usize,

    /// "init" | "scanning" | "done" | "failed".
    pub status: &'static str,

    /// Failure cause; present only when status is "failed".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw query parameters of `GET /api/list`.
///
/// `page` and `size` are typed: non-numeric values fail extraction and the
/// caller gets a 400. `days` is deliberately a string: the front end sends
/// `days=` for "no filter", and anything non-numeric silently disables the
/// cutoff rather than erroring.
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub q: Option<String>,
    pub days: Option<String>,
}

/// Body of `GET /api/list`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<ListItemBody>,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct ListItemBody {
    /// The folder label, verbatim (the front end displays it as the
    /// section date heading and uses it as the image URL prefix).
    pub date: String,

    pub images: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let body = status_body(&state.store);
    ([(header::CACHE_CONTROL, "no-cache")], Json(body))
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let body = list_body(&state.store, params, today);
    ([(header::CACHE_CONTROL, "no-cache")], Json(body))
}

// =============================================================================
// Body construction (pure; unit-tested without HTTP plumbing)
// =============================================================================

fn status_body(store: &IndexStore) -> StatusResponse {
    let progress = store.progress();
    StatusResponse {
        indexing: !progress.status.is_terminal(),
        db_size: store.record_count(),
        progress: ProgressBody {
            scanned: progress.scanned,
            total: progress.total,
            status: progress.status.as_str(),
            error: progress.error,
        },
    }
}

fn list_body(store: &IndexStore, raw: ListQueryParams, today: NaiveDate) -> ListResponse {
    let params = ListParams {
        page: raw.page.unwrap_or(DEFAULT_PAGE),
        size: raw.size.unwrap_or(DEFAULT_PAGE_SIZE),
        keyword: raw.q.unwrap_or_default(),
        days: parse_days(raw.days.as_deref()),
    };

    let snapshot = store.snapshot();
    let page = query::list(&snapshot, &params, today);

    ListResponse {
        data: page
            .entries
            .into_iter()
            .map(|entry| ListItemBody {
                date: entry.label,
                images: entry.images,
            })
            .collect(),
        has_more: page.has_more,
    }
}

/// Lenient `days` parsing: only a non-empty all-digits value enables the
/// cutoff; anything else disables it without erroring.
fn parse_days(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// =============================================================================
// Tests
// =============================================================================
