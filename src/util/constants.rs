// PhotoDex - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PhotoDex";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Indexing
// =============================================================================

/// Number of root entries processed between `scanned` counter publications.
///
/// Progress is published coarsely rather than per-entry to keep write traffic
/// on the shared store low; readers polling `/api/status` only need a rough
/// figure. Lower values mean fresher progress at the cost of more atomic
/// stores.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Number of newly built records accumulated between partial snapshot
/// publications.
///
/// Each partial publish sorts a copy of the working list, so smaller values
/// buy reader freshness with extra sort work. The final snapshot is always
/// published regardless of this interval.
pub const DEFAULT_PUBLISH_INTERVAL: usize = 100;

/// Filename extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

// =============================================================================
// Query defaults
// =============================================================================

/// Page index used when the `page` query parameter is absent.
pub const DEFAULT_PAGE: usize = 0;

/// Page length used when the `size` query parameter is absent.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// =============================================================================
// HTTP server
// =============================================================================

/// Default TCP port for the gallery server.
pub const DEFAULT_PORT: u16 = 8888;

/// Cache lifetime for the embedded front-end page (seconds).
pub const HTML_CACHE_MAX_AGE_SECS: u64 = 3_600; // 1 hour

/// Cache lifetime for served image bytes (seconds). Indexed folders are
/// treated as immutable for the process lifetime (no re-scan), so browsers
/// may cache aggressively.
pub const IMAGE_CACHE_MAX_AGE_SECS: u64 = 31_536_000; // 1 year

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
