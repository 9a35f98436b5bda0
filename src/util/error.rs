// PhotoDex - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PhotoDex operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PhotodexError {
    /// The index scan failed at the root level.
    Scan(ScanError),

    /// The HTTP server failed to start.
    Serve(ServeError),
}

impl fmt::Display for PhotodexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "Scan error: {e}"),
            Self::Serve(e) => write!(f, "Server error: {e}"),
        }
    }
}

impl std::error::Error for PhotodexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scan(e) => Some(e),
            Self::Serve(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Scan errors
// ---------------------------------------------------------------------------

/// Fatal root-level scan failures.
///
/// Per-folder problems are not errors: they are recorded as `SkipReason`
/// outcomes and the scan continues. Only a failure to enumerate the root
/// itself aborts the scan, surfacing through the store's `failed` status.
#[derive(Debug)]
pub enum ScanError {
    /// The root path does not exist.
    RootNotFound { path: PathBuf },

    /// The root path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// The root directory could not be enumerated (permissions, or the
    /// root disappeared mid-scan).
    RootUnreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Root directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Root path '{}' is not a directory", path.display())
            }
            Self::RootUnreadable { path, source } => {
                write!(f, "Cannot read root directory '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RootUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScanError> for PhotodexError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

// ---------------------------------------------------------------------------
// Server errors
// ---------------------------------------------------------------------------

/// Errors starting or running the HTTP server.
#[derive(Debug)]
pub enum ServeError {
    /// Could not bind the listen address.
    Bind { addr: String, source: io::Error },

    /// The accept loop terminated with an I/O error.
    Io { source: io::Error },
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { addr, source } => {
                write!(f, "Cannot bind '{addr}': {source}")
            }
            Self::Io { source } => write!(f, "Server I/O error: {source}"),
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source),
            Self::Io { source } => Some(source),
        }
    }
}

impl From<ServeError> for PhotodexError {
    fn from(e: ServeError) -> Self {
        Self::Serve(e)
    }
}

/// Convenience type alias for PhotoDex results.
pub type Result<T> = std::result::Result<T, PhotodexError>;
