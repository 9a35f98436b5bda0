// PhotoDex - server/mod.rs
//
// HTTP layer: router assembly and serving. Presentation only; all index
// semantics live in core; handlers read through the shared store handle.

pub mod api;
pub mod static_files;

use crate::core::store::IndexStore;
use crate::util::error::ServeError;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared handler state: the index store plus the scan root (for serving
/// image bytes).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<IndexStore>,
    pub root: PathBuf,
}

/// Build the application router.
///
/// The wildcard route serves image bytes for any path that is not the page
/// or an API endpoint, mirroring how folder/image URLs appear in list
/// responses.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(static_files::index_page))
        .route("/api/status", get(api::status))
        .route("/api/list", get(api::list))
        .route("/*path", get(static_files::image))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr).await.map_err(|e| ServeError::Bind {
        addr: addr.to_string(),
        source: e,
    })?;

    tracing::info!(addr = %addr, "Gallery server listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| ServeError::Io { source: e })
}
