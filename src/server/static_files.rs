// PhotoDex - server/static_files.rs
//
// The embedded front-end page and image-byte serving.
//
// Image requests are resolved against the scan root. Paths are rejected
// unless every component is a plain name (no `..`, no absolute paths), so a
// request can never escape the root. Indexed folders never change within a
// process lifetime, so image responses carry an aggressive cache header.

use crate::server::AppState;
use crate::util::constants::{HTML_CACHE_MAX_AGE_SECS, IMAGE_CACHE_MAX_AGE_SECS};
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path};

/// The single-page front end, baked into the binary so the server has no
/// runtime asset directory to locate.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// `GET /`: the gallery page.
pub async fn index_page() -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_TYPE,
                "text/html; charset=utf-8".to_string(),
            ),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={HTML_CACHE_MAX_AGE_SECS}"),
            ),
        ],
        INDEX_HTML,
    )
}

/// `GET /<folder>/<image>`: raw image bytes from the scan root.
///
/// The wildcard path arrives percent-decoded from the router.
pub async fn image(State(state): State<AppState>, UrlPath(path): UrlPath<String>) -> Response {
    let relative = Path::new(&path);
    if !is_plain_relative(relative) {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let full = state.root.join(relative);

    match tokio::fs::metadata(&full).await {
        Ok(meta) if meta.is_file() => {}
        _ => return (StatusCode::NOT_FOUND, "File not found").into_response(),
    }

    match tokio::fs::read(&full).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type(&path).to_string()),
                (header::CACHE_CONTROL, cache_control(&path)),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(file = %full.display(), error = %e, "Failed to read image");
            (StatusCode::INTERNAL_SERVER_ERROR, "Read error").into_response()
        }
    }
}

/// True if every component of `path` is a normal name: no parent or
/// current-dir steps, no root, no prefix.
fn is_plain_relative(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_)))
}

/// Content type from the filename extension; unknown extensions are served
/// as opaque bytes.
fn content_type(path: &str) -> &'static str {
    match extension_lowercase(path).as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Browser cache policy: long-lived immutable caching for the common image
/// formats, no-cache for everything else.
fn cache_control(path: &str) -> String {
    match extension_lowercase(path).as_deref() {
        Some("jpg") | Some("jpeg") | Some("png") | Some("webp") => {
            format!("max-age={IMAGE_CACHE_MAX_AGE_SECS}, immutable")
        }
        _ => "no-cache".to_string(),
    }
}

fn extension_lowercase(path: &str) -> Option<String> {
    path.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::IndexStore;
    use std::fs;
    use std::sync::Arc;

    fn state_for(root: &Path) -> AppState {
        AppState {
            store: Arc::new(IndexStore::new()),
            root: root.to_path_buf(),
        }
    }

    #[test]
    fn test_is_plain_relative() {
        assert!(is_plain_relative(Path::new("2024-01-01/photo.jpg")));
        assert!(!is_plain_relative(Path::new("../etc/passwd")));
        assert!(!is_plain_relative(Path::new("2024-01-01/../../secret")));
        assert!(!is_plain_relative(Path::new("/etc/passwd")));
        assert!(!is_plain_relative(Path::new("./photo.jpg")));
    }

    #[test]
    fn test_content_type_mapping() {
        assert_eq!(content_type("a.jpg"), "image/jpeg");
        assert_eq!(content_type("a.JPEG"), "image/jpeg");
        assert_eq!(content_type("a.png"), "image/png");
        assert_eq!(content_type("a.webp"), "image/webp");
        assert_eq!(content_type("a.bmp"), "image/bmp");
        assert_eq!(content_type("a.txt"), "application/octet-stream");
        assert_eq!(content_type("noext"), "application/octet-stream");
    }

    #[test]
    fn test_cache_control_immutable_only_for_images() {
        assert!(cache_control("a.jpg").contains("immutable"));
        assert!(cache_control("a.webp").contains("immutable"));
        assert_eq!(cache_control("a.txt"), "no-cache");
        // bmp is served but not aggressively cached.
        assert_eq!(cache_control("a.bmp"), "no-cache");
    }

    #[tokio::test]
    async fn test_image_serves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("2024-01-01");
        fs::create_dir(&folder).unwrap();
        fs::write(folder.join("photo.jpg"), b"jpeg-bytes").unwrap();

        let response = image(
            State(state_for(dir.path())),
            UrlPath("2024-01-01/photo.jpg".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE.as_str()],
            "image/jpeg"
        );
    }

    #[tokio::test]
    async fn test_image_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let response = image(
            State(state_for(dir.path())),
            UrlPath("../outside.jpg".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_image_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = image(
            State(state_for(dir.path())),
            UrlPath("2024-01-01/absent.jpg".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_image_directory_is_404() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("2024-01-01")).unwrap();
        let response = image(
            State(state_for(dir.path())),
            UrlPath("2024-01-01".to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_page_is_html() {
        let response = index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = &response.headers()[header::CONTENT_TYPE.as_str()];
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }
}
