//! Request descriptor construction.
//!
//! # Responsibilities
//! - Prefix the caller's path with the local API namespace
//! - Validate method and path by building an `http::Request`
//! - Stamp a unique request ID for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Construction failures surface before any thread is spawned

use axum::http::Request;
use uuid::Uuid;

/// Versioned namespace every local API path lives under.
pub const LOCALAPI_NAMESPACE: &str = "/localapi/v0/";

/// Header carrying the per-call request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier for a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Extension trait to read the request ID back from a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

/// Join `namespace` and `path`, dropping leading slashes from `path`.
pub fn namespaced_path(namespace: &str, path: &str) -> String {
    format!("{}{}", namespace, path.trim_start_matches('/'))
}

/// Build the bodiless request handed to a handler.
pub fn build_request(
    namespace: &str,
    method: &str,
    path: &str,
    request_id: RequestId,
) -> Result<Request<()>, axum::http::Error> {
    Request::builder()
        .method(method)
        .uri(namespaced_path(namespace, path))
        .header(X_REQUEST_ID, request_id.to_string())
        .body(())
}
