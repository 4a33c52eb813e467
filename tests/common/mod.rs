//! Shared handlers for dispatch integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use localapi_client::{Handler, ResponseRecorder};
use serde_json::{json, Value};

pub const SUCCESSFUL_REPORT: &str = "successful bug report!";

/// Sets 400 and writes nothing.
pub struct BadStatusHandler;

impl Handler for BadStatusHandler {
    fn serve(&self, _request: Request<()>, response: &mut ResponseRecorder) {
        response.write_status(400);
    }
}

/// Sleeps well past the deadline before answering.
pub struct TimeoutHandler;

impl Handler for TimeoutHandler {
    fn serve(&self, _request: Request<()>, response: &mut ResponseRecorder) {
        std::thread::sleep(Duration::from_secs(6));
        response.write_body(SUCCESSFUL_REPORT.as_bytes());
    }
}

/// Writes the report without touching the status.
pub struct SuccessfulHandler;

impl Handler for SuccessfulHandler {
    fn serve(&self, _request: Request<()>, response: &mut ResponseRecorder) {
        response.write_body(SUCCESSFUL_REPORT.as_bytes());
    }
}

/// Writes the request path as the body.
pub struct EchoPathHandler;

impl Handler for EchoPathHandler {
    fn serve(&self, request: Request<()>, response: &mut ResponseRecorder) {
        response.write_body(request.uri().path().as_bytes());
    }
}

/// An axum router shaped like a host's local API.
pub fn localapi_router() -> Router {
    Router::new()
        .route(
            "/localapi/v0/status",
            get(|| async { Json(json!({ "state": "Running", "peers": 3 })) }),
        )
        .route("/localapi/v0/bugreport", post(|| async { SUCCESSFUL_REPORT }))
        .route(
            "/localapi/v0/request-id",
            get(|headers: HeaderMap| async move {
                headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string()
            }),
        )
        .route(
            "/localapi/v0/forbidden",
            get(|| async { (StatusCode::FORBIDDEN, Json(Value::from("access denied"))) }),
        )
        .route(
            "/localapi/v0/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "too late"
            }),
        )
}
