//! Captured responses.
//!
//! # Responsibilities
//! - Stand in for a network response writer during an in-process call
//! - Buffer status, headers and body for later retrieval
//! - Freeze the captured state into an immutable `LocalApiResponse`
//!
//! # Design Decisions
//! - Status is `None` until committed, so "never set" differs from "set to 200"
//! - The first body write commits 200 if nothing was set, like a real server
//! - Later status writes still win; the emulated protocol is permissive

use std::borrow::Cow;
use std::io;

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;

/// Status reported while no code has been committed.
pub const DEFAULT_STATUS: u16 = 200;

/// In-memory response writer handed to a handler for one call.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    headers: HeaderMap,
    body: Vec<u8>,
    status: Option<u16>,
}

impl ResponseRecorder {
    /// Create an empty recorder with no committed status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Record the status code. The last call wins.
    pub fn write_status(&mut self, code: u16) {
        self.status = Some(code);
    }

    /// Append `data` to the body, committing the default status first if
    /// none was set. Always accepts every byte.
    pub fn write_body(&mut self, data: &[u8]) -> usize {
        if self.status.is_none() {
            self.write_status(DEFAULT_STATUS);
        }
        self.body.extend_from_slice(data);
        data.len()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Current status, `200` while uncommitted.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(DEFAULT_STATUS)
    }

    /// Whether a status was set explicitly or by a body write.
    pub fn is_status_committed(&self) -> bool {
        self.status.is_some()
    }

    /// Freeze the captured state.
    pub fn finish(self) -> LocalApiResponse {
        LocalApiResponse {
            status: self.status_code(),
            headers: self.headers,
            body: Bytes::from(self.body),
        }
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_body(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read-only result of a completed in-process call.
#[derive(Debug, Clone)]
pub struct LocalApiResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl LocalApiResponse {
    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}
