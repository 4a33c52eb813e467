//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch(handler, method, path)
//!     → http::request (build descriptor; Construction error on failure)
//!     → worker thread: handler.serve(request, ResponseRecorder)
//!     → resilience::timeouts (completion vs. deadline)
//!     → status < threshold: Ok(response)
//!       status ≥ threshold: BadStatus(response)
//!       deadline first:     Timeout
//! ```

pub mod client;
pub mod error;

pub use client::{dispatch, dispatch_async, LocalApiClient};
pub use error::{DispatchError, DispatchResult};
