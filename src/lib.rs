//! In-process local API client.
//!
//! Calls a host's own request handler as if it were a network endpoint,
//! without a socket. The handler runs on a worker thread against an in-memory
//! response recorder, and the caller waits at most a fixed deadline.
//!
//! ```text
//!   caller ──(method, path)──▶ dispatch ──▶ worker thread ──▶ Handler::serve
//!                                 │                               │
//!                                 │◀──── LocalApiResponse ────────┘
//!                                 │   or deadline (2s) → Timeout
//!                                 ▼
//!                      Result<LocalApiResponse, DispatchError>
//! ```

// Core subsystems
pub mod dispatch;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod resilience;

pub use config::LocalApiConfig;
pub use dispatch::{dispatch, dispatch_async, DispatchError, DispatchResult, LocalApiClient};
pub use http::{Handler, LocalApiResponse, ResponseRecorder, ServiceHandler};
