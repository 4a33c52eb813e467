//! In-process HTTP emulation.
//!
//! # Data Flow
//! ```text
//! caller (method, path)
//!     → request.rs (namespace, validate, add request ID)
//!     → handler.rs (opaque handler capability)
//!         → service.rs (optional: tower/axum service adapter)
//!     → response.rs (captured status/headers/body)
//!     → LocalApiResponse back to caller
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod service;

pub use handler::Handler;
pub use request::{RequestId, RequestIdExt, LOCALAPI_NAMESPACE, X_REQUEST_ID};
pub use response::{LocalApiResponse, ResponseRecorder};
pub use service::ServiceHandler;
