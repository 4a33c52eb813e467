//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatch produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every event of a dispatch
//! - Failures are logged as a side effect, never required for correctness

pub mod logging;
pub mod metrics;
