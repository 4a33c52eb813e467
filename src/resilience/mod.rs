//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch to handler:
//!     → worker thread runs the handler
//!     → timeouts.rs (race completion signal against the deadline)
//!     → result, or timeout with the worker abandoned
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every dispatch has a deadline
//! - No retries; retry policy belongs to the caller

pub mod timeouts;

pub use timeouts::WaitError;
