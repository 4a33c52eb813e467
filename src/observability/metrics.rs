//! Dispatch metrics.
//!
//! # Metrics
//! - `localapi_dispatch_total` (counter): dispatches by outcome
//! - `localapi_dispatch_duration_seconds` (histogram): time until the caller got a result
//!
//! The host installs the recorder; without one these calls are no-ops.

use std::time::Instant;

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    BadStatus,
    Timeout,
    Construction,
    Aborted,
    SpawnFailed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::BadStatus => "bad_status",
            Outcome::Timeout => "timeout",
            Outcome::Construction => "construction",
            Outcome::Aborted => "aborted",
            Outcome::SpawnFailed => "spawn_failed",
        }
    }
}

/// Record one finished dispatch.
pub fn record_dispatch(outcome: Outcome, start_time: Instant) {
    let label = outcome.as_str();
    metrics::counter!("localapi_dispatch_total", "outcome" => label).increment(1);
    metrics::histogram!("localapi_dispatch_duration_seconds", "outcome" => label)
        .record(start_time.elapsed().as_secs_f64());
}
