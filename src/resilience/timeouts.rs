//! Deadline enforcement.
//!
//! # Responsibilities
//! - Race a worker's completion signal against a fixed deadline
//! - Distinguish "deadline elapsed" from "worker vanished without answering"
//!
//! # Design Decisions
//! - Blocking callers use a one-slot `std::sync::mpsc` channel and `recv_timeout`
//! - Async callers use Tokio's timeout facilities over a oneshot
//! - The loser of the race is abandoned, never cancelled

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use tokio::sync::oneshot;

/// Why a wait ended without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitError {
    /// The deadline fired first.
    Elapsed(Duration),
    /// The sender was dropped before sending, e.g. the worker panicked.
    Disconnected,
}

/// Block until `rx` yields a value or `deadline` passes.
pub fn wait_blocking<T>(rx: &Receiver<T>, deadline: Duration) -> Result<T, WaitError> {
    rx.recv_timeout(deadline).map_err(|e| match e {
        RecvTimeoutError::Timeout => WaitError::Elapsed(deadline),
        RecvTimeoutError::Disconnected => WaitError::Disconnected,
    })
}

/// Await `rx` until it yields a value or `deadline` passes.
pub async fn wait_async<T>(rx: oneshot::Receiver<T>, deadline: Duration) -> Result<T, WaitError> {
    match tokio::time::timeout(deadline, rx).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(WaitError::Disconnected),
        Err(_) => Err(WaitError::Elapsed(deadline)),
    }
}
