//! Bounded in-process dispatch.
//!
//! # Responsibilities
//! - Build the request descriptor before any work starts
//! - Run the handler against a fresh recorder on a dedicated worker thread
//! - Race the worker against the deadline and classify the result
//!
//! # Design Decisions
//! - One worker thread per call, no pool
//! - The recorder is owned by the worker and only crosses to the caller, frozen,
//!   through the completion channel. After a timeout the worker keeps running
//!   and its late result is dropped on the worker thread.
//! - Handler panics are not caught; the caller sees `WorkerAborted`

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use axum::http::Request;
use tokio::sync::oneshot;

use crate::config::{ClientConfig, LocalApiConfig};
use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::http::handler::Handler;
use crate::http::request::{build_request, namespaced_path, RequestId};
use crate::http::response::{LocalApiResponse, ResponseRecorder};
use crate::observability::metrics::{self, Outcome};
use crate::resilience::timeouts::{self, WaitError};

const WORKER_THREAD_NAME: &str = "localapi-worker";

/// Dispatch a request to `handler` with the default namespace and deadline.
pub fn dispatch(
    handler: Arc<dyn Handler>,
    method: &str,
    path: &str,
) -> DispatchResult<LocalApiResponse> {
    LocalApiClient::new(handler).call(method, path)
}

/// Async flavor of [`dispatch`]. The handler still runs on its own thread.
pub async fn dispatch_async(
    handler: Arc<dyn Handler>,
    method: &str,
    path: &str,
) -> DispatchResult<LocalApiResponse> {
    LocalApiClient::new(handler).call_async(method, path).await
}

/// A handler bound to fixed dispatch settings.
#[derive(Clone)]
pub struct LocalApiClient {
    handler: Arc<dyn Handler>,
    config: ClientConfig,
    metrics_enabled: bool,
}

impl std::fmt::Debug for LocalApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalApiClient")
            .field("config", &self.config)
            .field("metrics_enabled", &self.metrics_enabled)
            .finish_non_exhaustive()
    }
}

impl LocalApiClient {
    /// Create a client with the default local API settings.
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self::with_config(handler, &LocalApiConfig::default())
    }

    /// Create a client from host configuration.
    pub fn with_config(handler: Arc<dyn Handler>, config: &LocalApiConfig) -> Self {
        Self {
            handler,
            config: config.client.clone(),
            metrics_enabled: config.observability.metrics_enabled,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Dispatch and block until the handler finishes or the deadline passes.
    pub fn call(&self, method: &str, path: &str) -> DispatchResult<LocalApiResponse> {
        let start_time = Instant::now();
        let request_id = RequestId::new();
        let request = self.prepare(method, path, request_id, start_time)?;

        let (tx, rx) = mpsc::sync_channel(1);
        self.spawn_worker(request, request_id, start_time, move |response| {
            // Fails only if the caller already timed out.
            let _ = tx.send(response);
        })?;

        let outcome = timeouts::wait_blocking(&rx, self.config.timeout());
        self.settle(outcome, method, path, request_id, start_time)
    }

    /// Dispatch and await the handler or the deadline, whichever comes first.
    pub async fn call_async(&self, method: &str, path: &str) -> DispatchResult<LocalApiResponse> {
        let start_time = Instant::now();
        let request_id = RequestId::new();
        let request = self.prepare(method, path, request_id, start_time)?;

        let (tx, rx) = oneshot::channel();
        self.spawn_worker(request, request_id, start_time, move |response| {
            let _ = tx.send(response);
        })?;

        let outcome = timeouts::wait_async(rx, self.config.timeout()).await;
        self.settle(outcome, method, path, request_id, start_time)
    }

    fn prepare(
        &self,
        method: &str,
        path: &str,
        request_id: RequestId,
        start_time: Instant,
    ) -> DispatchResult<Request<()>> {
        build_request(&self.config.namespace, method, path, request_id).map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                error = %e,
                "Error creating local API request"
            );
            self.record(Outcome::Construction, start_time);
            DispatchError::Construction(e)
        })
    }

    fn spawn_worker<F>(
        &self,
        request: Request<()>,
        request_id: RequestId,
        start_time: Instant,
        deliver: F,
    ) -> DispatchResult<()>
    where
        F: FnOnce(LocalApiResponse) + Send + 'static,
    {
        let handler = Arc::clone(&self.handler);
        let spawned = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut recorder = ResponseRecorder::new();
                handler.serve(request, &mut recorder);
                tracing::trace!(
                    request_id = %request_id,
                    status = recorder.status_code(),
                    "Handler finished"
                );
                deliver(recorder.finish());
            });

        match spawned {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Failed to spawn worker");
                self.record(Outcome::SpawnFailed, start_time);
                Err(DispatchError::Spawn(e))
            }
        }
    }

    fn settle(
        &self,
        outcome: Result<LocalApiResponse, WaitError>,
        method: &str,
        path: &str,
        request_id: RequestId,
        start_time: Instant,
    ) -> DispatchResult<LocalApiResponse> {
        let path = namespaced_path(&self.config.namespace, path);

        let (result, label) = match outcome {
            Ok(response) if response.status_code() < self.config.bad_status_threshold => {
                tracing::debug!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = response.status_code(),
                    elapsed = ?start_time.elapsed(),
                    "Local API request completed"
                );
                (Ok(response), Outcome::Success)
            }
            Ok(response) => {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = response.status_code(),
                    "Bad http status for local API response"
                );
                (Err(DispatchError::BadStatus(Box::new(response))), Outcome::BadStatus)
            }
            Err(WaitError::Elapsed(deadline)) => {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    deadline = ?deadline,
                    "Local API request timed out"
                );
                (Err(DispatchError::Timeout(deadline)), Outcome::Timeout)
            }
            Err(WaitError::Disconnected) => {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    "Local API worker exited without a response"
                );
                (Err(DispatchError::WorkerAborted), Outcome::Aborted)
            }
        };

        self.record(label, start_time);
        result
    }

    fn record(&self, outcome: Outcome, start_time: Instant) {
        if self.metrics_enabled {
            metrics::record_dispatch(outcome, start_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::metrics::testing::CaptureRecorder;
    use std::time::Duration;

    const DISPATCH_TOTAL: &str = "localapi_dispatch_total";

    fn client_with_timeout(handler: Arc<dyn Handler>, timeout_ms: u64) -> LocalApiClient {
        let mut config = LocalApiConfig::default();
        config.client.timeout_ms = timeout_ms;
        config.observability.metrics_enabled = false;
        LocalApiClient::with_config(handler, &config)
    }

    #[test]
    fn test_handler_sees_namespaced_request() {
        let handler = Arc::new(|req: Request<()>, w: &mut ResponseRecorder| {
            w.write_body(req.uri().path().as_bytes());
            w.write_body(b" ");
            w.write_body(req.method().as_str().as_bytes());
        });
        let response = dispatch(handler, "PUT", "prefs").unwrap();
        assert_eq!(response.text(), "/localapi/v0/prefs PUT");
    }

    #[test]
    fn test_threshold_boundary() {
        let at = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| w.write_status(300));
        let err = dispatch(at, "GET", "x").unwrap_err();
        assert!(err.is_bad_status());

        let below = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| w.write_status(299));
        assert_eq!(dispatch(below, "GET", "x").unwrap().status_code(), 299);
    }

    #[test]
    fn test_custom_threshold() {
        let mut config = LocalApiConfig::default();
        config.client.bad_status_threshold = 500;
        let handler = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| w.write_status(404));
        let client = LocalApiClient::with_config(handler, &config);

        assert_eq!(client.call("GET", "missing").unwrap().status_code(), 404);
    }

    #[test]
    fn test_short_deadline() {
        let handler = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| {
            thread::sleep(Duration::from_millis(500));
            w.write_body(b"late");
        });
        let client = client_with_timeout(handler, 50);

        let start = Instant::now();
        let err = client.call("GET", "slow").unwrap_err();
        assert!(matches!(err, DispatchError::Timeout(d) if d == Duration::from_millis(50)));
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_panicking_handler_reports_aborted() {
        let handler = Arc::new(|_: Request<()>, _: &mut ResponseRecorder| {
            panic!("handler blew up");
        });
        let client = client_with_timeout(handler, 2_000);

        let err = client.call("GET", "boom").unwrap_err();
        assert!(matches!(err, DispatchError::WorkerAborted));
    }

    #[test]
    fn test_construction_error_skips_handler() {
        let called = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = called.clone();
        let handler = Arc::new(move |_: Request<()>, _: &mut ResponseRecorder| {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        });

        let err = dispatch(handler, "NOT A METHOD", "x").unwrap_err();
        assert!(matches!(err, DispatchError::Construction(_)));
        assert!(!called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_metrics_count_each_outcome() {
        let ok = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| {
            w.write_body(b"ok");
        });
        let bad = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| w.write_status(400));
        let slow = Arc::new(|_: Request<()>, _: &mut ResponseRecorder| {
            thread::sleep(Duration::from_millis(300));
        });

        let mut config = LocalApiConfig::default();
        config.client.timeout_ms = 50;
        let recorder = CaptureRecorder::default();

        ::metrics::with_local_recorder(&recorder, || {
            assert!(LocalApiClient::with_config(ok, &config).call("GET", "a").is_ok());
            let err = LocalApiClient::with_config(bad, &config).call("GET", "b").unwrap_err();
            assert!(err.is_bad_status());
            let err = LocalApiClient::with_config(slow, &config).call("GET", "c").unwrap_err();
            assert!(err.is_timeout());
        });

        assert_eq!(recorder.counter(DISPATCH_TOTAL, "success"), 1);
        assert_eq!(recorder.counter(DISPATCH_TOTAL, "bad_status"), 1);
        assert_eq!(recorder.counter(DISPATCH_TOTAL, "timeout"), 1);
        assert_eq!(recorder.total_counted(), 3);
        assert_eq!(
            recorder.histogram_samples("localapi_dispatch_duration_seconds", "timeout"),
            1
        );
    }

    #[test]
    fn test_metrics_count_construction_errors() {
        let handler = Arc::new(|_: Request<()>, _: &mut ResponseRecorder| {});
        let recorder = CaptureRecorder::default();

        ::metrics::with_local_recorder(&recorder, || {
            assert!(dispatch(handler, "GET", "bad path").is_err());
        });

        assert_eq!(recorder.counter(DISPATCH_TOTAL, "construction"), 1);
        assert_eq!(recorder.total_counted(), 1);
    }

    #[test]
    fn test_metrics_disabled_records_nothing() {
        let handler = Arc::new(|_: Request<()>, w: &mut ResponseRecorder| w.write_status(503));
        let mut config = LocalApiConfig::default();
        config.observability.metrics_enabled = false;
        let client = LocalApiClient::with_config(handler, &config);
        let recorder = CaptureRecorder::default();

        ::metrics::with_local_recorder(&recorder, || {
            assert!(client.call("GET", "a").is_err());
            assert!(client.call("GET", "bad path").is_err());
        });

        assert_eq!(recorder.total_counted(), 0);
    }
}
