//! Tower service adapter.
//!
//! # Responsibilities
//! - Let a host's real HTTP stack (e.g. an axum `Router`) serve local API calls
//! - Run the service future as a task on an existing Tokio runtime
//!   while the worker thread waits for its result
//! - Copy status, headers and the fully buffered body into the recorder
//!
//! # Design Decisions
//! - Service errors, body errors and runtime shutdown are logged and mapped to 500
//! - The body is buffered in full; streaming is not supported

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tower::{Service, ServiceExt};

use crate::http::handler::Handler;
use crate::http::request::RequestIdExt;
use crate::http::response::ResponseRecorder;

/// Wraps a tower `Service` so it can be dispatched in-process.
#[derive(Debug, Clone)]
pub struct ServiceHandler<S> {
    service: S,
    runtime: Handle,
}

impl<S> ServiceHandler<S> {
    /// `runtime` must be a multi-threaded runtime when the dispatching
    /// thread is itself a runtime thread, since that thread blocks.
    pub fn new(service: S, runtime: Handle) -> Self {
        Self { service, runtime }
    }
}

impl<S> Handler for ServiceHandler<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + Sync + 'static,
    S::Future: Send,
    S::Error: std::fmt::Display,
{
    fn serve(&self, request: Request<()>, response: &mut ResponseRecorder) {
        let request_id = request.request_id().unwrap_or("unknown").to_string();
        let request = request.map(|()| Body::empty());
        let service = self.service.clone();

        // The service runs as a task on the host runtime. If that runtime
        // shuts down first, the task is dropped and so is `tx`.
        let (tx, rx) = oneshot::channel();
        self.runtime.spawn(async move {
            let result = async {
                let res = service.oneshot(request).await.map_err(|e| e.to_string())?;
                let (parts, body) = res.into_parts();
                let bytes = axum::body::to_bytes(body, usize::MAX)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok::<_, String>((parts, bytes))
            }
            .await;
            let _ = tx.send(result);
        });

        let result = rx
            .blocking_recv()
            .unwrap_or_else(|_| Err("service task cancelled by runtime shutdown".to_string()));

        match result {
            Ok((parts, bytes)) => {
                response.headers_mut().extend(parts.headers);
                response.write_status(parts.status.as_u16());
                response.write_body(&bytes);
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, error = %e, "Local API service failed");
                response.write_status(StatusCode::INTERNAL_SERVER_ERROR.as_u16());
            }
        }
    }
}
