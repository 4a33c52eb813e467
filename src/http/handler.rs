//! The request handler capability invoked in-process.

use axum::http::Request;

use crate::http::response::ResponseRecorder;

/// Anything that can answer a local API request.
///
/// Completion is signalled by `serve` returning. The request carries only a
/// method, a namespaced path and a request ID header; there is no body.
pub trait Handler: Send + Sync {
    fn serve(&self, request: Request<()>, response: &mut ResponseRecorder);
}

impl<F> Handler for F
where
    F: Fn(Request<()>, &mut ResponseRecorder) + Send + Sync,
{
    fn serve(&self, request: Request<()>, response: &mut ResponseRecorder) {
        self(request, response)
    }
}
