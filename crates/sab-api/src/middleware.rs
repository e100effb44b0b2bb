//! # HTTP Middleware
//!
//! Tower layers applied to the whole router.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Request/response tracing: one span per request with method, URI, and
/// status code.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// CORS policy. The form is served from a different origin than the API,
/// so any origin, method, and header is allowed.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
