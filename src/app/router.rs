use crate::config::Timeouts;
use crate::otlp::{OTLPState, otlp_routes};
use axum::Router;
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

/// Build the OTLP HTTP router with per-request timeouts.
#[allow(deprecated)]
pub fn otlp_router(state: OTLPState, timeouts: &Timeouts) -> Router {
    otlp_routes(state)
        .layer(RequestBodyTimeoutLayer::new(timeouts.read_body))
        .layer(TimeoutLayer::new(timeouts.write))
        .layer(TraceLayer::new_for_http())
}
