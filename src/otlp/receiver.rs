//! OTLP HTTP Receiver implementation
//!
//! Supports:
//! - POST /v1/traces (OTLP HTTP/protobuf, gzip-compressed)

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{debug, instrument};

use crate::error::IngestError;
use crate::otlp::converter::span_records;
use crate::otlp::decode::decode_export_request;
use crate::port::SpanReporter;

pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

/// Application state for OTLP handlers
#[derive(Clone)]
pub struct OTLPState {
    pub reporter: Arc<dyn SpanReporter>,
    /// Limit for both the compressed body and its decompressed form
    pub max_body_bytes: usize,
}

/// Create Axum router for OTLP HTTP endpoints
pub fn otlp_routes(state: OTLPState) -> Router {
    Router::new()
        .route("/v1/traces", post(receive_traces_http))
        .with_state(state)
}

/// OTLP HTTP traces receiver
///
/// Accepts: application/x-protobuf, gzip body
/// Returns: 200 with an empty body once every span has been reported
#[instrument(skip_all)]
async fn receive_traces_http(
    State(state): State<OTLPState>,
    headers: HeaderMap,
    body: Body,
) -> Result<StatusCode, IngestError> {
    // Checked before the body is touched
    let content_type = headers.get(header::CONTENT_TYPE);
    if content_type.map(|v| v.as_bytes()) != Some(PROTOBUF_CONTENT_TYPE.as_bytes()) {
        return Err(IngestError::UnsupportedContentType(
            content_type
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        ));
    }

    let body = read_body(body, state.max_body_bytes).await?;
    let request = decode_export_request(&body, state.max_body_bytes)?;

    let records = span_records(&request);
    for record in &records {
        state.reporter.report(record);
    }

    debug!(
        body_size = body.len(),
        count = records.len(),
        "Processed OTLP traces request"
    );

    Ok(StatusCode::OK)
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, IngestError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(IngestError::PayloadTooLarge { limit })
        }
        Err(e) => Err(IngestError::BodyRead(e.to_string())),
    }
}
