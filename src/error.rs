use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::app::state::Lifecycle;

/// Failures of a single `/v1/traces` request.
///
/// These never leave the request that caused them: they are logged and
/// turned into an HTTP status with a fixed, detail-free body.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(Option<String>),

    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("failed to open gzip stream: {0}")]
    Decompression(String),

    #[error("failed to decode ExportTraceServiceRequest: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl IngestError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::BodyRead(_) | Self::Decompression(_) | Self::Decode(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::UnsupportedContentType(_) => "Unsupported content type",
            Self::PayloadTooLarge { .. } => "Payload too large",
            Self::BodyRead(_) | Self::Decompression(_) => "Failed to read body",
            Self::Decode(_) => "Failed to parse Protobuf",
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        warn!(error = %self, status = self.status().as_u16(), "Rejected OTLP traces request");
        (self.status(), self.public_message()).into_response()
    }
}

/// Server-scoped failures surfaced by `Server::start` and `Server::stop`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("graceful shutdown did not complete within {grace:?}")]
    ShutdownTimeout { grace: Duration },

    #[error("cannot {operation} server while it is {state}")]
    InvalidState {
        operation: &'static str,
        state: Lifecycle,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
