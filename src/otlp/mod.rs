//! OpenTelemetry Protocol (OTLP) trace ingestion
//!
//! This module provides:
//! - gzip + protobuf decoding of export requests
//! - span traversal into report records
//! - the `POST /v1/traces` HTTP handler

pub mod converter;
pub mod decode;
pub mod receiver;

pub use receiver::{OTLPState, otlp_routes};
