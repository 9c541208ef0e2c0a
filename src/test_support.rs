//! Shared test support utilities
//!
//! Provides a `RecordingReporter` that captures span records, plus builders
//! for gzip-compressed OTLP payloads. Used by unit tests, integration tests
//! and benches.

use std::io::Write;

use flate2::{Compression, write::GzEncoder};
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_proto::tonic::trace::v1::{ResourceSpans, ScopeSpans, Span};
use parking_lot::Mutex;
use prost::Message;

use crate::domain::SpanRecord;
use crate::port::SpanReporter;

/// Reporter that keeps every record it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    records: Mutex<Vec<SpanRecord>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<SpanRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl SpanReporter for RecordingReporter {
    fn report(&self, record: &SpanRecord) {
        self.records.lock().push(record.clone());
    }
}

/// Compress bytes with gzip
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder
        .write_all(data)
        .expect("writing to an in-memory gzip encoder");
    encoder.finish().expect("finishing an in-memory gzip encoder")
}

/// Encode and gzip an export request, as an OTLP/HTTP exporter would send it
pub fn protobuf_body(request: &ExportTraceServiceRequest) -> Vec<u8> {
    gzip(&request.encode_to_vec())
}

pub fn span(name: &str, trace_id: [u8; 16]) -> Span {
    Span {
        trace_id: trace_id.to_vec(),
        span_id: vec![0x02; 8],
        name: name.to_string(),
        kind: 2, // Server
        start_time_unix_nano: 1_700_000_000_000_000_000,
        end_time_unix_nano: 1_700_000_001_000_000_000,
        ..Default::default()
    }
}

pub fn scope_spans(spans: Vec<Span>) -> ScopeSpans {
    ScopeSpans {
        scope: None,
        spans,
        ..Default::default()
    }
}

pub fn resource_spans(scopes: Vec<ScopeSpans>) -> ResourceSpans {
    ResourceSpans {
        resource: Some(Resource::default()),
        scope_spans: scopes,
        ..Default::default()
    }
}

/// Build an export with one resource per entry, each holding a single scope
/// with the given `(name, trace_id)` spans.
pub fn trace_request(resources: &[&[(&str, [u8; 16])]]) -> ExportTraceServiceRequest {
    ExportTraceServiceRequest {
        resource_spans: resources
            .iter()
            .map(|spans| {
                let spans = spans.iter().map(|(name, id)| span(name, *id)).collect();
                resource_spans(vec![scope_spans(spans)])
            })
            .collect(),
    }
}

/// Trace id whose first 8 bytes read as `n` big-endian
pub fn trace_id(n: u64) -> [u8; 16] {
    let mut id = [0u8; 16];
    id[..8].copy_from_slice(&n.to_be_bytes());
    id[8..].copy_from_slice(&[0xab; 8]);
    id
}
