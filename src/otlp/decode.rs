//! Decompression and protobuf decoding of OTLP export bodies

use std::io::Read;

use flate2::read::MultiGzDecoder;
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;
use prost::Message;

use crate::error::IngestError;

/// Inflate a gzip body, refusing output larger than `limit` bytes.
///
/// Every member of a multi-member body is inflated, and anything after the
/// last member must itself be a gzip member. A body whose first gzip header
/// cannot be parsed is a decompression failure; a stream that breaks later is
/// a body read failure. Both are recoverable for the caller.
pub fn gunzip(body: &[u8], limit: usize) -> Result<Vec<u8>, IngestError> {
    if body.is_empty() {
        return Err(IngestError::Decompression("empty body".to_string()));
    }

    let mut decoder = MultiGzDecoder::new(body);
    let mut decompressed = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);

    if let Err(e) = decoder.by_ref().take(cap).read_to_end(&mut decompressed) {
        return Err(if decoder.header().is_none() {
            IngestError::Decompression(e.to_string())
        } else {
            IngestError::BodyRead(e.to_string())
        });
    }

    if decompressed.len() > limit {
        return Err(IngestError::PayloadTooLarge { limit });
    }

    Ok(decompressed)
}

/// Decode a gzip-compressed ExportTraceServiceRequest.
pub fn decode_export_request(
    body: &[u8],
    limit: usize,
) -> Result<ExportTraceServiceRequest, IngestError> {
    let decompressed = gunzip(body, limit)?;
    Ok(ExportTraceServiceRequest::decode(decompressed.as_slice())?)
}
