/// One reported span.
///
/// Built per request from a decoded export and handed to a
/// [`SpanReporter`](crate::port::SpanReporter); never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    /// Span name as sent by the exporter
    pub name: String,

    /// First 8 bytes of the trace id read as a big-endian integer
    pub id: u64,

    /// Full trace id, lowercase hex
    pub trace_id: String,
}

impl SpanRecord {
    pub fn new(name: impl Into<String>, trace_id: &[u8]) -> Self {
        Self {
            name: name.into(),
            id: trace_id_prefix(trace_id),
            trace_id: hex::encode(trace_id),
        }
    }
}

/// Interpret a trace id as an unsigned 64-bit value.
///
/// Ids of 8 bytes or more contribute their first 8 bytes. Shorter ids are
/// read as a big-endian integer of the bytes present; an empty id is 0.
pub fn trace_id_prefix(trace_id: &[u8]) -> u64 {
    let len = trace_id.len().min(8);
    let mut buf = [0u8; 8];
    buf[8 - len..].copy_from_slice(&trace_id[..len]);
    u64::from_be_bytes(buf)
}
