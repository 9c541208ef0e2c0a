//! Domain models produced by the ingestion pipeline

pub mod span_record;

pub use span_record::{SpanRecord, trace_id_prefix};
