use crate::domain::SpanRecord;

/// Sink for span report records.
///
/// Shared by every in-flight request, so implementations must tolerate
/// concurrent calls.
pub trait SpanReporter: Send + Sync {
    fn report(&self, record: &SpanRecord);
}
