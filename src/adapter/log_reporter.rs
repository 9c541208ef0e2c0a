use tracing::info;

use crate::domain::SpanRecord;
use crate::port::SpanReporter;

/// Reports each span as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl SpanReporter for LogReporter {
    fn report(&self, record: &SpanRecord) {
        info!(
            name = %record.name,
            id = record.id,
            trace_id = %record.trace_id,
            "Received span"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_log_reporter_emits_span_fields() {
        let record = SpanRecord::new("checkout", &[0, 0, 0, 0, 0, 0, 0, 1]);
        LogReporter.report(&record);

        assert!(logs_contain("Received span"));
        assert!(logs_contain("checkout"));
        assert!(logs_contain("id=1"));
    }
}
