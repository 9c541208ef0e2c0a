pub mod span_reporter;

pub use span_reporter::SpanReporter;
