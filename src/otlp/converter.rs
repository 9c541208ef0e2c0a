//! Traversal of decoded OTLP exports into span report records

use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;

use crate::domain::SpanRecord;

/// Visit every span in resource → scope → span order.
pub fn span_records(request: &ExportTraceServiceRequest) -> Vec<SpanRecord> {
    let mut records = Vec::new();

    for resource_spans in &request.resource_spans {
        for scope_spans in &resource_spans.scope_spans {
            for span in &scope_spans.spans {
                records.push(SpanRecord::new(span.name.as_str(), &span.trace_id));
            }
        }
    }

    records
}
