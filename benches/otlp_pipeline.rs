use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jaegerin::domain::trace_id_prefix;
use jaegerin::otlp::converter::span_records;
use jaegerin::otlp::decode::{decode_export_request, gunzip};
use jaegerin::test_support::{protobuf_body, resource_spans, scope_spans, span, trace_id};
use opentelemetry_proto::tonic::collector::trace::v1::ExportTraceServiceRequest;

const LIMIT: usize = 64 * 1024 * 1024;

fn make_trace_request(n_spans: usize) -> ExportTraceServiceRequest {
    let spans = (0..n_spans)
        .map(|i| span(&format!("span-{i}"), trace_id(i as u64)))
        .collect();

    ExportTraceServiceRequest {
        resource_spans: vec![resource_spans(vec![scope_spans(spans)])],
    }
}

fn bench_trace_id_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_id_prefix");

    let full = trace_id(42);
    group.bench_function("16_bytes", |b| {
        b.iter(|| trace_id_prefix(black_box(&full)));
    });

    let short = [0x01, 0x02, 0x03];
    group.bench_function("3_bytes", |b| {
        b.iter(|| trace_id_prefix(black_box(&short)));
    });

    group.finish();
}

fn bench_otlp_trace_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("otlp_trace_pipeline");

    for size in [10, 100, 1000] {
        let request = make_trace_request(size);
        let body = protobuf_body(&request);

        group.bench_with_input(BenchmarkId::new("gunzip", size), &body, |b, body| {
            b.iter(|| gunzip(black_box(body), LIMIT));
        });

        group.bench_with_input(BenchmarkId::new("span_records", size), &request, |b, req| {
            b.iter(|| span_records(black_box(req)));
        });

        // Full pipeline: gunzip + decode + traverse
        group.bench_with_input(BenchmarkId::new("full", size), &body, |b, body| {
            b.iter(|| {
                let request = decode_export_request(black_box(body), LIMIT)
                    .expect("bench payload decodes");
                span_records(&request)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trace_id_prefix, bench_otlp_trace_pipeline);
criterion_main!(benches);
