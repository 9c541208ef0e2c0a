mod common;

use common::{local_config, start_server};
use jaegerin::otlp::receiver::PROTOBUF_CONTENT_TYPE;
use jaegerin::test_support::{protobuf_body, trace_id, trace_request};
use tokio::task::JoinSet;

const CLIENTS: u64 = 16;
const SPANS_PER_REQUEST: u64 = 3;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_reported_independently() {
    let running = start_server(local_config()).await;
    let client = reqwest::Client::new();
    let url = running.traces_url();

    let mut join_set = JoinSet::new();
    for client_id in 0..CLIENTS {
        let client = client.clone();
        let url = url.clone();
        join_set.spawn(async move {
            let names: Vec<String> = (0..SPANS_PER_REQUEST)
                .map(|n| format!("client-{client_id}-span-{n}"))
                .collect();
            let spans: Vec<(&str, [u8; 16])> = names
                .iter()
                .enumerate()
                .map(|(n, name)| (name.as_str(), trace_id(client_id * 100 + n as u64)))
                .collect();

            client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
                .body(protobuf_body(&trace_request(&[&spans])))
                .send()
                .await
                .expect("request should be sent")
                .status()
        });
    }

    while let Some(status) = join_set.join_next().await {
        assert_eq!(status.unwrap(), reqwest::StatusCode::OK);
    }

    let records = running.reporter.records();
    assert_eq!(records.len() as u64, CLIENTS * SPANS_PER_REQUEST);

    // Each request's spans keep their own order and ids
    for client_id in 0..CLIENTS {
        let prefix = format!("client-{client_id}-");
        let mine: Vec<_> = records
            .iter()
            .filter(|r| r.name.starts_with(&prefix))
            .map(|r| (r.name.clone(), r.id))
            .collect();
        let expected: Vec<_> = (0..SPANS_PER_REQUEST)
            .map(|n| (format!("{prefix}span-{n}"), client_id * 100 + n))
            .collect();
        assert_eq!(mine, expected);
    }

    running.server.stop().await.unwrap();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_bad_request_does_not_affect_concurrent_good_ones() {
    let running = start_server(local_config()).await;
    let client = reqwest::Client::new();
    let url = running.traces_url();

    let good = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            let body = protobuf_body(&trace_request(&[&[("checkout", trace_id(1))]]));
            client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
                .body(body)
                .send()
                .await
                .expect("request should be sent")
                .status()
        })
    };
    let bad = {
        let client = client.clone();
        let url = url.clone();
        tokio::spawn(async move {
            client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, PROTOBUF_CONTENT_TYPE)
                .body(b"definitely not gzip".to_vec())
                .send()
                .await
                .expect("request should be sent")
                .status()
        })
    };

    assert_eq!(good.await.unwrap(), reqwest::StatusCode::OK);
    assert_eq!(bad.await.unwrap(), reqwest::StatusCode::BAD_REQUEST);

    let records = running.reporter.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "checkout");

    running.server.stop().await.unwrap();
}
