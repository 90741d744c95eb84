//! Raw chunk streaming against a mock vendor server.

use std::sync::{Arc, Mutex};

use ai_plugin::{AiClientFactory, AiError, ChatOptions, ClientConfig};
use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body() -> String {
    (0..40)
        .map(|i| {
            format!(
                "data: {{\"choices\":[{{\"delta\":{{\"content\":\"token-{i:02}\"}}}}]}}\n\n"
            )
        })
        .chain(std::iter::once("data: [DONE]\n\n".to_string()))
        .collect()
}

#[tokio::test]
async fn stream_chat_delivers_every_block_in_order() {
    let server = MockServer::start().await;
    let body = sse_body();
    assert!(body.len() > 2048);

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"stream": true, "model": "moonshot-v1-8k"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AiClientFactory::create(
        "moonshot",
        ClientConfig::new("moonshot", "key").endpoint(format!("{}/v1/chat/completions", server.uri())),
    )
    .unwrap();

    let received = Arc::new(Mutex::new(Vec::<Vec<u8>>::new()));
    let sink = received.clone();
    client
        .stream_chat(
            "write a paragraph",
            move |chunk| sink.lock().unwrap().push(chunk.to_vec()),
            &ChatOptions::default(),
        )
        .await
        .expect("stream failed");

    let blocks = received.lock().unwrap().clone();
    assert!(blocks.len() >= 3, "expected several blocks, got {}", blocks.len());
    assert!(blocks.iter().all(|b| !b.is_empty() && b.len() <= 1024));
    assert_eq!(blocks.concat(), body.into_bytes());

    // Nothing arrives once the call has returned
    tokio::task::yield_now().await;
    assert_eq!(received.lock().unwrap().len(), blocks.len());
}

#[tokio::test]
async fn chat_stream_can_be_pulled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data: hello\n\n"))
        .mount(&server)
        .await;

    let client = AiClientFactory::create(
        "deepseek",
        ClientConfig::new("deepseek", "key").endpoint(server.uri()),
    )
    .unwrap();

    let stream = client.chat_stream("hi", &ChatOptions::default()).unwrap();
    let blocks: Vec<_> = stream.collect().await;
    let bytes: Vec<u8> = blocks.into_iter().map(|b| b.unwrap()).collect::<Vec<_>>().concat();
    assert_eq!(bytes, b"data: hello\n\n");
}

#[tokio::test]
async fn request_override_is_streamed_with_flag() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"custom": "yes", "stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiClientFactory::create(
        "qianwen",
        ClientConfig::new("qianwen", "key").endpoint(server.uri()),
    )
    .unwrap()
    .with_request_preparation_override(|_, _, _| Ok(json!({"custom": "yes"})));

    let mut seen = Vec::new();
    client
        .stream_chat("hi", |chunk| seen.extend_from_slice(chunk), &ChatOptions::default())
        .await
        .unwrap();
    assert_eq!(seen, b"ok");
}

#[tokio::test]
async fn gemini_streams_from_stream_action() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:streamGenerateContent"))
        .and(query_param("alt", "sse"))
        .and(query_param("key", "g-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("data: {}\n\n"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AiClientFactory::create(
        "gemini",
        ClientConfig::new("gemini", "g-key")
            .endpoint(format!("{}/v1beta/models/gemini-pro:generateContent", server.uri())),
    )
    .unwrap();

    let mut calls = 0;
    client
        .stream_chat("hi", |_| calls += 1, &ChatOptions::default())
        .await
        .unwrap();
    assert_eq!(calls, 1);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("stream").is_none());
}

#[tokio::test]
async fn failed_stream_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let client = AiClientFactory::create(
        "minmax",
        ClientConfig::new("minmax", "bad").endpoint(server.uri()),
    )
    .unwrap();

    let mut calls = 0;
    let err = client
        .stream_chat("hi", |_| calls += 1, &ChatOptions::default())
        .await
        .unwrap_err();

    assert_eq!(calls, 0);
    match err {
        AiError::Transport(message) => assert!(message.contains("invalid key")),
        other => panic!("expected transport error, got {other:?}"),
    }
}
