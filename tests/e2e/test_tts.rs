use crate::e2e::helpers;

use helpers::assertions::{assert_error_body, assert_wav_audio};
use helpers::{embedding, FakeTtsRepository, TestContext};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_hello(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello", "embed": embedding(0.0) }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let wav = assert_wav_audio(response.body.as_ref().unwrap());
    assert_eq!(wav.len(), 44 + 3_200 * 2);
    assert_eq!(ctx.repo.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "", "embed": embedding(0.0) }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("text is empty");
    assert_error_body(response.body.as_ref().unwrap());
    assert_eq!(ctx.repo.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_whitespace_only_text(ctx: &TestContext) {
    for text in [" ", "\t\n", "   \r\n  "] {
        let response = ctx
            .client
            .post("/tts", &json!({ "text": text, "embed": embedding(0.0) }))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("text is empty");
    }
    assert_eq!(ctx.repo.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_short_embedding(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hi", "embed": vec![0.0f32; 10] }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("length 256");
    assert_eq!(ctx.repo.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_every_wrong_embedding_length(ctx: &TestContext) {
    for len in [0usize, 255, 257, 512] {
        let response = ctx
            .client
            .post("/tts", &json!({ "text": "Hi", "embed": vec![0.0f32; len] }))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("embed must have length 256");
    }
    assert_eq!(ctx.repo.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_body(ctx: &TestContext) {
    let response = ctx.client.post_raw("/tts", "{\"text\": ").await.unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(response.body.as_ref().unwrap());

    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello" }))
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(ctx.repo.call_count(), 0);
}

#[tokio::test]
async fn it_should_return_500_with_backend_error_text() {
    let ctx = TestContext::with_repository(FakeTtsRepository::failing("CUDA out of memory"))
        .await
        .unwrap();

    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello", "embed": embedding(0.1) }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("TTS failed: CUDA out of memory");
    assert_error_body(response.body.as_ref().unwrap());
    assert_eq!(ctx.repo.call_count(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_identical_requests_independently(ctx: &TestContext) {
    let body = json!({ "text": "Same words", "embed": embedding(0.3) });

    let first = ctx.client.post("/tts", &body).await.unwrap();
    let second = ctx.client.post("/tts", &body).await.unwrap();

    first.assert_status(StatusCode::OK);
    second.assert_status(StatusCode::OK);
    assert_wav_audio(first.body.as_ref().unwrap());
    assert_wav_audio(second.body.as_ref().unwrap());
    assert_eq!(ctx.repo.call_count(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_requests(ctx: &TestContext) {
    let mut futures = Vec::new();
    for i in 0..8 {
        let client = ctx.client.clone();
        let body = json!({ "text": format!("Request {}", i), "embed": embedding(0.01 * i as f32) });
        futures.push(async move { client.post("/tts", &body).await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
        assert_wav_audio(response.body.as_ref().unwrap());
    }
    assert_eq!(ctx.repo.call_count(), 8);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/tts", &json!({ "text": "Hello", "embed": embedding(0.0) }))
        .await
        .unwrap();

    response.assert_header_exists("x-request-id");
}
