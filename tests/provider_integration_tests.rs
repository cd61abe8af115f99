//! Integration tests for the Gemini provider and the exchange client.
//!
//! These tests use wiremock to simulate the generateContent endpoint,
//! so no real network access or API key is needed.

use std::sync::Arc;
use std::time::Duration;

use legion::inference::{
    CompletionProvider, ExchangeClient, GeminiProvider, GenerationRequest, ProviderError,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/models/gemini-test:generateContent";

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(Some("test-key".to_string()), Some(server.uri()))
}

fn reply_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    })
}

fn request<'a>(prompt: &'a str) -> GenerationRequest<'a> {
    GenerationRequest {
        model: "gemini-test",
        prompt,
        system_instruction: "Be precise.",
    }
}

// ============================================================================
// GeminiProvider
// ============================================================================

#[tokio::test]
async fn test_gemini_returns_candidate_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Design a filter"}]}],
            "systemInstruction": {"parts": [{"text": "Be precise."}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Use an RC network.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider.generate_content(request("Design a filter")).await;

    assert_eq!(result, Ok("Use an RC network.".to_string()));
}

#[tokio::test]
async fn test_gemini_joins_multiple_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Part one. "}, {"text": "Part two."}]}
            }]
        })))
        .mount(&mock_server)
        .await;

    let result = provider_for(&mock_server)
        .generate_content(request("Explain"))
        .await;

    assert_eq!(result.as_deref(), Ok("Part one. Part two."));
}

#[tokio::test]
async fn test_gemini_empty_candidates_yield_empty_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&mock_server)
        .await;

    let result = provider_for(&mock_server)
        .generate_content(request("Hello"))
        .await;

    assert_eq!(result.as_deref(), Ok(""));
}

#[tokio::test]
async fn test_gemini_api_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "code": 400,
                "message": "API key not valid.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&mock_server)
        .await;

    let result = provider_for(&mock_server)
        .generate_content(request("Hello"))
        .await;

    match result {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("INVALID_ARGUMENT"));
            assert!(message.contains("API key not valid."));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = provider_for(&mock_server)
        .generate_content(request("Hello"))
        .await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_gemini_without_key_never_calls_the_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("unused")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = GeminiProvider::new(None, Some(mock_server.uri()));
    let result = provider.generate_content(request("Hello")).await;

    assert!(matches!(result, Err(ProviderError::Config(_))));
}

// ============================================================================
// ExchangeClient
// ============================================================================

fn client_for(server: &MockServer) -> ExchangeClient {
    ExchangeClient::new(Arc::new(provider_for(server)), "gemini-test")
}

#[tokio::test]
async fn test_exchange_sends_fixed_system_instruction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": legion::inference::exchange::SYSTEM_INSTRUCTION}]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Here is a design.")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server).send("Design a 5V regulator").await;

    assert_eq!(reply, "Here is a design.");
}

#[tokio::test]
async fn test_exchange_formats_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server).send("Hello").await;

    assert_eq!(reply, "Error communicating with AI: upstream exploded");
}

#[tokio::test]
async fn test_exchange_reports_no_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server).send("Hello").await;

    assert_eq!(reply, "No response generated.");
}

#[tokio::test]
async fn test_exchange_times_out_slow_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply_body("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server)
        .with_timeout(Some(Duration::from_millis(100)))
        .send("Hello")
        .await;

    assert!(reply.starts_with("Error communicating with AI: "));
    assert!(reply.contains("timed out"));
}
