//! Integration tests for the chat-completions client against a mock server.

mod common;

use common::{TEST_MODEL, chat_response, error_response, generator_config};
use quill::error::GeneratorError;
use quill::llm::{GenerationRequest, OpenAiGenerator, TextGenerator, generate_with_retry};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> GenerationRequest {
    GenerationRequest::new("You write commit messages.", "diff --git a/a.rs b/a.rs\n+fn a() {}")
}

async fn generator(server: &MockServer) -> OpenAiGenerator {
    OpenAiGenerator::new(&generator_config(&server.uri())).expect("Failed to build generator")
}

#[tokio::test]
async fn test_generate_returns_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({ "model": TEST_MODEL, "max_tokens": 100 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("  feat: add a\n")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generator(&server).await.generate(&request()).await.unwrap();
    assert_eq!(text, "feat: add a");
}

#[tokio::test]
async fn test_request_carries_system_and_user_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("fix: b")))
        .mount(&server)
        .await;

    generator(&server).await.generate(&request()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = requests[0].body_json().unwrap();

    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "You write commit messages.");
    assert_eq!(body["messages"][1]["role"], "user");
    assert!(body["messages"][1]["content"].as_str().unwrap().contains("+fn a() {}"));
    assert_eq!(body["top_p"], 1.0);
    assert_eq!(body["presence_penalty"], 0.0);
}

#[tokio::test]
async fn test_unauthorized_is_invalid_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_response("Incorrect API key provided")))
        .expect(1)
        .mount(&server)
        .await;

    // Not retried
    let result = generate_with_retry(&generator(&server).await, &request()).await;
    assert!(matches!(result, Err(GeneratorError::InvalidApiKey { status: 401 })));
}

#[tokio::test]
async fn test_context_length_error_is_input_too_large() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_response(
            "This model's maximum context length is 16385 tokens. However, your messages resulted in 20000 tokens.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let result = generate_with_retry(&generator(&server).await, &request()).await;
    match result {
        Err(GeneratorError::InputTooLarge(message)) => {
            assert!(message.contains("maximum context length"))
        }
        other => panic!("expected InputTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_bad_request_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response("The model does not exist")))
        .mount(&server)
        .await;

    let result = generator(&server).await.generate(&request()).await;
    match result {
        Err(GeneratorError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "The model does not exist");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_is_retried_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_response("Rate limit reached")))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("docs: update readme")))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate_with_retry(&generator(&server).await, &request()).await.unwrap();
    assert_eq!(text, "docs: update readme");
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let result = generate_with_retry(&generator(&server).await, &request()).await;
    let err = result.unwrap_err();
    assert!(matches!(err, GeneratorError::RetriesExhausted(_)));
    assert!(matches!(err.root(), GeneratorError::ServerError { status: 503 }));
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = generator(&server).await.generate(&request()).await;
    assert!(matches!(result, Err(GeneratorError::EmptyResponse)));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = generator(&server).await.generate(&request()).await;
    assert!(matches!(result, Err(GeneratorError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // Bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let generator =
        OpenAiGenerator::new(&generator_config(&format!("http://127.0.0.1:{port}"))).unwrap();
    let result = generator.generate(&request()).await;
    assert!(matches!(result, Err(GeneratorError::Connection(_))));
}

#[test]
fn test_missing_key_is_rejected_up_front() {
    let mut config = generator_config("http://localhost");
    config.api_key = None;
    assert!(matches!(
        OpenAiGenerator::new(&config),
        Err(GeneratorError::MissingApiKey)
    ));
}
