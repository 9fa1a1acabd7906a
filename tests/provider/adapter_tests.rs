// Provider adapter tests - each adapter against a mock HTTP server
//
// Covers auth headers, payload shape, text extraction, and the failure
// reasons reported for HTTP errors, empty text and missing credentials.

use cascade_core::model::PollingPolicy;
use cascade_core::{ProviderConfig, ProviderFactory, ProviderId, ProviderOutcome};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::Client;
use serde_json::{Value, json};

const PROMPT: &str = "Review: we ship Friday without a rollback plan.";

fn adapter_for(id: ProviderId, server: &ServerGuard, key: Option<&str>) -> std::sync::Arc<dyn cascade_core::ProviderAdapter> {
    let mut config = ProviderConfig::defaults(id).with_endpoint(server.url());
    config.api_key = key.map(str::to_string);
    ProviderFactory::create(&config, Client::new(), PollingPolicy::default())
}

fn success(id: ProviderId, text: &str) -> ProviderOutcome {
    ProviderOutcome::Success {
        provider: id,
        text: text.to_string(),
    }
}

fn failure(id: ProviderId, reason: &str) -> ProviderOutcome {
    ProviderOutcome::Failure {
        provider: id,
        reason: reason.to_string(),
    }
}

/// Path, auth header and a response body carrying `text` for each sync provider.
fn sync_fixture(id: ProviderId, text: &str) -> (&'static str, (&'static str, &'static str), Value) {
    match id {
        ProviderId::OpenAi => (
            "/v1/chat/completions",
            ("authorization", "Bearer test-key"),
            json!({"choices": [{"message": {"role": "assistant", "content": text}}]}),
        ),
        ProviderId::Gemini => (
            "/v1beta/models/gemini-1.5-flash:generateContent",
            ("x-goog-api-key", "test-key"),
            json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]}),
        ),
        ProviderId::Anthropic => (
            "/v1/messages",
            ("x-api-key", "test-key"),
            json!({"content": [{"type": "text", "text": text}], "stop_reason": "end_turn"}),
        ),
        ProviderId::HuggingFace => (
            "/models/mistralai/Mistral-7B-Instruct-v0.3",
            ("authorization", "Bearer test-key"),
            json!([{"generated_text": text}]),
        ),
        ProviderId::Replicate => unreachable!("replicate is covered by polling_tests"),
    }
}

const SYNC_PROVIDERS: [ProviderId; 4] = [
    ProviderId::OpenAi,
    ProviderId::Gemini,
    ProviderId::Anthropic,
    ProviderId::HuggingFace,
];

#[tokio::test]
async fn sync_providers_return_text_verbatim() {
    let text = "1. Add a rollback plan\n2. Move launch to Tuesday";
    for id in SYNC_PROVIDERS {
        let mut server = Server::new_async().await;
        let (path, (header, value), body) = sync_fixture(id, text);
        let mock = server
            .mock("POST", path)
            .match_header(header, value)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(1)
            .create_async()
            .await;

        let outcome = adapter_for(id, &server, Some("test-key")).attempt(PROMPT).await;

        assert_eq!(outcome, success(id, text), "provider {id}");
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn blank_text_is_an_empty_response() {
    for id in SYNC_PROVIDERS {
        let mut server = Server::new_async().await;
        let (path, _, body) = sync_fixture(id, "   \n");
        server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let outcome = adapter_for(id, &server, Some("test-key")).attempt(PROMPT).await;

        assert_eq!(outcome, failure(id, "empty response"), "provider {id}");
    }
}

#[tokio::test]
async fn non_success_status_is_reported() {
    for (id, status) in SYNC_PROVIDERS.into_iter().zip([401usize, 429, 529, 503]) {
        let mut server = Server::new_async().await;
        let (path, _, _) = sync_fixture(id, "unused");
        server
            .mock("POST", path)
            .with_status(status)
            .with_body(r#"{"error":{"message":"nope"}}"#)
            .create_async()
            .await;

        let outcome = adapter_for(id, &server, Some("test-key")).attempt(PROMPT).await;

        assert_eq!(outcome, failure(id, &format!("HTTP {status}")), "provider {id}");
    }
}

#[tokio::test]
async fn missing_credential_makes_no_network_call() {
    for id in ProviderId::PRIORITY {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let outcome = adapter_for(id, &server, None).attempt(PROMPT).await;

        let env_var = ProviderConfig::defaults(id).api_key_env;
        assert_eq!(
            outcome,
            failure(id, &format!("credential not configured: {env_var}"))
        );
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn openai_payload_carries_instruction_and_prompt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.2,
            "messages": [
                {"role": "system"},
                {"role": "user", "content": PROMPT}
            ]
        })))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "ok"}}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let outcome = adapter_for(ProviderId::OpenAi, &server, Some("test-key"))
        .attempt(PROMPT)
        .await;

    assert_eq!(outcome, success(ProviderId::OpenAi, "ok"));
    mock.assert_async().await;
}

#[tokio::test]
async fn anthropic_sends_version_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-3-5-haiku-latest",
            "messages": [{"role": "user", "content": PROMPT}]
        })))
        .with_status(200)
        .with_body(json!({"content": [{"type": "text", "text": "ok"}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let outcome = adapter_for(ProviderId::Anthropic, &server, Some("test-key"))
        .attempt(PROMPT)
        .await;

    assert_eq!(outcome, success(ProviderId::Anthropic, "ok"));
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_body_is_an_invalid_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let outcome = adapter_for(ProviderId::OpenAi, &server, Some("test-key"))
        .attempt(PROMPT)
        .await;

    match outcome {
        ProviderOutcome::Failure { provider, reason } => {
            assert_eq!(provider, ProviderId::OpenAi);
            assert!(reason.starts_with("invalid response: "), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let config = ProviderConfig::defaults(ProviderId::HuggingFace)
        .with_endpoint("http://127.0.0.1:1")
        .with_api_key("test-key");
    let adapter = ProviderFactory::create(&config, Client::new(), PollingPolicy::default());

    match adapter.attempt(PROMPT).await {
        ProviderOutcome::Failure { reason, .. } => {
            assert!(reason.starts_with("network error: "), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
