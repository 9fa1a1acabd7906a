// Replicate job polling over HTTP
//
// Submission and status reads both go to a mock server. Settled jobs finish
// on the first read, so only the pending case uses a short interval.

use cascade_core::model::PollingPolicy;
use cascade_core::{ProviderConfig, ProviderFactory, ProviderId, ProviderOutcome};
use mockito::{Matcher, Server, ServerGuard};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

const SUBMIT_PATH: &str = "/v1/models/meta/meta-llama-3-8b-instruct/predictions";
const STATUS_PATH: &str = "/v1/predictions/p1";

/// 30 reads inside a 300ms ceiling.
fn fast_policy() -> PollingPolicy {
    PollingPolicy {
        max_polls: 30,
        interval: Duration::from_millis(10),
    }
}

async fn run(server: &ServerGuard) -> ProviderOutcome {
    run_with(server, PollingPolicy::default()).await
}

async fn run_with(server: &ServerGuard, policy: PollingPolicy) -> ProviderOutcome {
    let config = ProviderConfig::defaults(ProviderId::Replicate)
        .with_endpoint(server.url())
        .with_api_key("r8-token");
    ProviderFactory::create(&config, Client::new(), policy)
        .attempt("Summarize the incident report")
        .await
}

fn failure(reason: &str) -> ProviderOutcome {
    ProviderOutcome::Failure {
        provider: ProviderId::Replicate,
        reason: reason.to_string(),
    }
}

async fn accept_submission(server: &mut ServerGuard) -> mockito::Mock {
    let status_url = format!("{}{STATUS_PATH}", server.url());
    server
        .mock("POST", SUBMIT_PATH)
        .match_header("authorization", "Bearer r8-token")
        .match_body(Matcher::PartialJson(json!({
            "input": {"prompt": "Summarize the incident report"}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"id": "p1", "status": "starting", "urls": {"get": status_url}}).to_string(),
        )
        .expect(1)
        .create_async()
        .await
}

#[tokio::test]
async fn succeeded_prediction_returns_joined_output() {
    let mut server = Server::new_async().await;
    let submit = accept_submission(&mut server).await;
    let status = server
        .mock("GET", STATUS_PATH)
        .match_header("authorization", "Bearer r8-token")
        .with_status(200)
        .with_body(
            json!({"id": "p1", "status": "succeeded", "output": ["Root cause", "Follow-ups"]})
                .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let outcome = run(&server).await;

    assert_eq!(
        outcome,
        ProviderOutcome::Success {
            provider: ProviderId::Replicate,
            text: "Root cause\nFollow-ups".to_string(),
        }
    );
    submit.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn pending_forever_times_out_after_budget() {
    let mut server = Server::new_async().await;
    accept_submission(&mut server).await;
    let status = server
        .mock("GET", STATUS_PATH)
        .with_status(200)
        .with_body(json!({"id": "p1", "status": "processing", "output": null}).to_string())
        .expect_at_least(1)
        .expect_at_most(30)
        .create_async()
        .await;

    assert_eq!(run_with(&server, fast_policy()).await, failure("timeout"));
    status.assert_async().await;
}

#[tokio::test]
async fn missing_status_url_skips_polling() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", SUBMIT_PATH)
        .with_status(201)
        .with_body(json!({"id": "p1", "status": "starting"}).to_string())
        .create_async()
        .await;
    let status = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    assert_eq!(run(&server).await, failure("missing status URL"));
    status.assert_async().await;
}

#[tokio::test]
async fn terminal_failure_states_end_the_job() {
    for state in ["failed", "canceled"] {
        let mut server = Server::new_async().await;
        accept_submission(&mut server).await;
        let status = server
            .mock("GET", STATUS_PATH)
            .with_status(200)
            .with_body(json!({"id": "p1", "status": state, "error": "boom"}).to_string())
            .expect(1)
            .create_async()
            .await;

        assert_eq!(run(&server).await, failure(state));
        status.assert_async().await;
    }
}

#[tokio::test]
async fn status_read_error_is_terminal() {
    let mut server = Server::new_async().await;
    accept_submission(&mut server).await;
    let status = server
        .mock("GET", STATUS_PATH)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    assert_eq!(run(&server).await, failure("HTTP 500"));
    status.assert_async().await;
}

#[tokio::test]
async fn rejected_submission_reports_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", SUBMIT_PATH)
        .with_status(422)
        .with_body(r#"{"detail":"invalid input"}"#)
        .create_async()
        .await;

    assert_eq!(run(&server).await, failure("HTTP 422"));
}
