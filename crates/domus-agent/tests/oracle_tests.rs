//! Integration tests for the completion-backed oracle

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use domus_agent::{CompletionOracle, DecisionOracle, LockAgent, LockCommand, OracleConfig};
use domus_core::Lock;

fn chat_response(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn completion_oracle_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 10,
            "temperature": 0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Lock")))
        .expect(1)
        .mount(&server)
        .await;

    let oracle = CompletionOracle::new(OracleConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        api_key: Some("test-key".to_string()),
    });

    let token = oracle
        .decide("I am leaving for work, lock the door.", "Unlocked", &[])
        .await
        .unwrap();
    assert_eq!(token, "Lock");
}

#[tokio::test]
async fn completion_oracle_trims_response_whitespace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("  Unlock\n")))
        .mount(&server)
        .await;

    let oracle = CompletionOracle::new(OracleConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        api_key: None,
    });
    let token = oracle.decide("let them in", "Locked", &[]).await.unwrap();
    assert_eq!(token, "Unlock");
}

#[tokio::test]
async fn completion_oracle_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let oracle = CompletionOracle::new(OracleConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        api_key: None,
    });
    let err = oracle.decide("x", "Unlocked", &[]).await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn agent_coerces_verbose_completion_to_no_action() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_response("I think you should Lock the door")),
        )
        .mount(&server)
        .await;

    let lock = Arc::new(Lock::new("Front Door"));
    let oracle = CompletionOracle::new(OracleConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        api_key: None,
    });
    let mut agent = LockAgent::new(Arc::clone(&lock), Box::new(oracle));

    let command = agent.handle_scenario("Going to bed now.").await.unwrap();
    assert_eq!(command, LockCommand::NoAction);
    assert!(!lock.is_locked());
}

#[tokio::test]
async fn agent_end_to_end_scenario_sequence() {
    let server = MockServer::start().await;
    // One mock per decision, matched in order via scoped mounts.
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Lock")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Unlock")))
        .mount(&server)
        .await;

    let lock = Arc::new(Lock::new("Front Door"));
    let oracle = CompletionOracle::new(OracleConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_string(),
        api_key: None,
    });
    let mut agent = LockAgent::new(Arc::clone(&lock), Box::new(oracle));

    assert_eq!(
        agent.handle_scenario("leaving for work").await.unwrap(),
        LockCommand::Lock
    );
    assert!(lock.is_locked());

    assert_eq!(
        agent.handle_scenario("guests are coming over").await.unwrap(),
        LockCommand::Unlock
    );
    assert!(!lock.is_locked());
    assert_eq!(agent.history().len(), 2);
}
