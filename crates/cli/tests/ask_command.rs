//! Runs the `ragview ask` binary against a wiremock query service.

use serde_json::json;
use std::process::{Command, Output};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_ask(endpoint: String, args: Vec<&'static str>) -> Output {
    let workspace = tempfile::tempdir().unwrap();
    let workspace_path = workspace.path().to_path_buf();

    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_ragview"))
            .arg("--workspace")
            .arg(&workspace_path)
            .arg("--endpoint")
            .arg(endpoint)
            .arg("ask")
            .args(args)
            .env_remove("RAGVIEW_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "true")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_answer_and_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"question": "What is the refund policy?", "top_k": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Refunds within 30 days.",
            "source_chunks": [{
                "chunk": "Policy text...",
                "filename": "policy.md",
                "filepath": "/docs/policy.md",
                "chunk_index": 0,
                "score": 0.92
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_ask(
        format!("{}/query", server.uri()),
        vec!["What is the refund policy?", "--sources"],
    )
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Answer:"));
    assert!(stdout.contains("Refunds within 30 days."));
    assert!(stdout.contains("Source Documents (1)"));
    assert!(stdout.contains("File: policy.md"));
    assert!(stdout.contains("Policy text..."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_blank_question_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_ask(format!("{}/query", server.uri()), vec!["   "]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a query"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_server_error_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "index missing"})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_ask(format!("{}/query", server.uri()), vec!["anything"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to get response. Please try again."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Yes.",
            "source_chunks": []
        })))
        .mount(&server)
        .await;

    let output = run_ask(format!("{}/query", server.uri()), vec!["q", "--json"]).await;

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["answer"], "Yes.");
    assert_eq!(parsed["source_chunks"], json!([]));
}
