//! End-to-end submit behavior of the query view against a scripted service.

use ragview_client::{MockQueryService, QueryResponse, SourceChunk};
use ragview_core::AppError;
use ragview_view::{QueryView, RequestStatus, Severity, EMPTY_QUERY_MESSAGE, REQUEST_FAILED_MESSAGE};
use std::time::Instant;

fn refund_response() -> QueryResponse {
    QueryResponse {
        answer: "Refunds within 30 days.".to_string(),
        source_chunks: vec![SourceChunk {
            chunk: "Policy text...".to_string(),
            filename: "policy.md".to_string(),
            filepath: "/docs/policy.md".to_string(),
            chunk_index: 0,
            score: 0.92,
        }],
    }
}

fn response_with(files: &[&str]) -> QueryResponse {
    QueryResponse {
        answer: format!("{} sources", files.len()),
        source_chunks: files
            .iter()
            .enumerate()
            .map(|(i, f)| SourceChunk {
                chunk: format!("chunk {}", i),
                filename: f.to_string(),
                filepath: format!("/kb/{}", f),
                chunk_index: i as u32,
                score: 0.9 - i as f64 * 0.05,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_blank_inputs_make_no_calls() {
    for input in ["", " ", "   ", "\t", "\n  \t"] {
        let service = MockQueryService::new().respond(refund_response());
        let mut view = QueryView::default();
        view.query_mut().set(input);

        let result = view.submit(&service).await;

        assert!(matches!(result, Err(AppError::EmptyQuery)), "input {:?}", input);
        assert_eq!(service.call_count(), 0);
        assert_eq!(view.status(), RequestStatus::Idle);

        let model = view.view(Instant::now());
        assert_eq!(model.notices.len(), 1);
        assert_eq!(model.notices[0].description, EMPTY_QUERY_MESSAGE);
        assert_eq!(model.notices[0].severity, Severity::Error);
    }
}

#[tokio::test]
async fn test_refund_policy_scenario() {
    let service = MockQueryService::new().respond(refund_response());
    let mut view = QueryView::default();
    view.query_mut().set("What is the refund policy?");

    view.submit(&service).await.unwrap();

    let calls = service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].question, "What is the refund policy?");
    assert_eq!(calls[0].top_k, 10);

    let model = view.view(Instant::now());
    assert!(model.status.is_none());
    let result = model.result.expect("result region visible");
    assert_eq!(result.answer_lines, vec!["Refunds within 30 days."]);
    assert!(!result.sources.open);
    assert_eq!(result.sources.cards.len(), 1);
    assert_eq!(result.sources.cards[0].label, "File: policy.md");
    assert_eq!(result.sources.cards[0].text_lines, vec!["Policy text..."]);
}

#[tokio::test]
async fn test_cards_match_received_order() {
    let files = ["zeta.md", "alpha.md", "mid.md", "alpha.md"];
    let service = MockQueryService::new().respond(response_with(&files));
    let mut view = QueryView::default();
    view.query_mut().set("order");

    view.submit(&service).await.unwrap();

    let cards = view.view(Instant::now()).result.unwrap().sources.cards;
    let labels: Vec<_> = cards.iter().map(|c| c.label.clone()).collect();
    assert_eq!(
        labels,
        vec!["File: zeta.md", "File: alpha.md", "File: mid.md", "File: alpha.md"]
    );
}

#[tokio::test]
async fn test_status_idle_after_every_outcome() {
    let service = MockQueryService::new()
        .respond(refund_response())
        .fail("connection refused")
        .respond(response_with(&[]));
    let mut view = QueryView::default();
    view.query_mut().set("q");

    let _ = view.submit(&service).await;
    assert_eq!(view.status(), RequestStatus::Idle);
    let _ = view.submit(&service).await;
    assert_eq!(view.status(), RequestStatus::Idle);
    let _ = view.submit(&service).await;
    assert_eq!(view.status(), RequestStatus::Idle);

    assert_eq!(service.call_count(), 3);
}

#[tokio::test]
async fn test_failure_keeps_previous_result() {
    let service = MockQueryService::new()
        .respond(refund_response())
        .fail("Query service error (500 Internal Server Error)");
    let mut view = QueryView::default();
    view.query_mut().set("What is the refund policy?");

    view.submit(&service).await.unwrap();
    let before = view.result().cloned();

    let err = view.submit(&service).await.unwrap_err();
    assert!(matches!(err, AppError::RequestFailed(_)));
    assert_eq!(view.result().cloned(), before);
    assert_eq!(view.status(), RequestStatus::Idle);

    let model = view.view(Instant::now());
    assert!(model.result.is_some());
    assert!(model
        .notices
        .iter()
        .any(|n| n.description == REQUEST_FAILED_MESSAGE && n.severity == Severity::Error));
}

#[tokio::test]
async fn test_query_not_cleared_after_submit() {
    let service = MockQueryService::new().respond(refund_response());
    let mut view = QueryView::default();
    view.query_mut().set("What is the refund policy?");

    view.submit(&service).await.unwrap();
    assert_eq!(view.query().text(), "What is the refund policy?");
}

#[test]
fn test_overlapping_submits_last_settle_wins() {
    let now = Instant::now();
    let mut view = QueryView::default();

    view.query_mut().set("first");
    let first = view.begin_submit(now).unwrap();
    view.query_mut().set("second");
    let second = view.begin_submit(now).unwrap();
    assert_eq!(first.question, "first");
    assert_eq!(second.question, "second");

    // The second request settles before the first one.
    view.settle(Ok(response_with(&["second.md"])), now).unwrap();
    assert_eq!(view.status(), RequestStatus::Idle);
    view.settle(Ok(response_with(&["first-a.md", "first-b.md"])), now)
        .unwrap();

    let cards = view.view(now).result.unwrap().sources.cards;
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].label, "File: first-a.md");
}

#[test]
fn test_result_hidden_while_loading_then_restored() {
    let now = Instant::now();
    let mut view = QueryView::default();
    view.query_mut().set("q");
    view.begin_submit(now).unwrap();
    view.settle(Ok(refund_response()), now).unwrap();

    view.begin_submit(now).unwrap();
    assert!(view.view(now).result.is_none());

    let _ = view.settle(Err(AppError::RequestFailed("timeout".to_string())), now);
    assert!(view.view(now).result.is_some());
}
