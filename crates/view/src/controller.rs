//! The query view controller.
//!
//! Owns the query text, the in-flight flag, the last successful result and
//! the transient notices, and mediates the single call to the query service.
//!
//! Submitting is split in two halves so an event loop never blocks on the
//! network: [`QueryView::begin_submit`] validates and produces the request,
//! [`QueryView::settle`] applies whatever came back. [`QueryView::submit`]
//! runs both halves back to back.

use crate::disclosure::Disclosure;
use crate::notice::{Notice, NoticeBoard, Severity};
use crate::state::{QueryState, RequestStatus};
use ragview_client::{QueryRequest, QueryResponse, QueryService};
use ragview_core::config::NoticeConfig;
use ragview_core::{AppError, AppResult};
use std::time::{Duration, Instant};

/// Title shared by both error notices.
pub const ERROR_TITLE: &str = "Error";

/// Shown when submit is invoked with a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a query";

/// Shown when the round trip fails for any reason.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to get response. Please try again.";

/// Controller behind the single query screen.
#[derive(Debug, Clone)]
pub struct QueryView {
    query: QueryState,
    status: RequestStatus,
    result: Option<QueryResponse>,
    notices: NoticeBoard,
    disclosure: Disclosure,
    notice_config: NoticeConfig,
}

impl Default for QueryView {
    fn default() -> Self {
        Self::new(NoticeConfig::default())
    }
}

impl QueryView {
    pub fn new(notice_config: NoticeConfig) -> Self {
        Self {
            query: QueryState::new(),
            status: RequestStatus::Idle,
            result: None,
            notices: NoticeBoard::new(),
            disclosure: Disclosure::new(0),
            notice_config,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Mutable access for keystroke handling.
    pub fn query_mut(&mut self) -> &mut QueryState {
        &mut self.query
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Last successful response, if any. Survives failed requests.
    pub fn result(&self) -> Option<&QueryResponse> {
        self.result.as_ref()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn disclosure(&self) -> &Disclosure {
        &self.disclosure
    }

    pub fn disclosure_mut(&mut self) -> &mut Disclosure {
        &mut self.disclosure
    }

    /// Validate the current query and mark a request as in flight.
    ///
    /// Returns the request to send. A blank query raises the empty-query
    /// notice, leaves the status untouched and returns `AppError::EmptyQuery`.
    pub fn begin_submit(&mut self, now: Instant) -> AppResult<QueryRequest> {
        if self.query.is_blank() {
            tracing::warn!("Submit rejected: empty query");
            self.notices.push(Notice::new(
                ERROR_TITLE,
                EMPTY_QUERY_MESSAGE,
                Severity::Error,
                now,
                Duration::from_millis(self.notice_config.empty_query_ms),
            ));
            return Err(AppError::EmptyQuery);
        }

        self.status = RequestStatus::InFlight;
        tracing::info!("Submitting query ({} chars)", self.query.text().len());

        Ok(QueryRequest::new(self.query.text()))
    }

    /// Apply the outcome of a request and return to idle.
    ///
    /// Success replaces the result and resets the excerpt disclosure. Failure
    /// raises the request-failed notice and keeps the previous result. The
    /// status is idle afterwards in both cases.
    pub fn settle(&mut self, outcome: AppResult<QueryResponse>, now: Instant) -> AppResult<()> {
        self.status = RequestStatus::Idle;

        match outcome {
            Ok(response) => {
                tracing::info!(
                    "Query settled with {} source chunks",
                    response.source_chunks.len()
                );
                self.disclosure = Disclosure::new(response.source_chunks.len());
                self.result = Some(response);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Query failed: {}", err);
                self.notices.push(Notice::new(
                    ERROR_TITLE,
                    REQUEST_FAILED_MESSAGE,
                    Severity::Error,
                    now,
                    Duration::from_millis(self.notice_config.request_failed_ms),
                ));
                Err(match err {
                    AppError::RequestFailed(message) => AppError::RequestFailed(message),
                    other => AppError::RequestFailed(other.to_string()),
                })
            }
        }
    }

    /// Validate, send exactly one request through `service`, and settle.
    ///
    /// Errors are `EmptyQuery` or `RequestFailed`; both have already been
    /// surfaced as notices when this returns.
    pub async fn submit(&mut self, service: &dyn QueryService) -> AppResult<()> {
        let request = self.begin_submit(Instant::now())?;
        let outcome = service.query(&request).await;
        self.settle(outcome, Instant::now())
    }

    /// Drop notices whose delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        self.notices.prune(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragview_client::SourceChunk;

    fn response(answer: &str, files: &[&str]) -> QueryResponse {
        QueryResponse {
            answer: answer.to_string(),
            source_chunks: files
                .iter()
                .enumerate()
                .map(|(i, f)| SourceChunk {
                    chunk: format!("excerpt {}", i),
                    filename: f.to_string(),
                    filepath: format!("/docs/{}", f),
                    chunk_index: i as u32,
                    score: 1.0 - i as f64 * 0.1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let now = Instant::now();
        let mut view = QueryView::default();
        view.query_mut().set("   ");

        let result = view.begin_submit(now);
        assert!(matches!(result, Err(AppError::EmptyQuery)));
        assert_eq!(view.status(), RequestStatus::Idle);

        let notices: Vec<_> = view.notices().active(now).collect();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].description, EMPTY_QUERY_MESSAGE);
        assert_eq!(notices[0].severity, Severity::Error);
        assert_eq!(notices[0].expires_at, now + Duration::from_millis(3000));
    }

    #[test]
    fn test_begin_submit_sends_raw_text() {
        let mut view = QueryView::default();
        view.query_mut().set("  refund policy? ");

        let request = view.begin_submit(Instant::now()).unwrap();
        assert_eq!(request.question, "  refund policy? ");
        assert_eq!(request.top_k, 10);
        assert_eq!(view.status(), RequestStatus::InFlight);
        assert_eq!(view.query().text(), "  refund policy? ");
    }

    #[test]
    fn test_settle_success_replaces_result() {
        let now = Instant::now();
        let mut view = QueryView::default();
        view.query_mut().set("q");
        view.begin_submit(now).unwrap();

        view.settle(Ok(response("a", &["x.md", "y.md"])), now).unwrap();

        assert_eq!(view.status(), RequestStatus::Idle);
        assert_eq!(view.result().unwrap().answer, "a");
        assert_eq!(view.disclosure().len(), 2);
        assert!(!view.disclosure().is_section_open());
    }

    #[test]
    fn test_settle_failure_keeps_stale_result() {
        let now = Instant::now();
        let mut view = QueryView::default();
        view.query_mut().set("q");
        view.begin_submit(now).unwrap();
        view.settle(Ok(response("old", &["x.md"])), now).unwrap();

        view.begin_submit(now).unwrap();
        let err = view
            .settle(Err(AppError::RequestFailed("503".to_string())), now)
            .unwrap_err();

        assert!(matches!(err, AppError::RequestFailed(_)));
        assert_eq!(view.status(), RequestStatus::Idle);
        assert_eq!(view.result(), Some(&response("old", &["x.md"])));

        let notice = view.notices().active(now).last().unwrap();
        assert_eq!(notice.description, REQUEST_FAILED_MESSAGE);
        assert_eq!(notice.expires_at, now + Duration::from_millis(5000));
    }

    #[test]
    fn test_settle_maps_other_errors_to_request_failed() {
        let mut view = QueryView::default();
        let err = view
            .settle(Err(AppError::Other("socket closed".to_string())), Instant::now())
            .unwrap_err();
        assert!(matches!(err, AppError::RequestFailed(m) if m.contains("socket closed")));
    }

    #[test]
    fn test_new_result_resets_disclosure() {
        let now = Instant::now();
        let mut view = QueryView::default();
        view.settle(Ok(response("a", &["x.md"])), now).unwrap();
        view.disclosure_mut().toggle_section();
        view.disclosure_mut().toggle_item(0);

        view.settle(Ok(response("b", &["y.md", "z.md"])), now).unwrap();
        assert!(!view.disclosure().is_section_open());
        assert!(view.disclosure().is_item_open(0));
        assert_eq!(view.disclosure().len(), 2);
    }

    #[test]
    fn test_custom_notice_durations() {
        let now = Instant::now();
        let mut view = QueryView::new(NoticeConfig {
            empty_query_ms: 100,
            request_failed_ms: 200,
        });
        let _ = view.begin_submit(now);
        view.tick(now + Duration::from_millis(150));
        assert!(view.notices().is_empty());
    }
}
