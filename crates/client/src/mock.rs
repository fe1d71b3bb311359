//! Scripted in-process query service.
//!
//! Replays a queue of outcomes and records every request it receives, so
//! callers can assert how many round trips were made and with what payload.

use crate::client::{QueryRequest, QueryResponse, QueryService};
use ragview_core::{AppError, AppResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted outcome of a `query` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Answer with this response
    Respond(QueryResponse),
    /// Fail with `AppError::RequestFailed(message)`
    Fail(String),
}

/// Mock query service for tests and offline development.
#[derive(Debug, Default)]
pub struct MockQueryService {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    calls: Mutex<Vec<QueryRequest>>,
}

impl MockQueryService {
    /// Create a mock with an empty script. Unscripted calls fail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, response: QueryResponse) -> Self {
        self.push(MockOutcome::Respond(response));
        self
    }

    /// Queue a failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(MockOutcome::Fail(message.into()));
        self
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<QueryRequest> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn push(&self, outcome: MockOutcome) {
        match self.outcomes.lock() {
            Ok(mut queue) => queue.push_back(outcome),
            Err(poisoned) => poisoned.into_inner().push_back(outcome),
        }
    }

    fn next_outcome(&self) -> Option<MockOutcome> {
        match self.outcomes.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }
}

#[async_trait::async_trait]
impl QueryService for MockQueryService {
    fn endpoint(&self) -> &str {
        "mock://query"
    }

    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        match self.next_outcome() {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::Fail(message)) => Err(AppError::RequestFailed(message)),
            None => Err(AppError::RequestFailed(
                "mock query service has no scripted outcome".to_string(),
            )),
        }
    }
}
