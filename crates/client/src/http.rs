//! HTTP transport for the query service.
//!
//! Sends the question as JSON to a single POST endpoint. No authentication,
//! no retries and no client-side timeout: those belong to the service or the
//! network layer.

use crate::client::{QueryRequest, QueryResponse, QueryService};
use ragview_core::{AppError, AppResult};
use serde::Deserialize;

/// Error body shape of the service (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Query service client over HTTP.
pub struct HttpQueryClient {
    /// Full URL of the POST endpoint
    endpoint: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpQueryClient {
    /// Create a client for the default endpoint.
    ///
    /// Default URL: http://localhost:8003/query
    pub fn new() -> Self {
        Self::with_endpoint(ragview_core::config::DEFAULT_ENDPOINT)
    }

    /// Create a client for a custom endpoint URL.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the service's `detail` message out of an error body, if it has one.
fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.detail)
}

#[async_trait::async_trait]
impl QueryService for HttpQueryClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse> {
        tracing::info!("Sending query to {}", self.endpoint);
        tracing::debug!(
            question_len = request.question.len(),
            top_k = request.top_k,
            "Query request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                AppError::RequestFailed(format!("Failed to send request to query service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let detail = error_detail(&body).unwrap_or(body);
            tracing::warn!("Query service returned {}: {}", status, detail);
            return Err(AppError::RequestFailed(format!(
                "Query service error ({}): {}",
                status, detail
            )));
        }

        let query_response: QueryResponse = response.json().await.map_err(|e| {
            AppError::RequestFailed(format!("Failed to parse query response: {}", e))
        })?;

        tracing::info!(
            "Received answer with {} source chunks",
            query_response.source_chunks.len()
        );

        Ok(query_response)
    }
}
