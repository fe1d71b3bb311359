//! Query service factory.
//!
//! Resolves a configured endpoint into a ready-to-use client.

use crate::client::QueryService;
use crate::http::HttpQueryClient;
use ragview_core::{AppError, AppResult};
use std::sync::Arc;

/// Create a query service client for `endpoint`.
///
/// # Errors
/// Returns `AppError::Config` if the endpoint is not an http(s) URL.
pub fn create_client(endpoint: &str) -> AppResult<Arc<dyn QueryService>> {
    let url = url::Url::parse(endpoint)
        .map_err(|e| AppError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

    match url.scheme() {
        "http" | "https" => {
            tracing::debug!("Creating HTTP query client for {}", url);
            Ok(Arc::new(HttpQueryClient::with_endpoint(endpoint)))
        }
        other => Err(AppError::Config(format!(
            "Unsupported endpoint scheme: {}",
            other
        ))),
    }
}
