//! Query service abstraction and wire types.
//!
//! The remote service answers a question with a synthesized answer and the
//! ranked excerpts it was grounded on. This module defines the request and
//! response shapes and the trait every transport implements.

use ragview_core::AppResult;
use serde::{Deserialize, Deserializer, Serialize};

/// Number of excerpts requested from the service. Not user-configurable.
pub const TOP_K: u32 = 10;

/// Body of the `POST /query` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question text, as typed by the user
    pub question: String,

    /// Maximum number of excerpts to return
    pub top_k: u32,
}

impl QueryRequest {
    /// Create a request for `question` with the fixed `TOP_K`.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            top_k: TOP_K,
        }
    }
}

/// A contiguous span of a source document returned as supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceChunk {
    /// Excerpt text
    pub chunk: String,

    /// Source file name (e.g., "policy.md")
    pub filename: String,

    /// Source file path as known to the service
    pub filepath: String,

    /// Ordinal position of the excerpt within its source document.
    /// Some backends store it as a text field, so `"3"` is accepted too.
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub chunk_index: u32,

    /// Relevance score; meaning and range are defined by the service
    pub score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u32),
    Text(String),
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(text) => text.trim().parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid chunk_index {:?}: {}", text, e))
        }),
    }
}

/// Successful response of the `POST /query` call.
///
/// `source_chunks` keeps the order the service sent, most relevant first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Natural language answer
    pub answer: String,

    /// Ranked supporting excerpts
    pub source_chunks: Vec<SourceChunk>,
}

/// Trait for query service transports.
///
/// Every failure of the round trip (connection, non-success status,
/// unparseable body) is reported as `AppError::RequestFailed`.
#[async_trait::async_trait]
pub trait QueryService: Send + Sync {
    /// Human-readable location of the service, for logs and the UI header.
    fn endpoint(&self) -> &str;

    /// Send one question and wait for its answer.
    async fn query(&self, request: &QueryRequest) -> AppResult<QueryResponse>;
}
