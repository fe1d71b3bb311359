//! Query service client crate for ragview.
//!
//! This crate talks to the remote retrieval-augmented-generation service:
//! one POST endpoint that takes a question and returns an answer plus the
//! ranked source excerpts behind it.
//!
//! # Example
//! ```no_run
//! use ragview_client::{HttpQueryClient, QueryRequest, QueryService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpQueryClient::new();
//! let response = client.query(&QueryRequest::new("What is the refund policy?")).await?;
//! println!("{}", response.answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod http;
pub mod mock;

// Re-export main types
pub use client::{QueryRequest, QueryResponse, QueryService, SourceChunk, TOP_K};
pub use factory::create_client;
pub use http::HttpQueryClient;
pub use mock::{MockOutcome, MockQueryService};
