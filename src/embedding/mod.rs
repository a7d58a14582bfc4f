//! Embedding providers.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] seam and index re-ordering.
//! - [`openai`] talks to an OpenAI-compatible `/embeddings` endpoint.

mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod openai;
pub mod provider;


pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MOCK_EMBEDDING_DIM, MockEmbeddingProvider};
pub use openai::{OpenAiConfig, OpenAiEmbedder};
pub use provider::{EmbeddingProvider, IndexedEmbedding, order_by_index};
