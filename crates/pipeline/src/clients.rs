//! Capability-trait adapters for the Gemini client.
//!
//! The same service instance provides both text generation and query
//! embeddings; the two traits keep those roles separable (and separately
//! fakeable) inside the pipeline.

use async_trait::async_trait;
use uiforge_gemini::GeminiClient;

use crate::error::UpstreamError;
use crate::traits::{EmbeddingProvider, TextGenerator};

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        GeminiClient::generate(self, prompt)
            .await
            .map_err(|e| UpstreamError(e.to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, UpstreamError> {
        GeminiClient::embed(self, text)
            .await
            .map_err(|e| UpstreamError(e.to_string()))
    }
}
