//! Capability traits for the four external collaborators.
//!
//! The pipeline depends on these seams, never on concrete clients.
//! Concrete adapters live in [`crate::clients`] (generation/embedding)
//! and [`crate::storage`] (store/index); tests substitute in-process
//! fakes. Clients behind these traits are constructed once at process
//! start and shared for the process lifetime.

use async_trait::async_trait;
use uiforge_core::document::TemplateDocument;

use crate::error::{IndexError, StoreError, UpstreamError};

/// Text-generation service: prompt in, free-form text out.
/// Non-deterministic, latency-bearing, may return malformed output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One generation call. No retry at this layer; bounded retry with
    /// backoff could be added behind this seam without reshaping the
    /// pipeline.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Embedding function: text to a fixed-dimension vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, UpstreamError>;
}

/// A retrieved neighbour: similarity score plus the metadata copy needed
/// for the hit gate and the response.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    pub score: f64,
    pub template_id: String,
    pub component: String,
    pub html: String,
}

/// Projection of a freshly persisted template into the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Deterministic key (`component_purpose_fieldCount`).
    pub key: String,
    /// The query-text projection the embedding was computed from.
    pub document: String,
    pub embedding: Vec<f32>,
    /// Metadata copy of the stored record.
    pub metadata: TemplateDocument,
}

/// Vector similarity index over generated templates. Derived and
/// rebuildable; never authoritative.
#[async_trait]
pub trait TemplateIndex: Send + Sync {
    /// Nearest neighbours, best first. Empty on an empty index; never
    /// fails on a well-formed vector.
    async fn query(&self, embedding: &[f32], top_k: usize)
        -> Result<Vec<IndexMatch>, IndexError>;

    /// Upsert on the entry's key, last write wins.
    async fn insert(&self, entry: &IndexEntry) -> Result<(), IndexError>;
}

/// Durable document store holding the canonical template records.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn insert_generated(&self, document: &TemplateDocument) -> Result<(), StoreError>;
    async fn insert_user_modified(&self, document: &TemplateDocument) -> Result<(), StoreError>;
}
