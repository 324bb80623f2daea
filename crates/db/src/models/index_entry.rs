//! Vector index entry models.

use sqlx::FromRow;

/// DTO for upserting an entry into `template_index`.
///
/// `document` is the query-text projection the embedding was computed
/// from, stored alongside the vector for inspection and index rebuilds.
#[derive(Debug, Clone)]
pub struct CreateIndexEntry {
    pub key: String,
    pub template_id: String,
    pub component: String,
    pub purpose: String,
    pub style: String,
    pub fields: String,
    pub html: String,
    pub document: String,
    /// Raw embedding, bound as a pgvector value in SQL.
    pub embedding: Vec<f32>,
}

/// A nearest-neighbour query result: similarity score plus the metadata
/// copy stored with the entry. The embedding itself is not read back.
#[derive(Debug, Clone, FromRow)]
pub struct IndexMatchRow {
    /// Cosine similarity in `[-1.0, 1.0]` (`1 - cosine distance`).
    pub score: f64,
    pub key: String,
    pub template_id: String,
    pub component: String,
    pub purpose: String,
    pub style: String,
    pub fields: String,
    pub html: String,
}
