//! Repository for the `template_index` vector collection.
//!
//! The embedding column is pgvector's `vector(768)`; vectors are bound
//! via [`pgvector::Vector`] and compared with the cosine distance
//! operator (`<=>`).

use pgvector::Vector;
use sqlx::PgPool;

use crate::models::index_entry::{CreateIndexEntry, IndexMatchRow};

/// Query and upsert operations for the derived similarity index.
pub struct TemplateIndexRepo;

impl TemplateIndexRepo {
    /// Upsert an index entry on its deterministic key.
    ///
    /// `ON CONFLICT (key) DO UPDATE` gives last-write-wins semantics, so
    /// repeated inserts of structurally identical intents are idempotent
    /// at this layer.
    pub async fn upsert(pool: &PgPool, entry: &CreateIndexEntry) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO template_index \
                (key, template_id, component, purpose, style, fields, html, document, embedding) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (key) DO UPDATE SET \
                template_id = EXCLUDED.template_id, \
                component = EXCLUDED.component, \
                purpose = EXCLUDED.purpose, \
                style = EXCLUDED.style, \
                fields = EXCLUDED.fields, \
                html = EXCLUDED.html, \
                document = EXCLUDED.document, \
                embedding = EXCLUDED.embedding, \
                updated_at = now()",
        )
        .bind(&entry.key)
        .bind(&entry.template_id)
        .bind(&entry.component)
        .bind(&entry.purpose)
        .bind(&entry.style)
        .bind(&entry.fields)
        .bind(&entry.html)
        .bind(&entry.document)
        .bind(Vector::from(entry.embedding.clone()))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Return the `top_k` nearest entries to the query embedding, best
    /// first. Empty result on an empty index.
    pub async fn nearest(
        pool: &PgPool,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatchRow>, sqlx::Error> {
        let query_vector = Vector::from(embedding.to_vec());

        sqlx::query_as::<_, IndexMatchRow>(
            "SELECT \
                1 - (embedding <=> $1) AS score, \
                key, template_id, component, purpose, style, fields, html \
             FROM template_index \
             ORDER BY embedding <=> $1 \
             LIMIT $2",
        )
        .bind(&query_vector)
        .bind(top_k as i64)
        .fetch_all(pool)
        .await
    }
}
