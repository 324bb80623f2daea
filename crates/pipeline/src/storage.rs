//! Postgres-backed implementations of the store and index traits.
//!
//! Thin adapters over the `uiforge-db` repositories: they translate the
//! primitive-document form into the repos' insert DTOs and map database
//! errors into the pipeline taxonomy. The pool handle is process-wide
//! and long-lived; pooling itself is sqlx's concern.

use async_trait::async_trait;

use uiforge_core::document::TemplateDocument;
use uiforge_db::models::index_entry::CreateIndexEntry;
use uiforge_db::models::template::{CreateTemplate, CreateUserTemplate};
use uiforge_db::repositories::{TemplateIndexRepo, TemplateRepo, UserTemplateRepo};
use uiforge_db::DbPool;

use crate::error::{IndexError, StoreError};
use crate::traits::{IndexEntry, IndexMatch, TemplateIndex, TemplateStore};

/// Template store backed by the `templates` / `user_templates` tables.
pub struct PgTemplateStore {
    pool: DbPool,
}

impl PgTemplateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn insert_generated(&self, document: &TemplateDocument) -> Result<(), StoreError> {
        let create = CreateTemplate {
            template_id: document.template_id.clone(),
            component: document.component.clone(),
            fields: document.fields.clone(),
            purpose: document.purpose.clone(),
            style: document.style.clone(),
            html: document.html.clone(),
            source: document.source.clone(),
        };
        TemplateRepo::insert(&self.pool, &create)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }

    async fn insert_user_modified(&self, document: &TemplateDocument) -> Result<(), StoreError> {
        let parent_template_id = document
            .parent_template_id
            .clone()
            .ok_or_else(|| StoreError("user-modified record missing parent_template_id".into()))?;
        let saved_by = document
            .user
            .clone()
            .ok_or_else(|| StoreError("user-modified record missing user".into()))?;

        let create = CreateUserTemplate {
            template_id: document.template_id.clone(),
            parent_template_id,
            saved_by,
            html: document.html.clone(),
            source: document.source.clone(),
        };
        UserTemplateRepo::insert(&self.pool, &create)
            .await
            .map_err(|e| StoreError(e.to_string()))
    }
}

/// Similarity index backed by the pgvector `template_index` table.
pub struct PgTemplateIndex {
    pool: DbPool,
}

impl PgTemplateIndex {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateIndex for PgTemplateIndex {
    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, IndexError> {
        let rows = TemplateIndexRepo::nearest(&self.pool, embedding, top_k)
            .await
            .map_err(|e| IndexError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| IndexMatch {
                score: row.score,
                template_id: row.template_id,
                component: row.component,
                html: row.html,
            })
            .collect())
    }

    async fn insert(&self, entry: &IndexEntry) -> Result<(), IndexError> {
        let create = CreateIndexEntry {
            key: entry.key.clone(),
            template_id: entry.metadata.template_id.clone(),
            component: entry.metadata.component.clone(),
            purpose: entry.metadata.purpose.clone(),
            style: entry.metadata.style.clone(),
            fields: entry.metadata.fields.clone(),
            html: entry.metadata.html.clone(),
            document: entry.document.clone(),
            embedding: entry.embedding.clone(),
        };
        TemplateIndexRepo::upsert(&self.pool, &create)
            .await
            .map_err(|e| IndexError(e.to_string()))
    }
}
