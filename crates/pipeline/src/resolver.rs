//! The resolution orchestrator: the cache-miss/fallback state machine.
//!
//! Within one request the steps run strictly sequentially: extract →
//! embed → query → hit gate → (hit: return) | (miss: generate → sanitize
//! → store → index → return). Across requests there is no mutual
//! exclusion: two concurrent identical misses may both generate, leaving
//! two store rows and one index entry (last write wins on the derived
//! key). That race is accepted; a per-key advisory lock would be the
//! upgrade path if exactly-once generation were ever required.

use std::sync::Arc;

use uuid::Uuid;

use uiforge_core::document::TemplateDocument;
use uiforge_core::embedding::validate_embedding_dimension;
use uiforge_core::markup::strip_code_fence;
use uiforge_core::matching::{is_template_hit, DEFAULT_TOP_K};
use uiforge_core::template::TemplateRecord;

use crate::error::{ResolveError, UpstreamError};
use crate::intent::extract_intent;
use crate::prompt::generation_prompt;
use crate::traits::{EmbeddingProvider, IndexEntry, TemplateIndex, TemplateStore, TextGenerator};

/// Outcome of a resolution: the markup and the identifier of the record
/// that backs it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub html: String,
    pub template_id: String,
    /// Whether the template came from the index (no generation call).
    pub cache_hit: bool,
}

/// Resolves commands against the template cache, generating on miss.
///
/// Collaborators are injected once at construction and shared for the
/// process lifetime.
pub struct Resolver {
    generator: Arc<dyn TextGenerator>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn TemplateIndex>,
    store: Arc<dyn TemplateStore>,
}

impl Resolver {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn TemplateIndex>,
        store: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            generator,
            embedder,
            index,
            store,
        }
    }

    /// Resolve a raw command to a template, generating and persisting a
    /// new one if no cached template passes the hit gate.
    pub async fn resolve(&self, command: &str) -> Result<Resolution, ResolveError> {
        // 1. Intent extraction. Terminal on failure.
        let intent = extract_intent(self.generator.as_ref(), command).await?;

        // 2. Query vector from the intent's textual projection. A
        //    mis-sized vector is an upstream contract violation.
        let query_text = intent.query_text();
        let embedding = self.embedder.embed(&query_text).await?;
        validate_embedding_dimension(&embedding)
            .map_err(|e| UpstreamError(e.to_string()))?;

        // 3–4. Nearest neighbour, then the hit gate.
        let matches = self.index.query(&embedding, DEFAULT_TOP_K).await?;
        if let Some(best) = matches.first() {
            if is_template_hit(&intent, &best.component) {
                tracing::info!(
                    template_id = %best.template_id,
                    component = %best.component,
                    score = best.score,
                    "Cache hit, returning stored template"
                );
                return Ok(Resolution {
                    html: best.html.clone(),
                    template_id: best.template_id.clone(),
                    cache_hit: true,
                });
            }
            tracing::debug!(
                candidate_component = %best.component,
                intent_component = %intent.component,
                score = best.score,
                "Nearest neighbour rejected by hit gate"
            );
        }

        // 5. Miss: generate and sanitize.
        let raw = self.generator.generate(&generation_prompt(&intent)).await?;
        tracing::debug!(raw_len = raw.len(), "Raw markup generated");
        let html = strip_code_fence(&raw);

        // 6–7. Fresh identity, then persist. The store write is
        //       authoritative and must precede the index write; a failed
        //       index write leaves only a rebuildable gap, never a
        //       dangling entry.
        let template_id = Uuid::new_v4();
        let record = TemplateRecord::generated(template_id, &intent, html.clone());
        let document = TemplateDocument::from_record(&record)?;

        self.store.insert_generated(&document).await?;

        let entry = IndexEntry {
            key: intent.derived_key(),
            document: query_text,
            embedding,
            metadata: document,
        };
        if let Err(e) = self.index.insert(&entry).await {
            tracing::warn!(
                error = %e,
                key = %entry.key,
                template_id = %template_id,
                "Index insert failed after store write; index is derived and rebuildable"
            );
        } else {
            tracing::info!(
                template_id = %template_id,
                key = %entry.key,
                "Generated template persisted"
            );
        }

        // 8. Respond with the sanitized markup.
        Ok(Resolution {
            html,
            template_id: template_id.to_string(),
            cache_hit: false,
        })
    }
}
