//! Behavioural properties of the resolution pipeline.
//!
//! These tests run the real orchestrator against in-process fakes: a
//! scripted generator with call counting, a constant embedder, and
//! in-memory index/store implementations. No network, no database.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;

use uiforge_core::document::TemplateDocument;
use uiforge_core::embedding::EMBEDDING_DIMENSION;
use uiforge_pipeline::error::{IndexError, ResolveError, StoreError, UpstreamError};
use uiforge_pipeline::traits::{
    EmbeddingProvider, IndexEntry, IndexMatch, TemplateIndex, TemplateStore, TextGenerator,
};
use uiforge_pipeline::{Resolver, UserEditRecorder};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Generator that replays scripted responses in order and counts calls.
#[derive(Default)]
struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn with_responses(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn with_results(results: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(results.into_iter().collect()),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(msg)) => Err(UpstreamError(msg)),
            None => Err(UpstreamError("no scripted response left".into())),
        }
    }
}

/// Embedder returning the same well-formed vector for every text.
///
/// With a constant vector every stored entry is a perfect-similarity
/// neighbour, which is exactly what the hit-gate tests need.
#[derive(Default)]
struct ConstantEmbedder {
    calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingProvider for ConstantEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.1; EMBEDDING_DIMENSION])
    }
}

/// Embedder that violates the dimension contract.
struct MisdimensionedEmbedder;

#[async_trait]
impl EmbeddingProvider for MisdimensionedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, UpstreamError> {
        Ok(vec![0.1; 3])
    }
}

/// In-memory index with keyed upsert (last write wins) and cosine
/// nearest-neighbour queries.
#[derive(Default)]
struct InMemoryIndex {
    entries: Mutex<Vec<IndexEntry>>,
    query_calls: AtomicUsize,
    insert_calls: AtomicUsize,
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let na: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na * nb)
}

#[async_trait]
impl TemplateIndex for InMemoryIndex {
    async fn query(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<IndexMatch>, IndexError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let entries = self.entries.lock().unwrap();
        let mut matches: Vec<IndexMatch> = entries
            .iter()
            .map(|e| IndexMatch {
                score: cosine(embedding, &e.embedding),
                template_id: e.metadata.template_id.clone(),
                component: e.metadata.component.clone(),
                html: e.metadata.html.clone(),
            })
            .collect();
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        matches.truncate(top_k);
        Ok(matches)
    }

    async fn insert(&self, entry: &IndexEntry) -> Result<(), IndexError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.key != entry.key);
        entries.push(entry.clone());
        Ok(())
    }
}

/// Index whose writes always fail; reads see an empty index.
struct FailingIndex;

#[async_trait]
impl TemplateIndex for FailingIndex {
    async fn query(
        &self,
        _embedding: &[f32],
        _top_k: usize,
    ) -> Result<Vec<IndexMatch>, IndexError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _entry: &IndexEntry) -> Result<(), IndexError> {
        Err(IndexError("index unavailable".into()))
    }
}

/// In-memory store with one vec per logical collection.
#[derive(Default)]
struct InMemoryStore {
    generated: Mutex<Vec<TemplateDocument>>,
    user_modified: Mutex<Vec<TemplateDocument>>,
}

#[async_trait]
impl TemplateStore for InMemoryStore {
    async fn insert_generated(&self, document: &TemplateDocument) -> Result<(), StoreError> {
        self.generated.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn insert_user_modified(&self, document: &TemplateDocument) -> Result<(), StoreError> {
        self.user_modified.lock().unwrap().push(document.clone());
        Ok(())
    }
}

/// Store whose writes always fail.
struct FailingStore;

#[async_trait]
impl TemplateStore for FailingStore {
    async fn insert_generated(&self, _document: &TemplateDocument) -> Result<(), StoreError> {
        Err(StoreError("store unavailable".into()))
    }

    async fn insert_user_modified(&self, _document: &TemplateDocument) -> Result<(), StoreError> {
        Err(StoreError("store unavailable".into()))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A well-formed intent response for the given component, with the same
/// purpose and three fields throughout so structurally identical intents
/// share a derived key.
fn intent_json(component: &str) -> String {
    format!(
        r#"{{"component":"{component}","fields":["name","email","message"],"purpose":"contact form","style":"modern"}}"#
    )
}

fn build_resolver(
    generator: Arc<ScriptedGenerator>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn TemplateIndex>,
    store: Arc<dyn TemplateStore>,
) -> Resolver {
    Resolver::new(generator, embedder, index, store)
}

/// Seed the index with an entry as if a template had been cached earlier.
async fn seed_index(index: &InMemoryIndex, component: &str, template_id: &str, html: &str) {
    let metadata = TemplateDocument {
        template_id: template_id.to_string(),
        component: component.to_string(),
        fields: "name, email, message".to_string(),
        purpose: "contact form".to_string(),
        style: "modern".to_string(),
        html: html.to_string(),
        source: "generated".to_string(),
        parent_template_id: None,
        user: None,
    };
    index
        .insert(&IndexEntry {
            key: format!("{component}_contact form_3"),
            document: format!("{component} contact form name,email,message"),
            embedding: vec![0.1; EMBEDDING_DIMENSION],
            metadata,
        })
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Miss path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn miss_generates_persists_and_returns() {
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str(), "<form>fresh</form>"]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator.clone(),
        Arc::new(ConstantEmbedder::default()),
        index.clone(),
        store.clone(),
    );

    let resolution = resolver.resolve("build a contact form").await.unwrap();

    assert_eq!(resolution.html, "<form>fresh</form>");
    assert!(!resolution.cache_hit);
    assert_eq!(generator.call_count(), 2);

    let generated = store.generated.lock().unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].html, "<form>fresh</form>");
    assert_eq!(generated[0].source, "generated");
    assert_eq!(generated[0].template_id, resolution.template_id);

    let entries = index.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "form_contact form_3");
    assert_eq!(entries[0].metadata.template_id, resolution.template_id);
}

#[tokio::test]
async fn generated_markup_is_sanitized_before_storage_and_response() {
    let intent = intent_json("card");
    let generator =
        ScriptedGenerator::with_responses(&[intent.as_str(), "```html\n<div>X</div>\n```"]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator,
        Arc::new(ConstantEmbedder::default()),
        index.clone(),
        store.clone(),
    );

    let resolution = resolver.resolve("a profile card").await.unwrap();

    assert_eq!(resolution.html, "<div>X</div>");
    assert_eq!(store.generated.lock().unwrap()[0].html, "<div>X</div>");
    assert_eq!(index.entries.lock().unwrap()[0].metadata.html, "<div>X</div>");
}

// ---------------------------------------------------------------------------
// Hit path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_identical_request_hits_without_generation() {
    // Three scripted responses: intent + markup for the first request,
    // intent only for the second. A generation attempt on the second
    // request would exhaust the script and fail the test.
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[
        intent.as_str(),
        "<form>once</form>",
        intent.as_str(),
    ]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator.clone(),
        Arc::new(ConstantEmbedder::default()),
        index.clone(),
        store.clone(),
    );

    let first = resolver.resolve("build a contact form").await.unwrap();
    let second = resolver.resolve("build a contact form").await.unwrap();

    assert!(second.cache_hit);
    assert_eq!(second.template_id, first.template_id);
    assert_eq!(second.html, first.html);
    assert_eq!(generator.call_count(), 3);
    assert_eq!(store.generated.lock().unwrap().len(), 1);
    assert_eq!(index.insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hit_returns_stored_template_verbatim() {
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str()]);
    let index = Arc::new(InMemoryIndex::default());
    seed_index(&index, "form", "11111111-2222-3333-4444-555555555555", "<form>cached</form>")
        .await;
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator.clone(),
        Arc::new(ConstantEmbedder::default()),
        index,
        store.clone(),
    );

    let resolution = resolver.resolve("build a contact form").await.unwrap();

    assert!(resolution.cache_hit);
    assert_eq!(resolution.template_id, "11111111-2222-3333-4444-555555555555");
    assert_eq!(resolution.html, "<form>cached</form>");
    assert_eq!(generator.call_count(), 1);
    assert!(store.generated.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Hit-gate precision
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nearest_neighbour_with_different_component_is_a_miss() {
    // The constant embedder makes the seeded "card" entry a
    // perfect-similarity neighbour; the gate must still reject it.
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str(), "<form>fresh</form>"]);
    let index = Arc::new(InMemoryIndex::default());
    seed_index(&index, "card", "cached-card-id", "<div>card</div>").await;
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator.clone(),
        Arc::new(ConstantEmbedder::default()),
        index,
        store.clone(),
    );

    let resolution = resolver.resolve("build a contact form").await.unwrap();

    assert!(!resolution.cache_hit);
    assert_eq!(resolution.html, "<form>fresh</form>");
    assert_eq!(generator.call_count(), 2);
    assert_eq!(store.generated.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn no_cross_component_bleed() {
    let form_intent = intent_json("form");
    let card_intent = intent_json("card");
    let generator = ScriptedGenerator::with_responses(&[
        form_intent.as_str(),
        "<form>A</form>",
        card_intent.as_str(),
        "<div>B</div>",
    ]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator,
        Arc::new(ConstantEmbedder::default()),
        index,
        store,
    );

    let first = resolver.resolve("build a contact form").await.unwrap();
    let second = resolver.resolve("a profile card").await.unwrap();

    assert_eq!(first.html, "<form>A</form>");
    assert_eq!(second.html, "<div>B</div>");
    assert_ne!(second.template_id, first.template_id);
}

// ---------------------------------------------------------------------------
// Failure propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_intent_fails_without_side_effects() {
    let generator =
        ScriptedGenerator::with_responses(&["Sure! Here is the intent you asked for."]);
    let embedder = Arc::new(ConstantEmbedder::default());
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(generator, embedder.clone(), index.clone(), store.clone());

    let err = resolver.resolve("build a contact form").await.unwrap_err();

    assert_matches!(err, ResolveError::IntentParse(_));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(index.query_calls.load(Ordering::SeqCst), 0);
    assert_eq!(index.insert_calls.load(Ordering::SeqCst), 0);
    assert!(store.generated.lock().unwrap().is_empty());
    assert!(store.user_modified.lock().unwrap().is_empty());
}

#[tokio::test]
async fn generation_failure_surfaces_as_upstream_error() {
    let generator = ScriptedGenerator::with_results(vec![
        Ok(intent_json("form")),
        Err("service timed out".into()),
    ]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator,
        Arc::new(ConstantEmbedder::default()),
        index,
        store.clone(),
    );

    let err = resolver.resolve("build a contact form").await.unwrap_err();

    assert_matches!(err, ResolveError::Upstream(_));
    assert!(store.generated.lock().unwrap().is_empty());
}

#[tokio::test]
async fn misdimensioned_embedding_is_an_upstream_error() {
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str()]);
    let index = Arc::new(InMemoryIndex::default());
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator,
        Arc::new(MisdimensionedEmbedder),
        index.clone(),
        store,
    );

    let err = resolver.resolve("build a contact form").await.unwrap_err();

    assert_matches!(err, ResolveError::Upstream(_));
    assert_eq!(index.query_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_is_fatal_and_skips_the_index() {
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str(), "<form>X</form>"]);
    let index = Arc::new(InMemoryIndex::default());
    let resolver = build_resolver(
        generator,
        Arc::new(ConstantEmbedder::default()),
        index.clone(),
        Arc::new(FailingStore),
    );

    let err = resolver.resolve("build a contact form").await.unwrap_err();

    assert_matches!(err, ResolveError::Store(_));
    assert_eq!(index.insert_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn index_write_failure_after_store_write_is_nonfatal() {
    let intent = intent_json("form");
    let generator = ScriptedGenerator::with_responses(&[intent.as_str(), "<form>X</form>"]);
    let store = Arc::new(InMemoryStore::default());
    let resolver = build_resolver(
        generator,
        Arc::new(ConstantEmbedder::default()),
        Arc::new(FailingIndex),
        store.clone(),
    );

    let resolution = resolver.resolve("build a contact form").await.unwrap();

    assert_eq!(resolution.html, "<form>X</form>");
    assert_eq!(store.generated.lock().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// User-edit recorder
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_edit_is_stored_with_parent_link_and_fresh_id() {
    let store = Arc::new(InMemoryStore::default());
    let recorder = UserEditRecorder::new(store.clone() as Arc<dyn TemplateStore>);

    let template_id = recorder.save("<p>hi</p>", "abc", "bob").await.unwrap();

    let user_docs = store.user_modified.lock().unwrap();
    assert_eq!(user_docs.len(), 1);
    assert_eq!(user_docs[0].source, "user_modified");
    assert_eq!(user_docs[0].parent_template_id.as_deref(), Some("abc"));
    assert_eq!(user_docs[0].user.as_deref(), Some("bob"));
    assert_eq!(user_docs[0].html, "<p>hi</p>");
    assert_ne!(template_id.to_string(), "abc");
    assert_eq!(user_docs[0].template_id, template_id.to_string());
    // The recorder writes only to the user collection.
    assert!(store.generated.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_saves_create_distinct_records() {
    let store = Arc::new(InMemoryStore::default());
    let recorder = UserEditRecorder::new(store.clone() as Arc<dyn TemplateStore>);

    let first = recorder.save("<p>v1</p>", "abc", "bob").await.unwrap();
    let second = recorder.save("<p>v2</p>", "abc", "bob").await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.user_modified.lock().unwrap().len(), 2);
}
