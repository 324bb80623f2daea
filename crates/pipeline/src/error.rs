//! Pipeline error taxonomy.
//!
//! One error enum covers the whole request: any failure at any step
//! aborts the resolution and surfaces as a single failure to the caller.
//! No step retries internally.

use uiforge_core::error::CoreError;

/// The text-generation or embedding service failed (transport error,
/// non-2xx response, or a response with no usable content).
#[derive(Debug, thiserror::Error)]
#[error("Upstream generation failed: {0}")]
pub struct UpstreamError(pub String);

/// The similarity index is unreachable or rejected an operation.
#[derive(Debug, thiserror::Error)]
#[error("Template index failed: {0}")]
pub struct IndexError(pub String);

/// The document store is unreachable or rejected a write.
#[derive(Debug, thiserror::Error)]
#[error("Template store failed: {0}")]
pub struct StoreError(pub String);

/// A resolution or save request failed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Generation-service output could not be parsed as an intent.
    #[error("Intent parse error: {0}")]
    IntentParse(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record value could not be reduced to primitive form.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<CoreError> for ResolveError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IntentParse(msg) => Self::IntentParse(msg),
            CoreError::Validation(msg) | CoreError::Serialization(msg) => Self::Serialization(msg),
        }
    }
}
