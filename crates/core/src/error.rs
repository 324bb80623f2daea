#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Model output could not be parsed as a structured intent
    /// (not JSON after fence stripping, or missing/misshapen keys).
    #[error("Intent parse failed: {0}")]
    IntentParse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A value could not be reduced to a plain primitive before
    /// persistence.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}
