//! Intent extraction step.

use uiforge_core::intent::Intent;

use crate::error::ResolveError;
use crate::prompt::intent_prompt;
use crate::traits::TextGenerator;

/// Extract a structured intent from a raw command.
///
/// One generation call; the output is parsed at the strict boundary in
/// `uiforge-core`. Failure here is terminal for the request -- nothing
/// downstream (embedding, index, store) is touched.
pub async fn extract_intent(
    generator: &dyn TextGenerator,
    command: &str,
) -> Result<Intent, ResolveError> {
    let prompt = intent_prompt(command);
    let raw = generator.generate(&prompt).await?;
    tracing::debug!(raw = %raw, "Raw intent output");

    let intent = Intent::parse(&raw)?;
    tracing::debug!(
        component = %intent.component,
        purpose = %intent.purpose,
        field_count = intent.fields.len(),
        "Intent extracted"
    );
    Ok(intent)
}
