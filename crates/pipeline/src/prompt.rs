//! Fixed prompts for the two generation calls.
//!
//! Both prompts are part of the service contract: the intent prompt pins
//! the exact JSON shape [`uiforge_core::intent::Intent::parse`] expects,
//! and the markup prompt asks for bare HTML. Wording changes here ripple
//! into parse behaviour, so keep them boring.

use uiforge_core::intent::Intent;

/// Instruction prompt for structured intent extraction, embedding the
/// user command verbatim with a worked example of the expected output.
pub fn intent_prompt(command: &str) -> String {
    format!(
        "Extract the structured intent from: \"{command}\"\n\
         \n\
         Respond with a valid JSON object ONLY with the following keys:\n\
         - component: string\n\
         - fields: array of strings\n\
         - purpose: string\n\
         - style: string\n\
         \n\
         Only return valid JSON. Do NOT include markdown or explanation.\n\
         Example:\n\
         {{\n\
         \x20 \"component\": \"form\",\n\
         \x20 \"fields\": [\"name\", \"email\", \"message\"],\n\
         \x20 \"purpose\": \"contact form\",\n\
         \x20 \"style\": \"modern\"\n\
         }}"
    )
}

/// Markup-generation prompt built from an extracted intent.
pub fn generation_prompt(intent: &Intent) -> String {
    format!(
        "Generate a responsive {} for {} purpose, using {} CSS. Fields: {}. \
         Return only raw HTML. Do NOT include markdown or explanation.",
        intent.component,
        intent.purpose,
        intent.style,
        intent.fields.join(", ")
    )
}
