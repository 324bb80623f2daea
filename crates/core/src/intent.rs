//! Structured intent extracted from a free-text command.
//!
//! The intent is parsed from generation-service output, which is untrusted:
//! the model may wrap JSON in a code fence, omit keys, or hand back prose.
//! [`Intent::parse`] is the strict validation boundary -- either the output
//! yields a complete, well-shaped intent or parsing fails outright. There
//! is no partial intent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::markup::strip_code_fence;

/// A structured UI request: what to build, with which data fields, for
/// what purpose, in which visual style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// UI element family (e.g. "form", "card"). Never empty.
    pub component: String,
    /// Data fields the component should expose. May be empty.
    pub fields: Vec<String>,
    /// Free-text usage description.
    pub purpose: String,
    /// Free-text visual style descriptor.
    pub style: String,
}

impl Intent {
    /// Parse generation-service output into an [`Intent`].
    ///
    /// Strips one level of code-fence wrapping, parses the remainder as a
    /// JSON object, and requires all four keys with their declared shapes.
    /// Scalar `fields` entries (numbers, booleans) are coerced to strings;
    /// any other shape is a parse failure.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let cleaned = strip_code_fence(raw);

        let value: Value = serde_json::from_str(&cleaned)
            .map_err(|e| CoreError::IntentParse(format!("invalid JSON: {e}")))?;

        let map = value
            .as_object()
            .ok_or_else(|| CoreError::IntentParse("output is not a JSON object".into()))?;

        let component = require_string(map, "component")?;
        if component.is_empty() {
            return Err(CoreError::IntentParse("component is empty".into()));
        }
        let purpose = require_string(map, "purpose")?;
        let style = require_string(map, "style")?;

        let fields = match map.get("fields") {
            Some(Value::Array(items)) => items
                .iter()
                .map(coerce_field)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(CoreError::IntentParse(format!(
                    "fields must be an array, got {}",
                    json_type_name(other)
                )))
            }
            None => return Err(CoreError::IntentParse("missing key: fields".into())),
        };

        Ok(Self {
            component,
            fields,
            purpose,
            style,
        })
    }

    /// Textual projection used for embedding queries:
    /// `"{component} {purpose} {fields joined with commas}"`.
    ///
    /// The order is fixed so the projection is reproducible across calls.
    pub fn query_text(&self) -> String {
        format!("{} {} {}", self.component, self.purpose, self.fields.join(","))
    }

    /// Deterministic index key: `component_purpose_fieldCount`.
    ///
    /// Structurally identical intents map to the same key, making repeated
    /// index inserts idempotent (last write wins). This approximates, not
    /// detects, exact duplicates.
    pub fn derived_key(&self) -> String {
        format!("{}_{}_{}", self.component, self.purpose, self.fields.len())
    }
}

fn require_string(map: &serde_json::Map<String, Value>, key: &str) -> Result<String, CoreError> {
    match map.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(CoreError::IntentParse(format!(
            "{key} must be a string, got {}",
            json_type_name(other)
        ))),
        None => Err(CoreError::IntentParse(format!("missing key: {key}"))),
    }
}

/// Coerce a `fields` entry to a string. Numbers and booleans are accepted
/// (models occasionally emit them for field names); anything structured is
/// rejected.
fn coerce_field(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CoreError::IntentParse(format!(
            "fields entries must be scalars, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
