//! Primitive-document boundary between records and storage.
//!
//! Every value handed to the store or the index must be a plain string --
//! store-layer identifier types must never leak across this boundary.
//! [`TemplateDocument`] is that flattened form, and [`primitive_string`]
//! is the single conversion point: scalars are stringified, structured
//! values are serialized to their JSON text, and only null is refused.

use serde_json::Value;

use crate::error::CoreError;
use crate::template::TemplateRecord;

/// A template record flattened to plain string values, ready for
/// persistence in either the store or the index metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    pub template_id: String,
    pub component: String,
    pub fields: String,
    pub purpose: String,
    pub style: String,
    pub html: String,
    pub source: String,
    pub parent_template_id: Option<String>,
    pub user: Option<String>,
}

impl TemplateDocument {
    /// Flatten a record through the primitive boundary.
    ///
    /// The record is serialized to JSON and every present value is pushed
    /// through [`primitive_string`], so a non-string identifier anywhere
    /// in the record arrives at the store as its string form.
    pub fn from_record(record: &TemplateRecord) -> Result<Self, CoreError> {
        let value = serde_json::to_value(record)
            .map_err(|e| CoreError::Serialization(format!("record not serializable: {e}")))?;
        let map = value
            .as_object()
            .ok_or_else(|| CoreError::Serialization("record is not a JSON object".into()))?;

        let required = |key: &str| -> Result<String, CoreError> {
            let v = map
                .get(key)
                .ok_or_else(|| CoreError::Serialization(format!("missing field: {key}")))?;
            primitive_string(v)
        };
        let optional = |key: &str| -> Result<Option<String>, CoreError> {
            map.get(key).map(primitive_string).transpose()
        };

        Ok(Self {
            template_id: required("template_id")?,
            component: required("component")?,
            fields: required("fields")?,
            purpose: required("purpose")?,
            style: required("style")?,
            html: required("html")?,
            source: required("source")?,
            parent_template_id: optional("parent_template_id")?,
            user: optional("user")?,
        })
    }
}

/// Reduce a JSON value to its plain string form.
///
/// Strings pass through; numbers and booleans are stringified; arrays and
/// objects are serialized to JSON text. Null cannot be persisted.
pub fn primitive_string(value: &Value) -> Result<String, CoreError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)
            .map_err(|e| CoreError::Serialization(format!("unserializable value: {e}"))),
        Value::Null => Err(CoreError::Serialization(
            "null value cannot be persisted".into(),
        )),
    }
}
