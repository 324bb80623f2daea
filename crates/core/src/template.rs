//! Canonical template records.
//!
//! A [`TemplateRecord`] is created exactly once -- on a cache miss
//! (`Generated`) or on a user save (`UserModified`) -- and never mutated
//! or deleted afterwards. Retention is an external concern.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Intent;

/// How a template record came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    Generated,
    UserModified,
}

impl TemplateSource {
    /// Wire string stored in the `source` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::UserModified => "user_modified",
        }
    }
}

/// The durable, canonical template record.
///
/// `fields` is the comma-joined serialization of the intent's field list;
/// the structured list is not retained past intent extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Globally unique, assigned at creation, immutable thereafter.
    pub template_id: Uuid,
    pub component: String,
    pub fields: String,
    pub purpose: String,
    pub style: String,
    /// Sanitized markup, free of code-fence wrapping.
    pub html: String,
    pub source: TemplateSource,
    /// Back-link to the record this one was derived from. Present only on
    /// user-modified records. A weak reference: the parent may be deleted
    /// independently and is never validated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_template_id: Option<String>,
    /// Who saved the edit. Present only on user-modified records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl TemplateRecord {
    /// Build a freshly generated record from the intent that produced it.
    pub fn generated(template_id: Uuid, intent: &Intent, html: String) -> Self {
        Self {
            template_id,
            component: intent.component.clone(),
            fields: intent.fields.join(", "),
            purpose: intent.purpose.clone(),
            style: intent.style.clone(),
            html,
            source: TemplateSource::Generated,
            parent_template_id: None,
            user: None,
        }
    }

    /// Build a user-modified record linked to its parent by identifier.
    ///
    /// The component/purpose/style metadata is intentionally blank: the
    /// edited markup was never re-analyzed, and user records never enter
    /// the similarity index.
    pub fn user_modified(
        template_id: Uuid,
        html: String,
        parent_template_id: String,
        user: String,
    ) -> Self {
        Self {
            template_id,
            component: String::new(),
            fields: String::new(),
            purpose: String::new(),
            style: String::new(),
            html,
            source: TemplateSource::UserModified,
            parent_template_id: Some(parent_template_id),
            user: Some(user),
        }
    }
}
