//! The user-edit save path.
//!
//! Deliberately simpler than resolution: no matching, no generation, no
//! index interaction. Every save creates a new record.

use std::sync::Arc;

use uuid::Uuid;

use uiforge_core::document::TemplateDocument;
use uiforge_core::template::TemplateRecord;

use crate::error::ResolveError;
use crate::traits::TemplateStore;

/// Persists user-modified templates linked to their parent by identifier.
pub struct UserEditRecorder {
    store: Arc<dyn TemplateStore>,
}

impl UserEditRecorder {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Save a user-modified template.
    ///
    /// Always creates a new record with a fresh identifier; the given
    /// `parent_template_id` is recorded as-is (weak back-link, not
    /// validated against the store).
    pub async fn save(
        &self,
        html: &str,
        parent_template_id: &str,
        user: &str,
    ) -> Result<Uuid, ResolveError> {
        let template_id = Uuid::new_v4();
        let record = TemplateRecord::user_modified(
            template_id,
            html.to_string(),
            parent_template_id.to_string(),
            user.to_string(),
        );
        let document = TemplateDocument::from_record(&record)?;

        self.store.insert_user_modified(&document).await?;

        tracing::info!(
            template_id = %template_id,
            parent_template_id = %parent_template_id,
            user = %user,
            "User-modified template saved"
        );
        Ok(template_id)
    }
}
