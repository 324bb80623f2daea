//! Repository for the `user_templates` collection.

use sqlx::PgPool;

use crate::models::template::CreateUserTemplate;

/// Insert operations for user-modified template records.
pub struct UserTemplateRepo;

impl UserTemplateRepo {
    /// Insert a user-modified template record.
    ///
    /// `parent_template_id` is stored as given -- it is a weak back-link
    /// and is never validated against the `templates` table.
    pub async fn insert(pool: &PgPool, template: &CreateUserTemplate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_templates \
                (template_id, parent_template_id, saved_by, html, source) \
             VALUES ($1::uuid, $2, $3, $4, $5)",
        )
        .bind(&template.template_id)
        .bind(&template.parent_template_id)
        .bind(&template.saved_by)
        .bind(&template.html)
        .bind(&template.source)
        .execute(pool)
        .await?;
        Ok(())
    }
}
