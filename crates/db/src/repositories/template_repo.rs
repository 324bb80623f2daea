//! Repository for the canonical `templates` collection.

use sqlx::PgPool;

use crate::models::template::CreateTemplate;

/// Insert operations for generated template records.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a generated template record.
    ///
    /// `template_id` arrives as a string (primitive-document form) and is
    /// cast to `uuid` in SQL; the primary key enforces uniqueness.
    pub async fn insert(pool: &PgPool, template: &CreateTemplate) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO templates \
                (template_id, component, fields, purpose, style, html, source) \
             VALUES ($1::uuid, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&template.template_id)
        .bind(&template.component)
        .bind(&template.fields)
        .bind(&template.purpose)
        .bind(&template.style)
        .bind(&template.html)
        .bind(&template.source)
        .execute(pool)
        .await?;
        Ok(())
    }
}
