//! Insert DTOs for the two store collections.
//!
//! The store contract is insert-only: no update or delete DTOs exist.
//! Identifier values are plain strings (primitive-document form) and are
//! cast to `uuid` in SQL at the insert site.

/// DTO for inserting a generated template into `templates`.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub template_id: String,
    pub component: String,
    pub fields: String,
    pub purpose: String,
    pub style: String,
    pub html: String,
    pub source: String,
}

/// DTO for inserting a user-modified template into `user_templates`.
#[derive(Debug, Clone)]
pub struct CreateUserTemplate {
    pub template_id: String,
    pub parent_template_id: String,
    pub saved_by: String,
    pub html: String,
    pub source: String,
}
