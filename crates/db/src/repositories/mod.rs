//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod template_index_repo;
pub mod template_repo;
pub mod user_template_repo;

pub use template_index_repo::TemplateIndexRepo;
pub use template_repo::TemplateRepo;
pub use user_template_repo::UserTemplateRepo;
