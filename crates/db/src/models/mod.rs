//! Row models and insert DTOs.
//!
//! Each submodule contains a `FromRow` struct matching the database row
//! where something reads it back, and a create DTO for inserts. All
//! values arriving here have already passed the primitive-document
//! boundary in `uiforge-core`.

pub mod index_entry;
pub mod template;
