//! Domain logic for template resolution.
//!
//! Pure types and policies -- no I/O. Intent parsing, markup sanitation,
//! the cache hit gate, template records, and the primitive-document
//! boundary all live here so they can be unit tested without a database
//! or a generation service.

pub mod document;
pub mod embedding;
pub mod error;
pub mod intent;
pub mod markup;
pub mod matching;
pub mod template;
