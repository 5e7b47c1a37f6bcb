//! Database models and DTOs for survey documents and their taxonomies.

pub mod survey;
pub mod taxonomy;
