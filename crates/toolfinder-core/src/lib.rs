//! # toolfinder-core
//!
//! Core types, traits, and abstractions for the toolfinder search service.
//!
//! This crate provides the classification mapping, the catalogue field
//! registry, filter types, and the collaborator traits that the database,
//! inference, and API crates build on.

pub mod classification;
pub mod defaults;
pub mod error;
pub mod fields;
pub mod filter;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use classification::{Classification, ClassificationEntry};
pub use error::{Error, Result};
pub use fields::{
    field_names, lookup_field, normalize_field_name, FieldKind, FieldSpec, FIELD_REGISTRY,
};
pub use filter::{CompiledQuery, FieldConditions, FieldJoin, FilterExpression};
pub use models::{CatalogueRow, SearchRequest, SearchResponse};
pub use traits::*;
