//! HTTP handlers for toolfinder-api.

pub mod health;
pub mod search;

pub use health::health_check;
pub use search::{compile_query, search_tools};
