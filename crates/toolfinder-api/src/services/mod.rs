//! Service layer for business logic.

pub mod search;

pub use search::SearchService;
