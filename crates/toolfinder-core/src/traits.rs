//! Core traits for toolfinder collaborators.
//!
//! These traits define the seams between the search pipeline and its
//! external collaborators, so implementations (hosted LLM, local model,
//! PostgreSQL, in-memory test doubles) can be swapped freely.

use async_trait::async_trait;

use crate::{CatalogueRow, Classification, CompiledQuery, Result};

// =============================================================================
// CLASSIFIER TRAITS
// =============================================================================

/// Maps raw query text to keyword → field-name classifications.
///
/// Implementations may be slow, may fail, and are not required to be
/// deterministic. Field names are free-form; the compiler filters them.
#[async_trait]
pub trait KeywordClassifier: Send + Sync {
    /// Classify the query text.
    async fn classify(&self, text: &str) -> Result<Classification>;

    /// Short identifier for logs ("openai:gpt-3.5-turbo", "mock").
    fn name(&self) -> &str;
}

/// Backend for text generation (chat completion).
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate a response with a system prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate a response without a system prompt.
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    /// Get the model name.
    fn model_name(&self) -> &str;

    /// Check backend availability.
    async fn health_check(&self) -> Result<bool>;
}

// =============================================================================
// CATALOGUE TRAITS
// =============================================================================

/// Executes compiled filters against the tool catalogue.
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Run the compiled filter and return matching rows in store order.
    ///
    /// Fails with `StoreUnavailable` when no connection can be used and
    /// `StoreQuery` when the store rejects the filter.
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<CatalogueRow>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<()>;
}
