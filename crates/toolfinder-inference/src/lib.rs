//! # toolfinder-inference
//!
//! Keyword classifiers for toolfinder.
//!
//! This crate provides:
//! - `LlmKeywordClassifier`: prompts a chat model and parses its
//!   `keyword → column, column` answer
//! - OpenAI-compatible chat backend (feature `openai`, default)
//! - Mock classifier for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `openai` (default): Enable OpenAI-compatible backend
//! - `mock`: Enable `MockClassifier` for dependent crates' tests
//! - `integration`: Enable tests that need a live endpoint
//!
//! # Example
//!
//! ```rust,no_run
//! use toolfinder_inference::{KeywordClassifier, LlmKeywordClassifier, OpenAIBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::from_env().unwrap();
//!     let classifier = LlmKeywordClassifier::new(backend);
//!     let keywords = classifier
//!         .classify("best tools for designing software architecture")
//!         .await
//!         .unwrap();
//!     println!("{}", serde_json::to_string(&keywords).unwrap());
//! }
//! ```

pub mod classifier;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use toolfinder_core::*;

pub use classifier::{parse_classification, user_prompt, LlmKeywordClassifier, SYSTEM_PROMPT};

#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig};
