//! OpenAI-compatible chat backend.
//!
//! Works with any endpoint that speaks the chat completions API, including
//! OpenAI itself, Azure OpenAI, OpenRouter, vLLM and Ollama in OpenAI
//! compatibility mode.
//!
//! # Example
//!
//! ```rust,no_run
//! use toolfinder_inference::openai::{OpenAIBackend, OpenAIConfig};
//! use toolfinder_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     // From environment variables
//!     let backend = OpenAIBackend::from_env().unwrap();
//!
//!     // Or with custom config
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(), // Ollama
//!         gen_model: "llama3".to_string(),
//!         ..Default::default()
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!
//!     let reply = backend.generate("Say hello").await.unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIBackend, OpenAIConfig, DEFAULT_GEN_MODEL, DEFAULT_OPENAI_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{to_classifier_error, OpenAIErrorCode};
pub use types::*;
