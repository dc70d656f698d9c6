//! Mock classifier and generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use toolfinder_core::{Classification, KeywordClassifier};
//! use toolfinder_inference::mock::MockClassifier;
//!
//! let classifier = MockClassifier::new()
//!     .with_mapping("best tools", Classification::new().with("best", ["reviews"]));
//!
//! let c = classifier.classify("best tools").await.unwrap();
//! assert_eq!(c.len(), 1);
//! assert_eq!(classifier.classify_call_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use toolfinder_core::{Classification, Error, GenerationBackend, KeywordClassifier, Result};

/// Failure the mock raises instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Behave like an unreachable or overloaded classifier.
    Unavailable,
    /// Behave like a classifier that answered with garbage.
    Malformed,
}

impl MockFailure {
    fn to_error(self) -> Error {
        match self {
            MockFailure::Unavailable => {
                Error::ClassifierUnavailable("Simulated classifier outage".to_string())
            }
            MockFailure::Malformed => {
                Error::Classifier("Simulated malformed classifier reply".to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub timestamp: std::time::Instant,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    mappings: HashMap<String, Classification>,
    default_classification: Classification,
    fixed_responses: HashMap<String, String>,
    default_response: String,
    latency_ms: u64,
    failure_rate: f64,
    failure: Option<MockFailure>,
}

/// Mock keyword classifier (and raw generation backend) for tests.
///
/// Clones share the call log, so a clone handed to the code under test can
/// be inspected afterwards.
#[derive(Clone, Default)]
pub struct MockClassifier {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockClassifier {
    /// Create a mock that classifies every query as empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification returned for queries without a mapping.
    pub fn with_default(mut self, classification: Classification) -> Self {
        Arc::make_mut(&mut self.config).default_classification = classification;
        self
    }

    /// Classification returned for one exact query.
    pub fn with_mapping(mut self, query: impl Into<String>, classification: Classification) -> Self {
        Arc::make_mut(&mut self.config)
            .mappings
            .insert(query.into(), classification);
        self
    }

    /// Raw text returned by `generate_with_system` for unmapped prompts.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Raw text returned by `generate_with_system` for one exact prompt.
    pub fn with_response_mapping(
        mut self,
        prompt: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .fixed_responses
            .insert(prompt.into(), response.into());
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        Arc::make_mut(&mut self.config).latency_ms = latency_ms;
        self
    }

    /// Fail every call with the given failure.
    pub fn with_failure(mut self, failure: MockFailure) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(failure);
        self
    }

    /// Set random failure rate (0.0 - 1.0); failures are `Unavailable`.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        Arc::make_mut(&mut self.config).failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear()
    }

    /// Number of `classify` calls.
    pub fn classify_call_count(&self) -> usize {
        self.count("classify")
    }

    /// Number of `generate` calls.
    pub fn generate_call_count(&self) -> usize {
        self.count("generate")
    }

    fn count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall {
                operation: operation.to_string(),
                input: input.to_string(),
                timestamp: std::time::Instant::now(),
            });
    }

    async fn simulate(&self) -> Result<()> {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if let Some(failure) = self.config.failure {
            return Err(failure.to_error());
        }

        if self.should_fail() {
            return Err(MockFailure::Unavailable.to_error());
        }

        Ok(())
    }

    fn should_fail(&self) -> bool {
        use rand::Rng;
        if self.config.failure_rate > 0.0 {
            rand::thread_rng().gen::<f64>() < self.config.failure_rate
        } else {
            false
        }
    }
}

#[async_trait]
impl KeywordClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        self.log_call("classify", text);
        self.simulate().await?;

        Ok(self
            .config
            .mappings
            .get(text)
            .unwrap_or(&self.config.default_classification)
            .clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[async_trait]
impl GenerationBackend for MockClassifier {
    async fn generate_with_system(&self, _system: &str, prompt: &str) -> Result<String> {
        self.log_call("generate", prompt);
        self.simulate().await?;

        Ok(self
            .config
            .fixed_responses
            .get(prompt)
            .unwrap_or(&self.config.default_response)
            .clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.config.failure.is_none())
    }
}
