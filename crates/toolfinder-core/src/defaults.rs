//! Centralized default constants for toolfinder.
//!
//! All crates and the server reference these constants instead of
//! defining their own magic numbers.

// =============================================================================
// CATALOGUE
// =============================================================================

/// Default catalogue table name.
pub const CATALOGUE_TABLE: &str = "tools";

/// Alias used for the catalogue table in compiled queries.
pub const CATALOGUE_ALIAS: &str = "t";

/// Default catalogue store URL.
pub const DATABASE_URL: &str = "postgres://localhost/toolfinder";

/// Default connection pool size.
pub const DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// SEARCH
// =============================================================================

/// Seconds the boundary waits for the keyword classifier.
pub const CLASSIFIER_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// CLASSIFIER (OpenAI-compatible)
// =============================================================================

/// Default OpenAI-compatible API endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default chat model for keyword classification.
pub const CLASSIFIER_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for classification.
pub const CLASSIFIER_TEMPERATURE: f32 = 0.7;

/// Response token budget for classification.
pub const CLASSIFIER_MAX_TOKENS: u32 = 200;

/// HTTP timeout for classifier requests, in seconds.
pub const CLASSIFIER_HTTP_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// SERVER
// =============================================================================

/// Default listen host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const SERVER_PORT: u16 = 3000;

/// Requests allowed per rate-limit period.
pub const RATE_LIMIT_REQUESTS: u64 = 60;

/// Rate-limit period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Comma-separated CORS origins allowed by default.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Largest accepted request body (64 KiB).
pub const REQUEST_BODY_LIMIT_BYTES: usize = 64 * 1024;
