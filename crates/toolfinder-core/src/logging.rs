//! Structured logging schema and field name constants for toolfinder.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query by the same names across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, compiled filters, config choices |
//! | TRACE | Per-item iteration (dropped field names, parsed lines) |
//!
//! Keyword values are user input and are only logged at DEBUG or below.

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "inference"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "filter_compiler", "catalogue", "classifier", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "compile", "execute", "classify", "search"
pub const OPERATION: &str = "op";

// ─── Search fields ─────────────────────────────────────────────────────────

/// Raw search query text.
pub const QUERY: &str = "query";

/// Number of keywords in a classification mapping.
pub const KEYWORD_COUNT: &str = "keyword_count";

/// Number of bound parameters in a compiled filter.
pub const PARAM_COUNT: &str = "param_count";

/// Number of catalogue fields that contributed a clause.
pub const FIELD_COUNT: &str = "field_count";

/// Cross-field join policy ("any", "all").
pub const FIELD_JOIN: &str = "field_join";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of rows returned by the catalogue.
pub const RESULT_COUNT: &str = "result_count";

/// Byte length of a prompt sent to the classifier.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a classifier response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Catalogue table queried.
pub const DB_TABLE: &str = "db_table";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for classification.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Error kind (see `Error::kind`).
pub const ERROR_KIND: &str = "error_kind";
