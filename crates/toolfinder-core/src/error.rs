//! Error types for toolfinder.

use thiserror::Error;

/// Result type alias using toolfinder's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for toolfinder operations.
///
/// Collaborator failures (classifier, catalogue store) keep their own
/// variants so the HTTP boundary can tell "the pipeline failed" apart from
/// "the filter matched zero rows".
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed request or classification shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Keyword classifier could not be reached (timeout, connect, 429/5xx)
    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Keyword classifier answered but the answer was unusable
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Catalogue store connection could not be used
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Catalogue store rejected the compiled filter
    #[error("Store query error: {0}")]
    StoreQuery(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable kind, used in API error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::ClassifierUnavailable(_) => "classifier_unavailable",
            Error::Classifier(_) => "classifier_error",
            Error::StoreUnavailable(_) => "store_unavailable",
            Error::StoreQuery(_) => "store_query_error",
            Error::Serialization(_) => "serialization_error",
            Error::Config(_) => "config_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// True for failures raised by the keyword classifier.
    pub fn is_classifier_failure(&self) -> bool {
        matches!(
            self,
            Error::ClassifierUnavailable(_) | Error::Classifier(_)
        )
    }

    /// True for failures raised by the catalogue store.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::StoreUnavailable(_) | Error::StoreQuery(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => Error::StoreUnavailable(e.to_string()),
            other => Error::StoreQuery(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            Error::ClassifierUnavailable(e.to_string())
        } else {
            Error::Classifier(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("classification must be an object".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: classification must be an object"
        );
    }

    #[test]
    fn test_error_display_classifier_unavailable() {
        let err = Error::ClassifierUnavailable("timed out".to_string());
        assert_eq!(err.to_string(), "Classifier unavailable: timed out");
    }

    #[test]
    fn test_error_display_classifier() {
        let err = Error::Classifier("empty choices".to_string());
        assert_eq!(err.to_string(), "Classifier error: empty choices");
    }

    #[test]
    fn test_error_display_store_unavailable() {
        let err = Error::StoreUnavailable("pool closed".to_string());
        assert_eq!(err.to_string(), "Store unavailable: pool closed");
    }

    #[test]
    fn test_error_display_store_query() {
        let err = Error::StoreQuery("column \"reviews\" does not exist".to_string());
        assert!(err.to_string().starts_with("Store query error:"));
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("bad table name".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad table name");
    }

    #[test]
    fn test_kind_is_stable() {
        assert_eq!(Error::InvalidInput(String::new()).kind(), "invalid_input");
        assert_eq!(
            Error::ClassifierUnavailable(String::new()).kind(),
            "classifier_unavailable"
        );
        assert_eq!(Error::Classifier(String::new()).kind(), "classifier_error");
        assert_eq!(
            Error::StoreUnavailable(String::new()).kind(),
            "store_unavailable"
        );
        assert_eq!(Error::StoreQuery(String::new()).kind(), "store_query_error");
    }

    #[test]
    fn test_failure_predicates() {
        assert!(Error::Classifier("x".into()).is_classifier_failure());
        assert!(Error::ClassifierUnavailable("x".into()).is_classifier_failure());
        assert!(!Error::StoreQuery("x".into()).is_classifier_failure());

        assert!(Error::StoreQuery("x".into()).is_store_failure());
        assert!(Error::StoreUnavailable("x".into()).is_store_failure());
        assert!(!Error::InvalidInput("x".into()).is_store_failure());
    }

    #[test]
    fn test_from_sqlx_pool_timeout_is_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn test_from_sqlx_pool_closed_is_unavailable() {
        let err: Error = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn test_from_sqlx_io_is_unavailable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: Error = sqlx::Error::Io(io_err).into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn test_from_sqlx_row_not_found_is_query_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::StoreQuery(_)));
    }

    #[test]
    fn test_from_sqlx_column_not_found_is_query_error() {
        let err: Error = sqlx::Error::ColumnNotFound("tool".to_string()).into();
        match err {
            Error::StoreQuery(msg) => assert!(msg.contains("tool")),
            other => panic!("Expected StoreQuery, got {:?}", other),
        }
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
