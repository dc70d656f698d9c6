//! OpenAI-specific error handling.

use reqwest::StatusCode;
use toolfinder_core::Error;

/// OpenAI-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Request too large.
    ContextLengthExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl OpenAIErrorCode {
    /// Determine error code from HTTP status and error type.
    pub fn from_response(status: u16, error_type: &str) -> Self {
        match (status, error_type) {
            (401, _) => Self::AuthenticationError,
            (429, _) => Self::RateLimitExceeded,
            (404, _) | (_, "model_not_found") => Self::ModelNotFound,
            (400, _) if error_type.contains("context_length") => Self::ContextLengthExceeded,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Transient conditions: the classifier may answer if asked again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::ServerError)
    }
}

/// Convert a non-success classifier response to a toolfinder Error.
///
/// Retryable conditions become `ClassifierUnavailable`; the rest are
/// `Classifier` errors.
pub fn to_classifier_error(status: StatusCode, error_type: &str, message: &str) -> Error {
    let code = OpenAIErrorCode::from_response(status.as_u16(), error_type);
    let detail = match code {
        OpenAIErrorCode::AuthenticationError => format!("Authentication failed: {}", message),
        OpenAIErrorCode::RateLimitExceeded => format!("Rate limit exceeded: {}", message),
        OpenAIErrorCode::ModelNotFound => format!("Model not found: {}", message),
        OpenAIErrorCode::ContextLengthExceeded => format!("Context too long: {}", message),
        OpenAIErrorCode::ServerError => format!("Server error {}: {}", status, message),
        OpenAIErrorCode::Unknown => format!("OpenAI returned {}: {}", status, message),
    };

    if code.is_retryable() {
        Error::ClassifierUnavailable(detail)
    } else {
        Error::Classifier(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_401() {
        let code = OpenAIErrorCode::from_response(401, "invalid_api_key");
        assert_eq!(code, OpenAIErrorCode::AuthenticationError);
    }

    #[test]
    fn test_error_code_from_429() {
        let code = OpenAIErrorCode::from_response(429, "rate_limit_exceeded");
        assert_eq!(code, OpenAIErrorCode::RateLimitExceeded);
    }

    #[test]
    fn test_error_code_from_404() {
        let code = OpenAIErrorCode::from_response(404, "model_not_found");
        assert_eq!(code, OpenAIErrorCode::ModelNotFound);
    }

    #[test]
    fn test_error_code_from_5xx() {
        assert_eq!(
            OpenAIErrorCode::from_response(500, "server_error"),
            OpenAIErrorCode::ServerError
        );
        assert_eq!(
            OpenAIErrorCode::from_response(503, ""),
            OpenAIErrorCode::ServerError
        );
    }

    #[test]
    fn test_error_code_from_unknown() {
        let code = OpenAIErrorCode::from_response(418, "im_a_teapot");
        assert_eq!(code, OpenAIErrorCode::Unknown);
    }

    #[test]
    fn test_rate_limit_maps_to_unavailable() {
        let err = to_classifier_error(StatusCode::TOO_MANY_REQUESTS, "", "Too many requests");
        assert!(matches!(err, Error::ClassifierUnavailable(_)));
        assert!(err.to_string().contains("Rate limit exceeded"));
    }

    #[test]
    fn test_server_error_maps_to_unavailable() {
        let err = to_classifier_error(StatusCode::BAD_GATEWAY, "", "upstream");
        assert!(matches!(err, Error::ClassifierUnavailable(_)));
    }

    #[test]
    fn test_auth_failure_maps_to_classifier_error() {
        let err = to_classifier_error(StatusCode::UNAUTHORIZED, "invalid_api_key", "Invalid key");
        assert!(matches!(err, Error::Classifier(_)));
        assert!(err.to_string().contains("Authentication failed"));
    }

    #[test]
    fn test_bad_request_maps_to_classifier_error() {
        let err = to_classifier_error(StatusCode::BAD_REQUEST, "invalid_request_error", "bad");
        assert!(matches!(err, Error::Classifier(_)));
    }
}
