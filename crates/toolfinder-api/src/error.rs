//! HTTP error mapping.
//!
//! Every pipeline failure becomes a JSON error body with a stable `error`
//! kind. A failed search is never rendered as an empty `tools` list.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use toolfinder_core::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err {
                Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
                Error::ClassifierUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                Error::Classifier(_) => StatusCode::BAD_GATEWAY,
                Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                Error::StoreQuery(_) => StatusCode::INTERNAL_SERVER_ERROR,
                Error::Serialization(_) | Error::Config(_) | Error::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Core(err) => err.kind(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Core(Error::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let message = self.to_string();

        if status.is_server_error() {
            error!(subsystem = "api", error_kind = kind, status = status.as_u16(), %message, "Request failed");
        } else {
            warn!(subsystem = "api", error_kind = kind, status = status.as_u16(), %message, "Request rejected");
        }

        let body = Json(serde_json::json!({
            "error": kind,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                Error::ClassifierUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (Error::Classifier("x".into()), StatusCode::BAD_GATEWAY),
            (
                Error::StoreUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                Error::StoreQuery("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (Error::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_kind_passes_through() {
        let err = ApiError::from(Error::Classifier("bad reply".into()));
        assert_eq!(err.kind(), "classifier_error");
        assert_eq!(err.to_string(), "Classifier error: bad reply");
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::from(Error::StoreUnavailable("pool closed".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
