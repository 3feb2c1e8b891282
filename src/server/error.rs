use crate::error::ErrorKind;
use crate::Error;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Error envelope returned by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

/// An error already shaped for the wire.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn missing_image() -> Self {
        Self::from_domain(Error::MissingImage)
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: "not_found",
            message: "Not found".to_string(),
        }
    }

    /// Wraps a failure raised while identifying an accepted upload.
    pub fn identification(err: Error) -> Self {
        tracing::error!(kind = ?err.kind(), "Error in plant identification: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: kind_str(err.kind()),
            message: format!("Failed to identify plant: {}", err),
        }
    }

    fn from_domain(err: Error) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: kind_str(kind),
            message: err.to_string(),
        }
    }

    fn validation(status: StatusCode, message: String) -> Self {
        Self {
            status,
            kind: kind_str(ErrorKind::Validation),
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn kind_str(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::Configuration => "configuration",
        ErrorKind::Upstream => "upstream",
        ErrorKind::Timeout => "timeout",
        ErrorKind::Parse => "parse",
        ErrorKind::IncompleteResult => "incomplete_result",
        ErrorKind::Internal => "internal",
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!("Malformed multipart body: {}", err);
        Self::validation(err.status(), err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::warn!("Rejected non-multipart request: {}", rejection);
        Self::validation(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            kind: self.kind.to_string(),
        });

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_image_is_bad_request() {
        let err = ApiError::missing_image();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No image file provided");
    }

    #[test]
    fn test_identification_errors_are_prefixed() {
        let err = ApiError::identification(Error::Parse);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message(),
            "Failed to identify plant: Failed to parse plant information from AI response"
        );
        assert_eq!(err.kind, "parse");
    }

    #[test]
    fn test_kind_strings_match_serialized_kinds() {
        for kind in [
            ErrorKind::Validation,
            ErrorKind::Configuration,
            ErrorKind::Upstream,
            ErrorKind::Timeout,
            ErrorKind::Parse,
            ErrorKind::IncompleteResult,
            ErrorKind::Internal,
        ] {
            let serialized = serde_json::to_value(kind).unwrap();
            assert_eq!(serialized, kind_str(kind));
        }
    }
}
