//! API error handling
//!
//! Provides sanitized error responses that don't leak implementation details.
//! In production mode, internal error details are dropped from responses.
//!
//! Two body shapes exist. Query endpoints answer `{"error", "details"?}`;
//! the ingest endpoint answers `{"status": "error", "message", "details"?}`
//! through [`IngestError`].

use application::ApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use utoipa::ToSchema;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

const GENERIC_MESSAGE: &str = "An error occurred processing your request";

/// Configure whether internal error details should be exposed in responses.
///
/// Production deployments set this to `false`: storage failures then report
/// only their class ("Query failed") without the underlying message.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Replace messages that look like they carry paths, connection strings or
/// credentials with a generic message
fn sanitize_error_message(msg: &str) -> String {
    const SENSITIVE_PATTERNS: [&str; 17] = [
        // File paths
        "/home/",
        "/users/",
        "/var/",
        "/etc/",
        "/tmp/",
        "\\users\\",
        "c:\\",
        // Connection strings
        "sqlite://",
        "file:",
        "://",
        // Credentials
        "appid=",
        "api_key",
        "password",
        "secret",
        // Stack trace indicators
        "panicked at",
        "stack backtrace",
        ".rs:",
    ];

    let lower = msg.to_lowercase();
    if SENSITIVE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return GENERIC_MESSAGE.to_string();
    }

    msg.to_string()
}

/// Details attached to a response, or `None` when details are suppressed
fn visible_details(details: &str, expose: bool) -> Option<String> {
    expose.then(|| sanitize_error_message(details))
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Body or query string could not be decoded
    #[error("{message}: {details}")]
    Malformed {
        message: &'static str,
        details: String,
    },

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Storage failed; `message` names the failure class shown to callers
    #[error("{message}: {details}")]
    Storage {
        message: &'static str,
        details: String,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body for query endpoints
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"error": "City not found"}))]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error response body for the ingest endpoint
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"status": "error", "message": "Query failed", "details": "StorageError: no such table: observations"}))]
pub struct StatusErrorResponse {
    /// Always `"error"`
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Status code, caller-facing message and optional details
    fn parts(&self, expose: bool) -> (StatusCode, String, Option<String>) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, sanitize_error_message(msg), None),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, sanitize_error_message(msg), None),
            // Decoding problems are the caller's own input, so details stay visible
            Self::Malformed { message, details } => (
                StatusCode::BAD_REQUEST,
                (*message).to_string(),
                Some(sanitize_error_message(details)),
            ),
            Self::PayloadTooLarge(details) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large".to_string(),
                Some(sanitize_error_message(details)),
            ),
            Self::Storage { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                (*message).to_string(),
                visible_details(details, expose),
            ),
            Self::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".to_string(),
                visible_details(msg, expose),
            ),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
                visible_details(msg, expose),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts(should_expose_details());
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        let kind = err.kind();
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::Validation(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Connection(msg) => Self::Storage {
                message: "DB connection failed",
                details: format!("{kind}: {msg}"),
            },
            ApplicationError::Storage(msg) => Self::Storage {
                message: "Query failed",
                details: format!("{kind}: {msg}"),
            },
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Conflict(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::Malformed {
                message: "Invalid request body",
                details: rejection.body_text(),
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed {
            message: "Invalid query string",
            details: rejection.body_text(),
        }
    }
}

/// An [`ApiError`] rendered in the ingest endpoint's `status`/`message` shape
#[derive(Debug, Error)]
#[error(transparent)]
pub struct IngestError(#[from] pub ApiError);

impl From<ApplicationError> for IngestError {
    fn from(err: ApplicationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, message, details) = self.0.parts(should_expose_details());
        (
            status,
            Json(StatusErrorResponse {
                status: "error",
                message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::BadRequest("invalid input".to_string()).to_string(),
            "Bad request: invalid input"
        );
        assert_eq!(
            ApiError::NotFound("City not found".to_string()).to_string(),
            "Not found: City not found"
        );
        let storage = ApiError::Storage {
            message: "Query failed",
            details: "StorageError: disk I/O error".to_string(),
        };
        assert_eq!(storage.to_string(), "Query failed: StorageError: disk I/O error");
    }

    #[test]
    fn sanitize_passes_plain_messages() {
        assert_eq!(sanitize_error_message("City not found"), "City not found");
        assert_eq!(
            sanitize_error_message("StorageError: no such table: observations"),
            "StorageError: no such table: observations"
        );
    }

    #[test]
    fn sanitize_hides_paths_and_connection_strings() {
        assert_eq!(
            sanitize_error_message("unable to open /var/lib/skyview/skyview.db"),
            GENERIC_MESSAGE
        );
        assert_eq!(
            sanitize_error_message("error sending request for url (https://api.example.com/geo?appid=abc)"),
            GENERIC_MESSAGE
        );
        assert_eq!(sanitize_error_message("bad password for user"), GENERIC_MESSAGE);
    }

    #[test]
    fn storage_details_visible_in_development() {
        let err = ApiError::Storage {
            message: "Query failed",
            details: "StorageError: database is locked".to_string(),
        };
        let (status, message, details) = err.parts(true);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Query failed");
        assert_eq!(details.as_deref(), Some("StorageError: database is locked"));
    }

    #[test]
    fn storage_details_suppressed_in_production() {
        let err = ApiError::Storage {
            message: "DB connection failed",
            details: "ConnectionError: timed out waiting for connection".to_string(),
        };
        let (status, message, details) = err.parts(false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "DB connection failed");
        assert!(details.is_none());
    }

    #[test]
    fn internal_never_leaks_message_text() {
        let (_, message, details) = ApiError::Internal("conflict on locations.name".into()).parts(false);
        assert_eq!(message, "An internal error occurred");
        assert!(details.is_none());
    }

    #[test]
    fn error_response_omits_missing_details() {
        let resp = ErrorResponse {
            error: "City not found".to_string(),
            details: None,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({"error": "City not found"})
        );
    }

    #[test]
    fn status_error_response_shape() {
        let resp = StatusErrorResponse {
            status: "error",
            message: "Query failed".to_string(),
            details: Some("StorageError: x".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({"status": "error", "message": "Query failed", "details": "StorageError: x"})
        );
    }

    #[test]
    fn application_errors_map_to_api_errors() {
        let domain_err = ApplicationError::Domain(domain::DomainError::ValidationError("x".into()));
        assert!(matches!(ApiError::from(domain_err), ApiError::BadRequest(_)));

        assert!(matches!(
            ApiError::from(ApplicationError::Validation("humidity".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::NotFound("Atlantis".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::ExternalService("503".into())),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(ApplicationError::Conflict("dup".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn storage_errors_carry_class_and_message() {
        let ApiError::Storage { message, details } =
            ApiError::from(ApplicationError::Storage("no such table: feedback".into()))
        else {
            unreachable!("expected Storage");
        };
        assert_eq!(message, "Query failed");
        assert_eq!(details, "StorageError: no such table: feedback");

        let ApiError::Storage { message, details } =
            ApiError::from(ApplicationError::Connection("pool timed out".into()))
        else {
            unreachable!("expected Storage");
        };
        assert_eq!(message, "DB connection failed");
        assert_eq!(details, "ConnectionError: pool timed out");
    }

    #[test]
    fn decoding_failures_keep_details_in_production() {
        let err = ApiError::Malformed {
            message: "Invalid request body",
            details: "expected value at line 1 column 2".to_string(),
        };
        let (status, message, details) = err.parts(false);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Invalid request body");
        assert_eq!(details.as_deref(), Some("expected value at line 1 column 2"));

        let (status, message, _) = ApiError::PayloadTooLarge("length limit exceeded".into()).parts(false);
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(message, "Request body too large");
    }

    #[test]
    fn into_response_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ServiceUnavailable("x".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            IngestError::from(ApplicationError::Storage("x".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
