//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.
//! Rejections render in the `{"status": "error", "message", "details"}` shape used by
//! write endpoints.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::Validate;

use crate::error::StatusErrorResponse;

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            Self::JsonError(e) => {
                // Oversized bodies keep 413; every other decoding problem is a bad request
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large", e.body_text())
                } else {
                    (StatusCode::BAD_REQUEST, "Invalid request body", e.body_text())
                }
            },
            Self::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, "Validation failed", msg.clone()),
        };

        let body = StatusErrorResponse {
            status: "error",
            message: message.to_string(),
            details: Some(details),
        };

        (status, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Use this instead of `Json<T>` when you want automatic validation
/// of the request body using the `validator` crate.
///
/// # Example
///
/// ```ignore
/// use validator::Validate;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Validate)]
/// struct MyRequest {
///     #[validate(length(min = 1, max = 100))]
///     city: String,
/// }
///
/// async fn handler(ValidatedJson(req): ValidatedJson<MyRequest>) {
///     // req is validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value.validate().map_err(|e| {
            let mut errors: Vec<String> = e
                .field_errors()
                .iter()
                .flat_map(|(field, errors)| {
                    errors.iter().map(move |error| {
                        format!(
                            "{}: {}",
                            field,
                            error
                                .message
                                .as_ref()
                                .map_or_else(|| error.code.to_string(), ToString::to_string)
                        )
                    })
                })
                .collect();
            // field_errors() is a map; keep the output stable
            errors.sort();

            ValidationError::ValidationFailed(errors.join("; "))
        })?;

        Ok(Self(value))
    }
}
