//! Error handling for the bookhouse HTTP layer
//!
//! [`AppError`] is the single exit point for failures raised by handlers.
//! Caller mistakes keep their message; anything unanticipated is logged with
//! an error id and answered with a fixed 500 body.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Body returned for every unanticipated failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Body of a 412 response.
#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub success: bool,
    pub message: String,
    pub data: serde_json::Value,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload failed field validation. `data` maps field names to
    /// the violation messages for that field.
    #[error("validation error: {message}")]
    Validation {
        message: String,
        data: serde_json::Value,
    },

    /// Request was well formed but cannot be honoured.
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error
    pub fn validation(data: serde_json::Value, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            data,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Status code this error is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::PRECONDITION_FAILED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::Validation { message, data } => {
                tracing::debug!(status_code = %status.as_u16(), %message, "request rejected");
                let body = ValidationBody {
                    success: false,
                    message,
                    data,
                };
                (status, Json(body)).into_response()
            }
            AppError::BadRequest { message } => {
                tracing::debug!(status_code = %status.as_u16(), %message, "request rejected");
                (status, Json(message)).into_response()
            }
            AppError::Internal(err) => {
                let error_id = Uuid::new_v4();
                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error = %format!("{err:#}"),
                    "unhandled request failure"
                );
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer`; answers like any other internal error.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(
        error_id = %Uuid::new_v4(),
        panic = %detail,
        "request handler panicked"
    );

    internal_error_response()
}
