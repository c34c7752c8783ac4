//! Standard `{status, result}` envelope returned by every helper operation.

use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

/// Outcome of one helper operation. `status` is written as the HTTP status, `result` as the JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub status: StatusCode,
    pub result: Value,
}

impl Envelope {
    pub fn new(status: StatusCode, result: Value) -> Self {
        Envelope { status, result }
    }

    pub fn ok(result: Value) -> Self {
        Self::new(StatusCode::OK, result)
    }

    pub fn created(result: Value) -> Self {
        Self::new(StatusCode::CREATED, result)
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, error_body(message))
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, "Not found")
    }

    /// Convert a failure raised inside `component`. Server-side failures are logged.
    pub fn from_error(component: &str, err: &AppError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            tracing::error!(component = component, error = %err, "[{}] error", component);
        } else {
            tracing::debug!(component = component, error = %err, "rejected");
        }
        Self::error(status, err.message())
    }
}

pub fn error_body(message: impl Into<String>) -> Value {
    serde_json::json!({ "error": message.into() })
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.result)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_error_keeps_status_and_message() {
        let env = Envelope::from_error("delete", &AppError::Execution("database is locked".into()));
        assert_eq!(env.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(env.result, serde_json::json!({ "error": "database is locked" }));

        let env = Envelope::from_error("create", &AppError::Validation("Please provide data".into()));
        assert_eq!(env.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(env.result["error"], "Please provide data");
    }

    #[test]
    fn not_found_body() {
        let env = Envelope::not_found();
        assert_eq!(env.status, StatusCode::NOT_FOUND);
        assert_eq!(env.result["error"], "Not found");
    }
}
