use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::CoreError;

/// API error response.
///
/// Every error returned by the HTTP layer serialises as:
/// ```json
/// { "error": "<message>" }
/// ```
/// with an optional `details` field carrying upstream failure context.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.body.details = Some(details);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration(msg) | CoreError::InvalidInput(msg) => Self::bad_request(msg),
            CoreError::Transport(msg)
            | CoreError::MalformedResponse(msg)
            | CoreError::PlanParse(msg)
            | CoreError::Internal(msg) => Self::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_omits_absent_details() {
        let body = ErrorBody {
            error: "Missing MCP webhook URL".to_string(),
            details: None,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value, serde_json::json!({"error": "Missing MCP webhook URL"}));
    }

    #[test]
    fn body_carries_details_when_set() {
        let error = ApiError::internal("Failed to reach MCP server")
            .with_details(Value::String("connect refused".to_string()));
        let value = serde_json::to_value(&error.body).expect("serialize");
        assert_eq!(value["error"], "Failed to reach MCP server");
        assert_eq!(value["details"], "connect refused");
    }

    #[test]
    fn configuration_errors_map_to_bad_request() {
        let error = ApiError::from(CoreError::Configuration(
            "API key for gemini not configured".to_string(),
        ));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transport_errors_map_to_internal() {
        let error = ApiError::from(CoreError::Transport("connect refused".to_string()));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
