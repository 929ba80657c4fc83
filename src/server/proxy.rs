//! Synchronous proxy endpoint: one JSON-RPC round trip per request.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::rpc::RpcMethod;
use crate::server::error::{ApiError, ErrorBody};
use crate::server::ServerState;

/// Request payload for the proxy endpoints.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Tool server endpoint to forward to.
    pub url: Option<String>,
    /// High-level action: "listTools" or "callTool".
    pub action: Option<String>,
    /// Tool to invoke when action is "callTool".
    pub tool_name: Option<String>,
    /// Arguments for the invoked tool.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub args: Map<String, Value>,
    /// Extra headers forwarded to the tool server.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Pre-built JSON-RPC payload, forwarded verbatim when present.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub raw_payload: Option<Value>,
}

/// Translate a proxy request into the JSON-RPC payload to forward.
///
/// A raw payload wins over the action shorthand and is passed through
/// untouched, without consuming an allocator id.
pub(crate) fn build_payload(state: &ServerState, request: &ProxyRequest) -> CoreResult<Value> {
    if let Some(raw) = &request.raw_payload {
        return Ok(raw.clone());
    }

    match request.action.as_deref() {
        Some("listTools") => {
            let envelope = state
                .bridge
                .envelope(RpcMethod::ToolsList, Value::Object(Map::new()));
            serde_json::to_value(&envelope).map_err(|error| CoreError::Internal(error.to_string()))
        }
        Some("callTool") => {
            let tool_name = request
                .tool_name
                .as_deref()
                .ok_or_else(|| CoreError::InvalidInput("Missing toolName for callTool".to_string()))?;
            let envelope = state.bridge.envelope(
                RpcMethod::ToolsCall,
                serde_json::json!({ "name": tool_name, "arguments": request.args }),
            );
            serde_json::to_value(&envelope).map_err(|error| CoreError::Internal(error.to_string()))
        }
        _ => Err(CoreError::InvalidInput("Invalid action or payload".to_string())),
    }
}

#[utoipa::path(
    post,
    path = "/proxy",
    tag = "proxy",
    request_body = ProxyRequest,
    responses(
        (status = 200, description = "Normalized tool server response"),
        (status = 400, body = ErrorBody),
        (status = 500, body = ErrorBody),
    ),
    description = "Forward one JSON-RPC request to a tool server and return the normalized reply."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn proxy(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ProxyRequest>,
) -> Result<Json<Value>, ApiError> {
    let url = request
        .url
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing MCP webhook URL"))?;
    let payload = build_payload(&state, &request)?;

    tracing::info!(url, action = request.action.as_deref().unwrap_or("raw"), "forwarding request");

    match state.bridge.send(url, &payload, &request.headers).await {
        Ok(normalized) => Ok(Json(normalized.into_value())),
        Err(error) => {
            tracing::warn!(%error, "tool server unreachable");
            Err(ApiError::internal("Failed to reach MCP server")
                .with_details(Value::String(error.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::ToolServerClient;
    use crate::rpc::IdAllocator;
    use std::time::Duration;

    fn test_state() -> ServerState {
        ServerState {
            bridge: ToolServerClient::new(Arc::new(IdAllocator::new())),
            model: Err(CoreError::Configuration("no key".to_string())),
            provider: "gemini".to_string(),
            temperature: 0.7,
            action_delay: Duration::from_millis(0),
        }
    }

    #[test]
    fn raw_payload_passes_through_verbatim() {
        let state = test_state();
        let raw = serde_json::json!({"jsonrpc": "2.0", "id": "42", "method": "tools/list"});
        let request = ProxyRequest {
            raw_payload: Some(raw.clone()),
            ..Default::default()
        };
        assert_eq!(build_payload(&state, &request).expect("payload"), raw);
    }

    #[test]
    fn list_tools_builds_envelope_with_fresh_id() {
        let state = test_state();
        let request = ProxyRequest {
            action: Some("listTools".to_string()),
            ..Default::default()
        };
        let payload = build_payload(&state, &request).expect("payload");
        assert_eq!(payload["jsonrpc"], "2.0");
        assert_eq!(payload["id"], "1");
        assert_eq!(payload["method"], "tools/list");
        assert_eq!(payload["params"], serde_json::json!({}));
    }

    #[test]
    fn call_tool_requires_tool_name() {
        let state = test_state();
        let request = ProxyRequest {
            action: Some("callTool".to_string()),
            ..Default::default()
        };
        let error = build_payload(&state, &request).expect_err("error");
        assert_eq!(
            error,
            CoreError::InvalidInput("Missing toolName for callTool".to_string())
        );
    }

    #[test]
    fn call_tool_wraps_args_as_arguments() {
        let state = test_state();
        let mut args = Map::new();
        args.insert("to".to_string(), Value::String("a@b.co".to_string()));
        let request = ProxyRequest {
            action: Some("callTool".to_string()),
            tool_name: Some("gmail_send_email".to_string()),
            args,
            ..Default::default()
        };
        let payload = build_payload(&state, &request).expect("payload");
        assert_eq!(payload["method"], "tools/call");
        assert_eq!(payload["params"]["name"], "gmail_send_email");
        assert_eq!(payload["params"]["arguments"]["to"], "a@b.co");
    }

    #[test]
    fn unknown_action_is_invalid_input() {
        let state = test_state();
        let request = ProxyRequest {
            action: Some("deleteEverything".to_string()),
            ..Default::default()
        };
        let error = build_payload(&state, &request).expect_err("error");
        assert_eq!(
            error,
            CoreError::InvalidInput("Invalid action or payload".to_string())
        );
    }

    #[test]
    fn missing_action_and_payload_is_invalid_input() {
        let state = test_state();
        let error = build_payload(&state, &ProxyRequest::default()).expect_err("error");
        assert_eq!(
            error,
            CoreError::InvalidInput("Invalid action or payload".to_string())
        );
    }
}
