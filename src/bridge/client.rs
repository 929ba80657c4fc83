use std::collections::HashMap;
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Map, Value};

use crate::bridge::descriptor::ToolDescriptor;
use crate::bridge::normalize::{normalize, Normalized};
use crate::error::{CoreError, CoreResult};
use crate::rpc::{IdAllocator, RpcEnvelope, RpcMethod};

/// Tool servers may answer as plain JSON or as an event stream.
pub(crate) const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// HTTP client for a JSON-RPC tool server.
///
/// Cheap to clone; all clones share the underlying connection pool and the
/// injected id allocator, which is the only cross-request shared state.
#[derive(Clone)]
pub struct ToolServerClient {
    http: reqwest::Client,
    ids: Arc<IdAllocator>,
}

/// Raw response before normalization.
pub(crate) struct RawResponse {
    pub content_type: Option<String>,
    pub body: String,
}

/// `result`/`error` fields carried by a tool-call response document.
///
/// A response that degraded to raw passthrough carries neither; callers derive
/// success from the absence of `error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallOutcome {
    pub result: Option<Value>,
    pub error: Option<Value>,
}

impl ToolCallOutcome {
    fn from_normalized(normalized: Normalized) -> Self {
        match normalized {
            Normalized::Parsed(Value::Object(mut document)) => Self {
                result: document.remove("result"),
                error: document.remove("error").filter(|value| !value.is_null()),
            },
            _ => Self::default(),
        }
    }
}

impl ToolServerClient {
    pub fn new(ids: Arc<IdAllocator>) -> Self {
        Self {
            http: reqwest::Client::new(),
            ids,
        }
    }

    /// Build an outbound envelope with a freshly allocated id.
    pub fn envelope(&self, method: RpcMethod, params: Value) -> RpcEnvelope {
        RpcEnvelope::new(self.ids.next_id(), method, params)
    }

    pub(crate) async fn post_raw(
        &self,
        endpoint: &str,
        payload: &Value,
        extra_headers: &HashMap<String, String>,
    ) -> CoreResult<RawResponse> {
        let mut request = self
            .http
            .post(endpoint)
            .header(ACCEPT, ACCEPT_VALUE)
            .json(payload);
        for (name, value) in extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|error| CoreError::Transport(format!("request to tool server failed: {error}")))?;

        // Non-2xx statuses are absorbed: whatever body arrived is normalized
        // and handed back so callers see upstream error documents verbatim.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|error| CoreError::Transport(format!("failed to read tool server response: {error}")))?;

        Ok(RawResponse { content_type, body })
    }

    /// Send a pre-built JSON-RPC payload and normalize the reply.
    pub async fn send(
        &self,
        endpoint: &str,
        payload: &Value,
        extra_headers: &HashMap<String, String>,
    ) -> CoreResult<Normalized> {
        let raw = self.post_raw(endpoint, payload, extra_headers).await?;
        Ok(normalize(raw.content_type.as_deref(), &raw.body))
    }

    /// List the tools the server advertises. Absent or unparsable tool lists
    /// yield an empty sequence, not an error.
    pub async fn list_tools(
        &self,
        endpoint: &str,
        extra_headers: &HashMap<String, String>,
    ) -> CoreResult<Vec<ToolDescriptor>> {
        let envelope = self.envelope(RpcMethod::ToolsList, json!({}));
        let payload = serde_json::to_value(&envelope)
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        let normalized = self.send(endpoint, &payload, extra_headers).await?;
        Ok(extract_tools(&normalized))
    }

    /// Invoke one tool by name, returning the carried result or error field.
    /// `arguments` is always an object on the wire, even when empty.
    pub async fn call_tool(
        &self,
        endpoint: &str,
        tool_name: &str,
        args: &Map<String, Value>,
        extra_headers: &HashMap<String, String>,
    ) -> CoreResult<ToolCallOutcome> {
        let envelope = self.envelope(
            RpcMethod::ToolsCall,
            json!({ "name": tool_name, "arguments": args }),
        );
        let payload = serde_json::to_value(&envelope)
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        let normalized = self.send(endpoint, &payload, extra_headers).await?;
        Ok(ToolCallOutcome::from_normalized(normalized))
    }
}

fn extract_tools(normalized: &Normalized) -> Vec<ToolDescriptor> {
    let Some(document) = normalized.as_parsed() else {
        return Vec::new();
    };
    document
        .get("result")
        .and_then(|result| result.get("tools"))
        .and_then(Value::as_array)
        .map(|tools| {
            tools
                .iter()
                .filter_map(|tool| serde_json::from_value(tool.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
