use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::bridge::client::ToolServerClient;
use crate::bridge::normalize::{data_payloads, is_event_stream, normalize};

/// One client-facing stream event, serialized as a single JSON object tagged
/// by `type` on an SSE data line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    Status {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Chunk {
        data: Value,
    },
    Complete {
        data: Value,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl StreamEvent {
    pub fn status(message: impl Into<String>) -> Self {
        StreamEvent::Status {
            message: message.into(),
            payload: None,
        }
    }

    pub fn error(message: impl Into<String>, details: Option<String>) -> Self {
        StreamEvent::Error {
            error: message.into(),
            details,
        }
    }
}

impl ToolServerClient {
    /// Forward a tool-server exchange to `sink` as an ordered event stream.
    ///
    /// Emission order matches arrival order of the underlying lines, one line
    /// at a time. A dropped receiver (client disconnect) stops emission; the
    /// in-flight outbound call is allowed to complete.
    pub async fn stream(
        &self,
        endpoint: &str,
        payload: Value,
        extra_headers: &HashMap<String, String>,
        sink: &mpsc::Sender<StreamEvent>,
    ) {
        let status = StreamEvent::Status {
            message: "Sending request to MCP server...".to_string(),
            payload: Some(payload.clone()),
        };
        if sink.send(status).await.is_err() {
            return;
        }

        let raw = match self.post_raw(endpoint, &payload, extra_headers).await {
            Ok(raw) => raw,
            Err(error) => {
                let event =
                    StreamEvent::error("Failed to reach MCP server", Some(error.to_string()));
                let _ = sink.send(event).await;
                return;
            }
        };

        if is_event_stream(raw.content_type.as_deref(), &raw.body) {
            if sink
                .send(StreamEvent::status("Processing event-stream response..."))
                .await
                .is_err()
            {
                return;
            }
            for payload in data_payloads(&raw.body) {
                let data = match serde_json::from_str::<Value>(payload) {
                    Ok(value) => value,
                    Err(_) => json!({ "raw": payload }),
                };
                if sink.send(StreamEvent::Chunk { data }).await.is_err() {
                    return;
                }
            }
        } else {
            let data = normalize(raw.content_type.as_deref(), &raw.body).into_value();
            if sink.send(StreamEvent::Complete { data }).await.is_err() {
                return;
            }
        }

        let _ = sink.send(StreamEvent::status("Response complete")).await;
    }
}
