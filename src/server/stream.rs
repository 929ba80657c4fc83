//! Streaming proxy endpoint: the round trip relayed as server-sent events.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::bridge::StreamEvent;
use crate::server::error::{ApiError, ErrorBody};
use crate::server::proxy::{build_payload, ProxyRequest};
use crate::server::ServerState;

const CHANNEL_CAPACITY: usize = 16;

fn sse_event(event: &StreamEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(data) => Event::default().data(data),
        Err(_) => Event::default().data("{\"type\":\"error\",\"error\":\"serialization failed\"}"),
    }
}

#[utoipa::path(
    post,
    path = "/proxy/stream",
    tag = "proxy",
    request_body = ProxyRequest,
    responses(
        (status = 200, description = "Progress events followed by the response, as SSE"),
        (status = 400, body = ErrorBody),
    ),
    description = "Forward one JSON-RPC request and relay progress as server-sent events."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn proxy_stream(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<ProxyRequest>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, ApiError> {
    // Only a missing URL fails before the stream opens; everything after
    // this point is reported in-band as error events.
    let url = request
        .url
        .clone()
        .ok_or_else(|| ApiError::bad_request("Missing MCP webhook URL"))?;

    let (sink, receiver) = mpsc::channel::<StreamEvent>(CHANNEL_CAPACITY);

    match build_payload(&state, &request) {
        Ok(payload) => {
            let client = state.bridge.clone();
            let headers = request.headers.clone();
            tokio::spawn(async move {
                client.stream(&url, payload, &headers, &sink).await;
            });
        }
        Err(error) => {
            let _ = sink
                .send(StreamEvent::Error {
                    error: error.message().to_string(),
                    details: None,
                })
                .await;
        }
    }

    let stream = ReceiverStream::new(receiver).map(|event| Ok(sse_event(&event)));

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn status_events_serialize_with_type_tag() {
        let event = StreamEvent::Status {
            message: "Response complete".to_string(),
            payload: None,
        };
        let data = serde_json::to_string(&event).expect("serialize");
        let value: Value = serde_json::from_str(&data).expect("parse");
        assert_eq!(value["type"], "status");
        assert_eq!(value["message"], "Response complete");
    }

    #[test]
    fn error_events_carry_the_message() {
        let event = StreamEvent::Error {
            error: "Invalid action or payload".to_string(),
            details: None,
        };
        let value: Value =
            serde_json::from_str(&serde_json::to_string(&event).expect("serialize")).expect("parse");
        assert_eq!(value["type"], "error");
        assert_eq!(value["error"], "Invalid action or payload");
    }
}
