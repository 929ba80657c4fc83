//! AI assist endpoints: classify a prompt, answer or plan, execute plans.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::intent::{classify, IntentMode};
use crate::planner::{Action, PlanGenerator};
use crate::server::error::{ApiError, ErrorBody};
use crate::server::ServerState;

const CHAT_FALLBACK: &str = "I tried to respond but something went wrong. Please try again.";

/// Request payload for the assist endpoint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssistRequest {
    /// Requested provider. Advisory only: the configured provider serves
    /// every request, a mismatch is logged and ignored.
    pub provider: Option<String>,
    /// Natural-language user prompt.
    pub prompt: String,
    /// Tool server to read the tool inventory from.
    pub mcp_url: Option<String>,
}

#[utoipa::path(
    post,
    path = "/proxy/ai",
    tag = "assist",
    request_body = AssistRequest,
    responses(
        (status = 200, description = "Chat reply or action plan"),
        (status = 400, body = ErrorBody),
        (status = 500, body = ErrorBody),
    ),
    description = "Classify the prompt and return either a conversational reply or an action plan."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn assist(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<AssistRequest>,
) -> Result<Json<Value>, ApiError> {
    let model = state.model.clone().map_err(ApiError::from)?;
    let generator = PlanGenerator::new(model, state.temperature);

    if let Some(requested) = request.provider.as_deref() {
        if !requested.eq_ignore_ascii_case(&state.provider) {
            tracing::info!(requested, configured = %state.provider, "provider request ignored");
        }
    }

    // Tool inventory failures degrade to an empty inventory, which biases
    // classification toward chat rather than failing the request.
    let tools = match &request.mcp_url {
        Some(url) => match state.bridge.list_tools(url, &HashMap::new()).await {
            Ok(tools) => tools,
            Err(error) => {
                tracing::warn!(%error, url, "tool inventory unavailable");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let intent = classify(&request.prompt, &tools);
    tracing::info!(mode = ?intent.mode, reasoning = %intent.reasoning, "intent classified");

    match intent.mode {
        IntentMode::Chat => match generator.chat_response(&request.prompt).await {
            Ok(response) => Ok(Json(json!({
                "mode": "chat",
                "response": response,
                "plan": "Conversational response",
                "actions": [],
                "confidence": 100,
            }))),
            Err(error) => {
                tracing::warn!(%error, "chat generation failed");
                Err(ApiError::internal(CHAT_FALLBACK)
                    .with_details(Value::String(error.to_string())))
            }
        },
        IntentMode::Tool => {
            let plan = generator
                .generate_plan(&request.prompt, &tools)
                .await
                .map_err(ApiError::from)?;
            let mut reply = serde_json::to_value(&plan)
                .map_err(|error| ApiError::internal(error.to_string()))?;
            if let Some(object) = reply.as_object_mut() {
                object.insert("mode".to_string(), Value::String("tool".to_string()));
            }
            Ok(Json(reply))
        }
    }
}

#[utoipa::path(
    post,
    path = "/proxy/ai/execute",
    tag = "assist",
    responses(
        (status = 200, description = "Per-action results in plan order"),
        (status = 400, body = ErrorBody),
    ),
    description = "Execute a previously returned action plan against a tool server."
)]
#[tracing::instrument(skip_all)]
pub(crate) async fn execute(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let actions: Vec<Action> = body
        .get("actions")
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid actions"))?;
    let endpoint = body
        .get("mcpUrl")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::bad_request("Missing MCP webhook URL"))?
        .to_string();

    tracing::info!(count = actions.len(), "executing plan");

    let executor =
        crate::executor::PlanExecutor::new(state.bridge.clone(), state.action_delay);
    let results = executor.execute(&endpoint, &actions).await;

    Ok(Json(json!({ "status": "completed", "results": results })))
}
