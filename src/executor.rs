//! Sequential plan execution against a tool server.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::bridge::ToolServerClient;
use crate::planner::Action;

/// Outcome of one executed action, in plan order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecutionResult {
    pub action: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub error: Option<Value>,
}

/// Runs a plan's actions strictly in order, one tool call per action.
///
/// A failed action never aborts the run; its failure is recorded and the
/// next action proceeds after the configured pacing delay.
pub struct PlanExecutor {
    client: ToolServerClient,
    delay: Duration,
}

impl PlanExecutor {
    pub fn new(client: ToolServerClient, delay: Duration) -> Self {
        Self { client, delay }
    }

    pub async fn execute(&self, endpoint: &str, actions: &[Action]) -> Vec<ExecutionResult> {
        let mut results = Vec::with_capacity(actions.len());
        let headers = HashMap::new();

        for (index, action) in actions.iter().enumerate() {
            tracing::info!(tool = %action.tool, index, "executing action");

            let entry = match self
                .client
                .call_tool(endpoint, &action.tool, &action.parameters, &headers)
                .await
            {
                Ok(outcome) => {
                    let success = outcome.error.is_none();
                    if !success {
                        tracing::warn!(tool = %action.tool, "tool call reported an error");
                    }
                    ExecutionResult {
                        action: action.tool.clone(),
                        success,
                        result: outcome.result,
                        error: outcome.error,
                    }
                }
                Err(error) => {
                    tracing::warn!(tool = %action.tool, %error, "tool call failed");
                    ExecutionResult {
                        action: action.tool.clone(),
                        success: false,
                        result: None,
                        error: Some(Value::String(error.to_string())),
                    }
                }
            };
            results.push(entry);

            // Pacing delay between actions, not after the last one.
            if index + 1 < actions.len() {
                tokio::time::sleep(self.delay).await;
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_serializes_error_and_omits_result() {
        let entry = ExecutionResult {
            action: "gmail_send_email".to_string(),
            success: false,
            result: None,
            error: Some(Value::String("transport error: connect refused".to_string())),
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["action"], "gmail_send_email");
        assert_eq!(value["success"], false);
        assert!(value.get("result").is_none());
        assert_eq!(value["error"], "transport error: connect refused");
    }

    #[test]
    fn successful_result_omits_error() {
        let entry = ExecutionResult {
            action: "slack_post_message".to_string(),
            success: true,
            result: Some(serde_json::json!({"ok": true})),
            error: None,
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["success"], true);
        assert!(value.get("error").is_none());
        assert_eq!(value["result"]["ok"], true);
    }
}
