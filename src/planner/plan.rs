use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// One proposed tool invocation within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Action {
    /// Must match an advertised tool name; the executor does not re-check.
    pub tool: String,
    #[serde(default)]
    pub reasoning: String,
    /// Tool arguments; an action arriving without any still calls the tool
    /// with an empty argument object.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub parameters: Map<String, Value>,
}

/// An ordered sequence of proposed tool invocations. Execution order is call
/// order, never inferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActionPlan {
    /// Human-readable summary of the overall plan.
    pub plan: String,
    pub actions: Vec<Action>,
    /// Model-reported confidence, 0-100.
    pub confidence: u32,
}
