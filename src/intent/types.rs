use serde::Serialize;
use serde_json::{Map, Value};

/// Whether a user message gets a conversational reply or tool invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentMode {
    Chat,
    Tool,
}

/// Classification of one user message. Produced once per request and consumed
/// immediately; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intent {
    pub mode: IntentMode,
    pub application: Option<String>,
    pub action: Option<String>,
    pub parameters: Map<String, Value>,
    pub reasoning: String,
}

impl Intent {
    pub fn chat(reasoning: impl Into<String>) -> Self {
        Self {
            mode: IntentMode::Chat,
            application: None,
            action: None,
            parameters: Map::new(),
            reasoning: reasoning.into(),
        }
    }

    pub fn is_tool(&self) -> bool {
        self.mode == IntentMode::Tool
    }
}
