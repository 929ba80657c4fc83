use std::sync::Arc;

use crate::bridge::ToolDescriptor;
use crate::error::{CoreError, CoreResult};
use crate::llm::{GenerationRequest, LanguageModel};
use crate::planner::plan::ActionPlan;
use crate::planner::prompt;

const CHAT_MAX_OUTPUT_TOKENS: u32 = 1000;
const PLAN_MAX_OUTPUT_TOKENS: u32 = 2000;
const PLAN_INSTRUCTION: &str =
    "Please analyze my request and provide a detailed plan with specific actions.";
const PLAN_PARSE_ERROR: &str = "AI response is not valid JSON";

/// Builds prompts for the language-model service and parses its replies.
/// Provider-agnostic: holds only the interchangeable model capability.
pub struct PlanGenerator {
    model: Arc<dyn LanguageModel>,
    temperature: f64,
}

impl PlanGenerator {
    pub fn new(model: Arc<dyn LanguageModel>, temperature: f64) -> Self {
        Self { model, temperature }
    }

    /// Conversational reply: the model's text passes through unparsed.
    pub async fn chat_response(&self, user_prompt: &str) -> CoreResult<String> {
        let request = GenerationRequest {
            system_prompt: prompt::chat_system_prompt(user_prompt),
            user_message: user_prompt.to_string(),
            temperature: self.temperature,
            max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
            json_output: false,
        };
        self.model.generate(&request).await
    }

    /// Structured plan: the model must reply with an action-plan JSON object.
    pub async fn generate_plan(
        &self,
        user_prompt: &str,
        tools: &[ToolDescriptor],
    ) -> CoreResult<ActionPlan> {
        let request = GenerationRequest {
            system_prompt: prompt::tool_system_prompt(tools, user_prompt),
            user_message: PLAN_INSTRUCTION.to_string(),
            temperature: self.temperature,
            max_output_tokens: PLAN_MAX_OUTPUT_TOKENS,
            json_output: true,
        };
        let text = self.model.generate(&request).await?;
        tracing::debug!(chars = text.len(), model = self.model.id(), "plan reply received");
        parse_plan(&text)
    }
}

/// Coerce model output into an [`ActionPlan`].
///
/// Tries a direct parse first, then the brace-delimited substring from the
/// first `{` to the last `}` (models often wrap JSON in prose or fences).
/// Both failing is a terminal plan-parse error; no partial plan is returned.
pub fn parse_plan(text: &str) -> CoreResult<ActionPlan> {
    if let Ok(plan) = serde_json::from_str::<ActionPlan>(text) {
        return Ok(plan);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            if let Ok(plan) = serde_json::from_str::<ActionPlan>(&text[start..=end]) {
                return Ok(plan);
            }
        }
    }

    Err(CoreError::PlanParse(PLAN_PARSE_ERROR.to_string()))
}
