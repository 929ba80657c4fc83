use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::llm::openai_compat::upstream_error_message;
use crate::llm::provider::{GenerationRequest, LanguageModel};

const MESSAGES_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages-API model. No native JSON mode; the prompt contract
/// carries the structured-output requirement.
pub struct ClaudeModel {
    api_key: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl ClaudeModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LanguageModel for ClaudeModel {
    fn id(&self) -> &str {
        "claude"
    }

    async fn generate(&self, request: &GenerationRequest) -> CoreResult<String> {
        let body = json!({
            "model": self.model,
            "max_tokens": request.max_output_tokens,
            "temperature": request.temperature,
            "system": request.system_prompt,
            "messages": [{ "role": "user", "content": request.user_message }],
        });

        let response = self
            .http
            .post(MESSAGES_ENDPOINT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|error| CoreError::Transport(format!("claude API error: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Transport(format!(
                "claude API error: {}",
                upstream_error_message(&body, status.as_u16())
            )));
        }

        let parsed: MessagesResponse = response.json().await.map_err(|error| {
            CoreError::MalformedResponse(format!(
                "claude returned an unexpected response shape: {error}"
            ))
        })?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                CoreError::MalformedResponse("claude reply carried no content".to_string())
            })
    }
}
