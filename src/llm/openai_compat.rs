use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{CoreError, CoreResult};
use crate::llm::provider::{GenerationRequest, LanguageModel};

/// Chat-completions model behind any OpenAI-compatible endpoint (OpenAI
/// itself, Groq).
pub struct OpenAiCompatModel {
    id: String,
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiCompatModel {
    pub fn new(
        id: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatModel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, request: &GenerationRequest) -> CoreResult<String> {
        let endpoint = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message }
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
        });
        if request.json_output {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|error| {
                CoreError::Transport(format!("{} API error: {error}", self.id))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Transport(format!(
                "{} API error: {}",
                self.id,
                upstream_error_message(&body, status.as_u16())
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|error| {
            CoreError::MalformedResponse(format!(
                "{} returned an unexpected response shape: {error}",
                self.id
            ))
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CoreError::MalformedResponse(format!("{} reply carried no content", self.id))
            })
    }
}

/// Pull `error.message` out of an upstream error body, falling back to the
/// HTTP status.
pub(crate) fn upstream_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            let message = value.get("error")?.get("message")?.as_str()?;
            Some(message.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_extracted() {
        let body = r#"{"error":{"message":"invalid api key","type":"auth"}}"#;
        assert_eq!(upstream_error_message(body, 401), "invalid api key");
    }

    #[test]
    fn upstream_message_falls_back_to_status() {
        assert_eq!(upstream_error_message("not json", 503), "HTTP 503");
        assert_eq!(upstream_error_message("{}", 500), "HTTP 500");
    }
}
