use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::llm::openai_compat::upstream_error_message;
use crate::llm::provider::{GenerationRequest, LanguageModel};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini `generateContent` model.
pub struct GeminiModel {
    base_url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> CoreResult<String> {
        let endpoint = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        // Gemini has no separate system role on this endpoint; the system
        // prompt is prepended to the user text.
        let text = format!("{}\n\n{}", request.system_prompt, request.user_message);
        let mut generation_config = json!({
            "temperature": request.temperature,
            "maxOutputTokens": request.max_output_tokens,
        });
        if request.json_output {
            generation_config["response_mime_type"] = json!("application/json");
        }
        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": generation_config,
        });

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|error| CoreError::Transport(format!("gemini API error: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::Transport(format!(
                "gemini API error: {}",
                upstream_error_message(&body, status.as_u16())
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|error| {
            CoreError::MalformedResponse(format!(
                "gemini returned an unexpected response shape: {error}"
            ))
        })?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                CoreError::MalformedResponse("gemini reply carried no candidates".to_string())
            })
    }
}
