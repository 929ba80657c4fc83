use std::env;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::llm::claude::ClaudeModel;
use crate::llm::gemini::GeminiModel;
use crate::llm::openai_compat::OpenAiCompatModel;
use crate::llm::provider::LanguageModel;

const DEFAULT_PROVIDER: &str = "gemini";
const DEFAULT_TEMPERATURE: f64 = 0.7;

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_CLAUDE_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Language-model configuration from the environment.
///
/// The active provider is a configuration choice; the `provider` field on
/// inbound requests is advisory metadata only and never dispatched on.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: String,
    pub model: Option<String>,
    pub temperature: f64,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub groq_api_key: Option<String>,
}

impl LlmSettings {
    pub fn from_env() -> Self {
        let provider = env::var("TOOLBRIDGE_LLM_PROVIDER")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string())
            .to_lowercase();
        let model = env::var("TOOLBRIDGE_LLM_MODEL")
            .ok()
            .filter(|value| !value.is_empty());
        let temperature = env::var("TOOLBRIDGE_LLM_TEMPERATURE")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            provider,
            model,
            temperature,
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty()),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty()),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok().filter(|v| !v.is_empty()),
            groq_api_key: env::var("GROQ_API_KEY").ok().filter(|v| !v.is_empty()),
        }
    }

    fn model_or(&self, default: &str) -> String {
        self.model.clone().unwrap_or_else(|| default.to_string())
    }
}

/// Build the configured provider strategy.
///
/// A missing key for the configured provider is a configuration error
/// surfaced before any network call; the server still serves the non-AI
/// endpoints.
pub fn build_model(settings: &LlmSettings) -> CoreResult<Arc<dyn LanguageModel>> {
    let missing_key = || {
        CoreError::Configuration(format!(
            "API key for {} not configured",
            settings.provider
        ))
    };

    match settings.provider.as_str() {
        "gemini" => {
            let key = settings.gemini_api_key.clone().ok_or_else(missing_key)?;
            Ok(Arc::new(GeminiModel::new(
                key,
                settings.model_or(DEFAULT_GEMINI_MODEL),
            )))
        }
        "openai" => {
            let key = settings.openai_api_key.clone().ok_or_else(missing_key)?;
            Ok(Arc::new(OpenAiCompatModel::new(
                "openai",
                OPENAI_BASE_URL,
                key,
                settings.model_or(DEFAULT_OPENAI_MODEL),
            )))
        }
        "groq" => {
            let key = settings.groq_api_key.clone().ok_or_else(missing_key)?;
            Ok(Arc::new(OpenAiCompatModel::new(
                "groq",
                GROQ_BASE_URL,
                key,
                settings.model_or(DEFAULT_GROQ_MODEL),
            )))
        }
        "claude" | "anthropic" => {
            let key = settings.anthropic_api_key.clone().ok_or_else(missing_key)?;
            Ok(Arc::new(ClaudeModel::new(
                key,
                settings.model_or(DEFAULT_CLAUDE_MODEL),
            )))
        }
        other => Err(CoreError::Configuration(format!(
            "unsupported provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str) -> LlmSettings {
        LlmSettings {
            provider: provider.to_string(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            gemini_api_key: Some("g-key".to_string()),
            openai_api_key: Some("o-key".to_string()),
            anthropic_api_key: Some("a-key".to_string()),
            groq_api_key: Some("q-key".to_string()),
        }
    }

    #[test]
    fn builds_each_provider() {
        for provider in ["gemini", "openai", "groq", "claude"] {
            let model = build_model(&settings(provider)).expect(provider);
            assert!(!model.id().is_empty());
        }
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let mut s = settings("gemini");
        s.gemini_api_key = None;
        let error = build_model(&s).err().expect("missing key");
        assert_eq!(
            error,
            CoreError::Configuration("API key for gemini not configured".to_string())
        );
    }

    #[test]
    fn unsupported_provider_rejected() {
        let error = build_model(&settings("parrot")).err().expect("unsupported");
        assert!(matches!(error, CoreError::Configuration(_)));
    }

    #[test]
    fn groq_uses_openai_compatible_strategy() {
        let model = build_model(&settings("groq")).expect("groq");
        assert_eq!(model.id(), "groq");
    }
}
