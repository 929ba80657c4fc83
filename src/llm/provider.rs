use async_trait::async_trait;

use crate::error::CoreResult;

/// One prompt exchange with a language model.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_message: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Hint that the reply must be a JSON document. Providers without a
    /// native JSON mode ignore it; the prompt carries the contract anyway.
    pub json_output: bool,
}

/// Provider-agnostic language model capability: send a prompt, receive text.
///
/// Endpoint, authentication, and model-name selection live entirely inside
/// each implementation; callers never branch on the provider.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short provider label for logging.
    fn id(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> CoreResult<String>;
}
