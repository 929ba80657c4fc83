//! Language-model service: one trait, interchangeable provider strategies.

pub mod claude;
pub mod gemini;
pub mod openai_compat;
pub mod provider;
pub mod settings;

pub use claude::ClaudeModel;
pub use gemini::GeminiModel;
pub use openai_compat::OpenAiCompatModel;
pub use provider::{GenerationRequest, LanguageModel};
pub use settings::{build_model, LlmSettings};
