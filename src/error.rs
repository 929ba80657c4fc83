use std::fmt;

/// Unified error type for the toolbridge crate.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Missing endpoint or credential; rejected before any network call.
    Configuration(String),
    /// Outbound call to the tool server or language model failed.
    Transport(String),
    /// Upstream reply arrived but did not have the expected shape.
    MalformedResponse(String),
    /// Language model output could not be coerced into an action plan.
    PlanParse(String),
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Internal error.
    Internal(String),
}

impl CoreError {
    /// The bare message without the variant prefix, for wire payloads that
    /// pin exact error strings.
    pub fn message(&self) -> &str {
        match self {
            CoreError::Configuration(msg)
            | CoreError::Transport(msg)
            | CoreError::MalformedResponse(msg)
            | CoreError::PlanParse(msg)
            | CoreError::InvalidInput(msg)
            | CoreError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            CoreError::Transport(msg) => write!(f, "transport error: {msg}"),
            CoreError::MalformedResponse(msg) => write!(f, "malformed response: {msg}"),
            CoreError::PlanParse(msg) => write!(f, "plan parse error: {msg}"),
            CoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CoreError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
