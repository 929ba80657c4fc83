//! Lexical intent classification: decides chat vs tool without an NLU stack.

pub mod classifier;
pub mod rules;
pub mod types;

pub use classifier::classify;
pub use types::{Intent, IntentMode};
