//! Plan generation: builds the language-model prompt contract and parses
//! the model's structured reply into an action plan.

pub mod generator;
pub mod plan;
pub mod prompt;

pub use generator::{parse_plan, PlanGenerator};
pub use plan::{Action, ActionPlan};
