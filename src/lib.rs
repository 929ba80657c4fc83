pub mod server;

pub mod config;
pub mod error;

pub mod bridge;
pub mod executor;
pub mod intent;
pub mod llm;
pub mod planner;
pub mod rpc;

pub use crate::error::{CoreError, CoreResult};
pub use crate::server::Server;
