//! Protocol bridge: translates abstract tool actions into JSON-RPC calls
//! and normalizes plain-JSON or event-stream replies into one canonical shape.

pub mod client;
pub mod descriptor;
pub mod normalize;
pub mod stream;

pub use client::{ToolCallOutcome, ToolServerClient};
pub use descriptor::{ToolDescriptor, ToolSchema};
pub use normalize::{normalize, Normalized};
pub use stream::StreamEvent;
