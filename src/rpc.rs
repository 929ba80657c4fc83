//! JSON-RPC request construction and process-wide id allocation.

pub mod envelope;
pub mod id;

pub use envelope::{RpcEnvelope, RpcMethod, JSONRPC_VERSION};
pub use id::IdAllocator;
