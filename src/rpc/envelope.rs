use serde::Serialize;
use serde_json::Value;

/// Protocol version carried by every outbound request.
pub const JSONRPC_VERSION: &str = "2.0";

/// The two methods the bridge speaks against a tool server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RpcMethod {
    #[serde(rename = "tools/list")]
    ToolsList,
    #[serde(rename = "tools/call")]
    ToolsCall,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::ToolsList => "tools/list",
            RpcMethod::ToolsCall => "tools/call",
        }
    }
}

/// One JSON-RPC request object sent to the tool server.
#[derive(Debug, Clone, Serialize)]
pub struct RpcEnvelope {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: RpcMethod,
    pub params: Value,
}

impl RpcEnvelope {
    pub fn new(id: String, method: RpcMethod, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_wire_shape() {
        let envelope = RpcEnvelope::new("7".to_string(), RpcMethod::ToolsList, json!({}));
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": "7",
                "method": "tools/list",
                "params": {}
            })
        );
    }

    #[test]
    fn call_method_renames() {
        let envelope = RpcEnvelope::new(
            "1".to_string(),
            RpcMethod::ToolsCall,
            json!({ "name": "send_email", "arguments": {} }),
        );
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(value["method"], "tools/call");
        assert_eq!(value["params"]["name"], "send_email");
    }
}
