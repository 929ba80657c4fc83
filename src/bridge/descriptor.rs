use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A callable tool advertised by the tool server.
///
/// Immutable for the lifetime of one classification/planning cycle; never
/// persisted across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "inputSchema")]
    pub input_schema: ToolSchema,
}

/// Parameter schema as the tool server reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: ToolSchema::default(),
        }
    }

    pub fn with_schema_fields(mut self, fields: &[&str]) -> Self {
        for field in fields {
            self.input_schema
                .properties
                .insert((*field).to_string(), serde_json::json!({ "type": "string" }));
        }
        self
    }
}
