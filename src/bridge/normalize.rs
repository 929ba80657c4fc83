use serde_json::{json, Value};

/// Canonical result of normalizing a tool-server response body.
///
/// `Raw` is the degraded passthrough form: the bridge never fails a call on a
/// parse error, it hands the original text back and lets the caller decide
/// significance.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Parsed(Value),
    Raw(String),
}

impl Normalized {
    /// Convert into the wire value: parsed documents pass through, raw text
    /// becomes `{"raw": <text>}`.
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Parsed(value) => value,
            Normalized::Raw(text) => json!({ "raw": text }),
        }
    }

    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            Normalized::Parsed(value) => Some(value),
            Normalized::Raw(_) => None,
        }
    }
}

/// Whether the response should be treated as event-stream framed: either the
/// declared content type says so, or the body itself looks framed.
pub fn is_event_stream(content_type: Option<&str>, body: &str) -> bool {
    if let Some(content_type) = content_type {
        if content_type.contains("text/event-stream") {
            return true;
        }
    }
    body.starts_with("event:") || body.lines().any(|line| line.starts_with("data:"))
}

/// Payloads of `data: ` lines in arrival order, trimmed, empty ones skipped.
pub fn data_payloads(body: &str) -> impl Iterator<Item = &str> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(str::trim)
        .filter(|payload| !payload.is_empty())
}

/// Normalize a response body into the canonical shape.
///
/// Event-stream framed bodies yield the first successfully parsed `data:`
/// payload; plain bodies are parsed as one JSON document. Anything unparsable
/// degrades to `Raw` rather than erroring. Both the synchronous and streaming
/// call paths go through this single function.
pub fn normalize(content_type: Option<&str>, body: &str) -> Normalized {
    if is_event_stream(content_type, body) {
        for payload in data_payloads(body) {
            if let Ok(value) = serde_json::from_str::<Value>(payload) {
                return Normalized::Parsed(value);
            }
        }
        return Normalized::Raw(body.to_string());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => Normalized::Parsed(value),
        Err(_) => Normalized::Raw(body.to_string()),
    }
}
