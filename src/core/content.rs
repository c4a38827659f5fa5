//! Tool-result envelope returned by `tools/call`.

use serde::{Deserialize, Serialize};

/// One unit of a tool result's payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Content {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: "text".into(), text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn text(msg: impl Into<String>) -> Self {
        Self { content: vec![Content::text(msg)], is_error: false }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { content: vec![Content::text(msg)], is_error: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error_flag() {
        let v = serde_json::to_value(ToolResult::text("ok")).unwrap();
        assert_eq!(v, json!({"content": [{"type": "text", "text": "ok"}]}));
    }

    #[test]
    fn failure_sets_error_flag() {
        let v = serde_json::to_value(ToolResult::error("Error: nope")).unwrap();
        assert_eq!(v["isError"], true);
        assert_eq!(v["content"][0]["text"], "Error: nope");
    }
}
