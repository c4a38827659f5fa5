//! Loosely-typed `tools/call` arguments, read only at the executor boundary.

use serde_json::{Map, Value as JsonValue};

use crate::domain::ToolError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(Map<String, JsonValue>);

impl ToolArgs {
    pub fn new(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }

    /// Non-empty string value; absent, empty or mistyped values read as `None`.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(JsonValue::as_str).filter(|s| !s.is_empty())
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.str(key).map(str::to_owned)
    }

    /// Boolean value; anything but a JSON `true` reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).and_then(JsonValue::as_bool).unwrap_or(false)
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ToolError> {
        self.str(key).ok_or(ToolError::Missing(key))
    }

    /// All of `keys` must be present; the error names every one of them.
    pub fn require_all<const N: usize>(
        &self,
        keys: &'static [&'static str; N],
    ) -> Result<[&str; N], ToolError> {
        let mut out: [&str; N] = [""; N];
        for (slot, key) in out.iter_mut().zip(keys.iter()) {
            *slot = self.str(key).ok_or(ToolError::MissingAll(keys))?;
        }
        Ok(out)
    }
}
