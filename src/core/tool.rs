use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Metadata every tool exposes through `tools/list`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// JSON-schema subset used to advertise arguments. Not enforced at call time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: BTreeMap<&'static str, Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Property {
    #[serde(rename = "type")]
    pub prop_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
}

impl Property {
    fn new(prop_type: &'static str, description: &'static str) -> Self {
        Self { prop_type, description: Some(description), choices: None, default: None }
    }
}

impl InputSchema {
    pub fn object() -> Self {
        Self { schema_type: "object", properties: BTreeMap::new(), required: Vec::new() }
    }

    pub fn string(mut self, name: &'static str, description: &'static str) -> Self {
        self.properties.insert(name, Property::new("string", description));
        self
    }

    pub fn boolean(mut self, name: &'static str, description: &'static str) -> Self {
        let mut prop = Property::new("boolean", description);
        prop.default = Some(JsonValue::Bool(false));
        self.properties.insert(name, prop);
        self
    }

    pub fn choice(
        mut self,
        name: &'static str,
        description: &'static str,
        choices: Vec<&'static str>,
    ) -> Self {
        let mut prop = Property::new("string", description);
        prop.choices = Some(choices);
        self.properties.insert(name, prop);
        self
    }

    /// Attach a default to an already declared property.
    pub fn default_value(mut self, name: &'static str, value: impl Into<JsonValue>) -> Self {
        if let Some(prop) = self.properties.get_mut(name) {
            prop.default = Some(value.into());
        }
        self
    }

    pub fn required(mut self, names: &[&'static str]) -> Self {
        self.required.extend_from_slice(names);
        self
    }
}
