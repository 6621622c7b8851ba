//! Tool calling definitions

use super::wire::{drop_absent, opt, Param, WireForm, WireValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition (for function calling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>, // JSON Schema
}

impl ToolDefinition {
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: None,
                parameters: None,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.function.description = Some(description.into());
        self
    }

    pub fn parameters(mut self, schema: Value) -> Self {
        self.function.parameters = Some(schema);
        self
    }
}

impl WireForm for ToolDefinition {
    fn to_wire_form(&self) -> Map<String, Value> {
        let function = drop_absent([
            ("name", Value::String(self.function.name.clone())),
            ("description", opt(self.function.description.clone())),
            ("parameters", opt(self.function.parameters.clone())),
        ]);
        drop_absent([
            ("type", Value::String(self.tool_type.clone())),
            ("function", Value::Object(function)),
        ])
    }
}

impl WireValue for ToolDefinition {
    fn to_wire_value(&self) -> Value {
        Value::Object(self.to_wire_form())
    }
}

impl From<ToolDefinition> for Param<ToolDefinition> {
    fn from(def: ToolDefinition) -> Self {
        Param::Structured(def)
    }
}

/// Tool call (invocation from model)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            function: ToolCallFunction {
                name: name.into(),
                arguments,
            },
        }
    }
}

impl WireForm for ToolCall {
    fn to_wire_form(&self) -> Map<String, Value> {
        let function = drop_absent([
            ("name", Value::String(self.function.name.clone())),
            ("arguments", self.function.arguments.clone()),
        ]);
        drop_absent([("function", Value::Object(function))])
    }
}

impl WireValue for ToolCall {
    fn to_wire_value(&self) -> Value {
        Value::Object(self.to_wire_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_call_round_trips_server_shape() {
        let raw = json!({"function": {"name": "get_weather", "arguments": {"city": "Paris"}}});
        let call: ToolCall = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(Value::Object(call.to_wire_form()), raw);
    }

    #[test]
    fn definition_omits_unset_description() {
        let def = ToolDefinition::function("lookup")
            .parameters(json!({"type": "object", "properties": {}}));
        let wire = def.to_wire_form();
        assert_eq!(wire["type"], json!("function"));
        assert!(wire["function"].get("description").is_none());
        assert_eq!(wire["function"]["name"], json!("lookup"));
    }
}
