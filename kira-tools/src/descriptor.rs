//! Function descriptors advertised to the model for function calling.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{ToolError, ToolResult};

/// Immutable metadata describing a callable function.
///
/// The `name` identifies the tool inside a [`ToolManager`](crate::ToolManager);
/// `parameters` holds the JSON schema sent to the model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionDescriptor {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default = "empty_parameters")]
    parameters: Value,
}

fn empty_parameters() -> Value {
    json!({ "type": "object", "properties": {} })
}

impl FunctionDescriptor {
    /// Creates a descriptor with an empty parameter schema.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidDescriptor`] if the name is empty.
    pub fn new(name: impl Into<String>) -> ToolResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            description: None,
            parameters: empty_parameters(),
        })
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the whole parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.parameters = parameters;
        self
    }

    /// Adds one property to the object schema, optionally marking it required.
    ///
    /// A schema that is not an object is replaced by an empty object schema
    /// first.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Value, required: bool) -> Self {
        let name = name.into();
        if !self.parameters.is_object() {
            self.parameters = empty_parameters();
        }
        if let Value::Object(root) = &mut self.parameters {
            let properties = root
                .entry("properties")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(properties) = properties {
                properties.insert(name.clone(), schema);
            }
            if required {
                let list = root
                    .entry("required")
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Value::Array(list) = list {
                    if !list.iter().any(|item| item.as_str() == Some(name.as_str())) {
                        list.push(Value::String(name));
                    }
                }
            }
        }
        self
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the JSON schema of the parameters.
    #[must_use]
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Re-checks invariants, for descriptors that arrived through deserialisation.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidDescriptor`] if the name is empty.
    pub fn validate(&self) -> ToolResult<()> {
        validate_name(&self.name)
    }
}

fn validate_name(name: &str) -> ToolResult<()> {
    if name.trim().is_empty() {
        return Err(ToolError::InvalidDescriptor {
            reason: "function name cannot be empty".into(),
        });
    }
    Ok(())
}
