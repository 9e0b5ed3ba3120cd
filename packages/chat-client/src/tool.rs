//! Typed function-calling tools.
//!
//! A [`Tool`] pairs a typed argument struct (schema generated via
//! `schemars`) with an async implementation. [`ErasedTool`] is the
//! object-safe form the agent loop stores and dispatches on.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A function the model may call during a completion.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name, as the model will address it.
    const NAME: &'static str;

    /// Argument type; its JSON schema is sent with the tool definition.
    type Args: DeserializeOwned + JsonSchema + Send;

    /// Output type, serialized back to the model as the tool result.
    type Output: Serialize + Send;

    /// Failure type for the tool body.
    type Error: std::error::Error + Send + Sync + 'static;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// Execute the tool.
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;

    /// Wire-format definition for this tool.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: self.description().to_string(),
            parameters: argument_schema::<Self::Args>(),
        }
    }
}

/// JSON schema for a tool's argument struct, with the metadata keys the
/// API has no use for stripped off.
fn argument_schema<T: JsonSchema>() -> serde_json::Value {
    let root = schemars::schema_for!(T);
    let mut value =
        serde_json::to_value(root.schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}));
    if let serde_json::Value::Object(map) = &mut value {
        map.remove("$schema");
        map.remove("title");
    }
    value
}

/// A tool definition in the shape the API expects.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Render as an OpenAI `tools` array entry.
    pub fn to_openai_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Call id, echoed back with the result.
    pub id: String,

    /// Name of the tool to invoke.
    pub name: String,

    /// Arguments as the raw JSON string the model produced.
    pub arguments: String,
}

impl ToolCall {
    /// Parse one entry of the response's `tool_calls` array.
    pub fn from_openai_value(value: &serde_json::Value) -> Option<Self> {
        Some(Self {
            id: value.get("id")?.as_str()?.to_string(),
            name: value.get("function")?.get("name")?.as_str()?.to_string(),
            arguments: value
                .get("function")?
                .get("arguments")?
                .as_str()?
                .to_string(),
        })
    }
}

/// Errors from dispatching a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to parse arguments: {0}")]
    ArgumentParse(String),

    #[error("tool execution failed: {0}")]
    Execution(String),

    #[error("failed to serialize output: {0}")]
    OutputSerialize(String),
}

/// Object-safe tool, for storing mixed tool types in one collection.
#[async_trait]
pub trait ErasedTool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Execute with raw JSON arguments, returning raw JSON output.
    async fn call_erased(&self, arguments: &str) -> Result<String, ToolError>;
}

#[async_trait]
impl<T: Tool> ErasedTool for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn call_erased(&self, arguments: &str) -> Result<String, ToolError> {
        let args: T::Args = serde_json::from_str(arguments)
            .map_err(|e| ToolError::ArgumentParse(e.to_string()))?;

        let output = self
            .call(args)
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        serde_json::to_string(&output).map_err(|e| ToolError::OutputSerialize(e.to_string()))
    }
}
