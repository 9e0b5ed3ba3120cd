//! Agent loop: chat completions with automatic tool invocation.
//!
//! The loop sends the conversation, executes any tool calls the model
//! requests, appends the results, and repeats until the model answers
//! with plain text. Callers see a single completion turn.

use tracing::{debug, info, warn};

use crate::tool::{ErasedTool, Tool, ToolCall};
use crate::types::{truncate_to_char_boundary, Message};
use crate::{ChatClient, ClientError, Result};

/// Builder for an [`Agent`].
pub struct AgentBuilder<'a> {
    client: &'a ChatClient,
    model: String,
    system_prompt: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_turns: usize,
    temperature: Option<f32>,
}

impl<'a> AgentBuilder<'a> {
    pub(crate) fn new(client: &'a ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: None,
            tools: Vec::new(),
            max_turns: 10,
            temperature: None,
        }
    }

    /// Set the system prompt. Skipped if the conversation passed to
    /// [`Agent::chat_with_history`] already starts with one.
    pub fn system(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Register a tool the model may call.
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    /// Register an already-boxed tool (for tools chosen at runtime).
    pub fn tool_dyn(mut self, tool: Box<dyn ErasedTool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Cap the number of completion turns (tool round-trips included).
    pub fn max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> Agent<'a> {
        Agent {
            client: self.client,
            model: self.model,
            system_prompt: self.system_prompt,
            tools: self.tools,
            max_turns: self.max_turns,
            temperature: self.temperature,
        }
    }
}

/// A configured agent bound to one model and one tool set.
pub struct Agent<'a> {
    client: &'a ChatClient,
    model: String,
    system_prompt: Option<String>,
    tools: Vec<Box<dyn ErasedTool>>,
    max_turns: usize,
    temperature: Option<f32>,
}

/// Outcome of an agent conversation.
#[derive(Debug)]
pub struct AgentResponse {
    /// Final text from the model.
    pub content: String,

    /// Names of the tools invoked along the way, in call order.
    pub tool_calls_made: Vec<String>,

    /// Completion turns spent.
    pub turns: usize,
}

impl<'a> Agent<'a> {
    /// Run the agent on a single user message.
    pub async fn chat(&self, user_message: impl Into<String>) -> Result<AgentResponse> {
        self.chat_with_history(vec![Message::user(user_message.into())])
            .await
    }

    /// Run the agent on a pre-built conversation.
    pub async fn chat_with_history(&self, history: Vec<Message>) -> Result<AgentResponse> {
        let mut messages: Vec<serde_json::Value> = Vec::with_capacity(history.len() + 1);

        if let Some(ref system) = self.system_prompt {
            let has_system = history.first().map(|m| m.role.as_str()) == Some("system");
            if !has_system {
                messages.push(serde_json::json!({"role": "system", "content": system}));
            }
        }
        for message in history {
            messages.push(serde_json::json!({
                "role": message.role,
                "content": message.content
            }));
        }

        self.drive(messages).await
    }

    /// The completion/tool loop proper.
    async fn drive(&self, mut messages: Vec<serde_json::Value>) -> Result<AgentResponse> {
        let mut tool_calls_made = Vec::new();
        let mut turns = 0;

        let tool_defs: Vec<serde_json::Value> = self
            .tools
            .iter()
            .map(|t| t.definition().to_openai_format())
            .collect();

        loop {
            turns += 1;
            if turns > self.max_turns {
                warn!(max_turns = self.max_turns, "Agent exceeded its turn limit");
                return Err(ClientError::Api(format!(
                    "agent exceeded {} turns without a final response",
                    self.max_turns
                )));
            }

            debug!(
                turn = turns,
                model = %self.model,
                message_count = messages.len(),
                tool_count = self.tools.len(),
                "Agent turn starting"
            );

            let mut request = serde_json::json!({
                "model": self.model,
                "messages": messages,
            });
            if !tool_defs.is_empty() {
                request["tools"] = serde_json::Value::Array(tool_defs.clone());
                request["tool_choice"] = serde_json::json!("auto");
            }
            if let Some(temperature) = self.temperature {
                request["temperature"] = serde_json::json!(temperature);
            }

            let response = self.post_chat(&request).await?;

            let message = response
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .ok_or_else(|| ClientError::Parse("no message in response".into()))?;

            let tool_calls = message
                .get("tool_calls")
                .and_then(|tc| tc.as_array())
                .cloned()
                .unwrap_or_default();

            if tool_calls.is_empty() {
                let content = message
                    .get("content")
                    .and_then(|c| c.as_str())
                    .unwrap_or("")
                    .to_string();

                info!(
                    turns,
                    tool_calls_total = tool_calls_made.len(),
                    response_len = content.len(),
                    "Agent finished"
                );

                return Ok(AgentResponse {
                    content,
                    tool_calls_made,
                    turns,
                });
            }

            // The assistant message carrying the calls must precede the
            // tool results in the history.
            messages.push(message.clone());

            for value in &tool_calls {
                let Some(call) = ToolCall::from_openai_value(value) else {
                    warn!("Unparsable tool call entry: {:?}", value);
                    continue;
                };

                info!(tool = %call.name, id = %call.id, "Executing tool call");
                tool_calls_made.push(call.name.clone());

                let result = self.run_tool(&call).await;
                debug!(
                    tool = %call.name,
                    result_preview = truncate_to_char_boundary(&result, 200),
                    "Tool call finished"
                );

                messages.push(serde_json::json!({
                    "role": "tool",
                    "tool_call_id": call.id,
                    "content": result
                }));
            }
        }
    }

    /// Dispatch one tool call. Failures are reported back to the model as
    /// the tool result, not surfaced to the caller.
    async fn run_tool(&self, call: &ToolCall) -> String {
        let Some(tool) = self.tools.iter().find(|t| t.name() == call.name) else {
            warn!(tool = %call.name, "Model requested an unregistered tool");
            return format!("Error: unknown tool '{}'", call.name);
        };

        match tool.call_erased(&call.arguments).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                format!("Error executing tool: {}", e)
            }
        }
    }

    async fn post_chat(&self, request: &serde_json::Value) -> Result<serde_json::Value> {
        let response = reqwest::Client::new()
            .post(format!("{}/chat/completions", self.client.base_url()))
            .header("Authorization", format!("Bearer {}", self.client.api_key()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, JsonSchema)]
    struct AddArgs {
        a: i64,
        b: i64,
    }

    #[derive(Serialize)]
    struct AddOutput {
        sum: i64,
    }

    struct Adder;

    #[async_trait]
    impl Tool for Adder {
        const NAME: &'static str = "add";
        type Args = AddArgs;
        type Output = AddOutput;
        type Error = std::convert::Infallible;

        fn description(&self) -> &str {
            "Add two integers"
        }

        async fn call(&self, args: Self::Args) -> std::result::Result<Self::Output, Self::Error> {
            Ok(AddOutput {
                sum: args.a + args.b,
            })
        }
    }

    #[test]
    fn test_builder_collects_tools() {
        let client = ChatClient::new("test-key");
        let agent = client
            .agent("gpt-4o")
            .system("You are a calculator")
            .tool(Adder)
            .tool_dyn(Box::new(Adder))
            .max_turns(3)
            .build();

        assert_eq!(agent.tools.len(), 2);
        assert_eq!(agent.tools[0].name(), "add");
        assert_eq!(agent.max_turns, 3);
    }

    #[tokio::test]
    async fn test_run_tool_reports_unknown_tool() {
        let client = ChatClient::new("test-key");
        let agent = client.agent("gpt-4o").tool(Adder).build();

        let result = agent
            .run_tool(&ToolCall {
                id: "call_1".into(),
                name: "subtract".into(),
                arguments: "{}".into(),
            })
            .await;

        assert!(result.contains("unknown tool"));
    }
}
