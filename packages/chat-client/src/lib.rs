//! Minimal client for OpenAI-compatible chat completion APIs.
//!
//! Two ways in:
//!
//! - [`ChatClient::chat_completion`] for a plain conversation-in, text-out
//!   call.
//! - [`ChatClient::agent`] for conversations where the model may call
//!   registered [`Tool`]s; the agent loop executes requested tools and
//!   folds their results back into the same completion turn until the
//!   model produces final text.
//!
//! # Example
//!
//! ```rust,ignore
//! use chat_client::{ChatClient, ChatRequest, Message};
//!
//! let client = ChatClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-4o").message(Message::user("Hello!")),
//!     )
//!     .await?;
//!
//! let answer = client
//!     .agent("gpt-4o")
//!     .system("You are a unit converter")
//!     .tool(ConvertMiles)
//!     .build()
//!     .chat("How many km is 26.2 miles?")
//!     .await?;
//! ```

pub mod agent;
pub mod error;
pub mod tool;
pub mod types;

pub use agent::{Agent, AgentBuilder, AgentResponse};
pub use error::{ClientError, Result};
pub use tool::{ErasedTool, Tool, ToolCall, ToolDefinition, ToolError};
pub use types::{
    strip_code_blocks, truncate_to_char_boundary, ChatRequest, ChatResponse, Message, Usage,
};

use reqwest::Client;
use tracing::{debug, warn};

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    /// Create a client with the given API key, pointed at api.openai.com.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ClientError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different base URL (Azure, proxies, local
    /// gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start building an agent that completes with the given model.
    pub fn agent(&self, model: impl Into<String>) -> AgentBuilder<'_> {
        AgentBuilder::new(self, model)
    }

    /// Plain chat completion: send the conversation, return the final text.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Chat completion request failed");
                ClientError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Chat completion API error");
            return Err(ClientError::Api(error_text));
        }

        let raw: types::RawResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClientError::Api("response carried no choices".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion finished"
        );

        Ok(ChatResponse {
            content,
            usage: raw.usage,
        })
    }
}
