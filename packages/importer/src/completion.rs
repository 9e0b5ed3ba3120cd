//! The completion seam the pipeline talks through.
//!
//! Everything model-facing goes through [`Completion`] so any backend -
//! or a canned mock in tests - can stand in for the real service.

use async_trait::async_trait;
use chat_client::{ChatClient, ChatRequest, ErasedTool, Message};

use crate::error::ImportError;

/// A chat completion capability: a multi-turn conversation in, final text
/// out, with `tools` available for automatic invocation along the way.
///
/// Implementations must fold tool results back into the same completion
/// turn; the caller only ever sees the final text.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Vec<Box<dyn ErasedTool>>,
    ) -> Result<String, ImportError>;
}

/// Production backend for an OpenAI-compatible endpoint.
pub struct OpenAiCompletion {
    client: ChatClient,
    model: String,
}

impl OpenAiCompletion {
    pub fn new(client: ChatClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Completion for OpenAiCompletion {
    async fn complete(
        &self,
        messages: Vec<Message>,
        tools: Vec<Box<dyn ErasedTool>>,
    ) -> Result<String, ImportError> {
        // Tool-less conversations skip the agent loop entirely.
        if tools.is_empty() {
            let mut request = ChatRequest::new(&self.model);
            for message in messages {
                request = request.message(message);
            }
            let response = self
                .client
                .chat_completion(request)
                .await
                .map_err(|e| ImportError::Completion(Box::new(e)))?;
            return Ok(response.content);
        }

        let mut builder = self.client.agent(&self.model);
        for tool in tools {
            builder = builder.tool_dyn(tool);
        }
        let response = builder
            .build()
            .chat_with_history(messages)
            .await
            .map_err(|e| ImportError::Completion(Box::new(e)))?;
        Ok(response.content)
    }
}
