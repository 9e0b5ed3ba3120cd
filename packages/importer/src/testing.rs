//! Mock completion backend for tests.
//!
//! Lets the pipeline run without a network: canned responses, failure
//! injection, and call recording for assertions.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chat_client::{truncate_to_char_boundary, ErasedTool, Message};

use crate::completion::Completion;
use crate::error::ImportError;

struct Rule {
    needle: String,
    outcome: Result<String, String>,
}

/// Canned-response completion backend.
///
/// Rules are matched in insertion order against the *last user message*
/// of each conversation; the first rule whose needle is a substring of
/// that message wins. Unmatched calls return an error so a test fails
/// loudly instead of silently producing empty output.
///
/// Clones share state, so a test can keep a handle for assertions while
/// the pipeline owns another.
#[derive(Clone, Default)]
pub struct MockCompletion {
    rules: Arc<RwLock<Vec<Rule>>>,
    calls: Arc<RwLock<Vec<Vec<Message>>>>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with `response` when the last user message contains
    /// `needle`.
    pub fn with_response(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.write().unwrap().push(Rule {
            needle: needle.into(),
            outcome: Ok(response.into()),
        });
        self
    }

    /// Fail the call when the last user message contains `needle`.
    pub fn with_failure(self, needle: impl Into<String>, reason: impl Into<String>) -> Self {
        self.rules.write().unwrap().push(Rule {
            needle: needle.into(),
            outcome: Err(reason.into()),
        });
        self
    }

    /// Every conversation this mock has been asked to complete.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Completion for MockCompletion {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _tools: Vec<Box<dyn ErasedTool>>,
    ) -> Result<String, ImportError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.calls.write().unwrap().push(messages);

        let rules = self.rules.read().unwrap();
        match rules.iter().find(|r| last_user.contains(&r.needle)) {
            Some(rule) => match &rule.outcome {
                Ok(response) => Ok(response.clone()),
                Err(reason) => Err(ImportError::Completion(reason.clone().into())),
            },
            None => Err(ImportError::Completion(
                format!(
                    "no canned response matches: {}",
                    truncate_to_char_boundary(&last_user, 120)
                )
                .into(),
            )),
        }
    }
}
