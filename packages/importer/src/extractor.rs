//! Converts one event segment into a candidate record.

use chat_client::{strip_code_blocks, ErasedTool, Message};

use crate::completion::Completion;
use crate::currency::ConvertCurrencyTool;
use crate::error::{ImportError, Result};
use crate::prompts;
use crate::types::CandidateRecord;

/// Extract a structured candidate record from one segment.
///
/// The currency tool rides along on the call; when the model meets a
/// non-dollar amount it invokes the tool and the result is folded into
/// the same completion turn. Failures are returned to the caller: they
/// are per-segment, and the orchestrator decides what happens next.
pub async fn extract_event(
    completion: &dyn Completion,
    segment: &str,
) -> Result<CandidateRecord> {
    let messages = vec![
        Message::system(prompts::EXTRACT_INSTRUCTION),
        Message::user(prompts::WORKED_EXAMPLE_EVENT),
        Message::assistant(prompts::EXTRACT_EXAMPLE_OUTPUT),
        Message::user(segment),
    ];
    let tools: Vec<Box<dyn ErasedTool>> = vec![Box::new(ConvertCurrencyTool)];

    let response = completion.complete(messages, tools).await?;

    serde_json::from_str(strip_code_blocks(&response)).map_err(ImportError::Extraction)
}
