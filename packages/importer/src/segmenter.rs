//! Splits a raw document into per-event text segments.

use chat_client::{strip_code_blocks, Message};
use tracing::warn;

use crate::completion::Completion;
use crate::prompts;

/// Split `document` into self-contained blocks, one per event.
///
/// Fails open: a transport error or a response that is not a JSON array
/// of strings degrades to an empty list with a warning, so a bad split
/// never aborts the import. An empty document yields an empty list
/// without a completion call.
pub async fn split_document(completion: &dyn Completion, document: &str) -> Vec<String> {
    if document.trim().is_empty() {
        return Vec::new();
    }

    let messages = vec![
        Message::system(prompts::SPLIT_INSTRUCTION),
        Message::user(prompts::WORKED_EXAMPLE_EVENT),
        Message::assistant(prompts::SPLIT_EXAMPLE_OUTPUT),
        Message::user(document),
    ];

    let response = match completion.complete(messages, Vec::new()).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Segmentation call failed; treating document as empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(strip_code_blocks(&response)) {
        Ok(segments) => segments
            .into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .collect(),
        Err(e) => {
            warn!(
                error = %e,
                response_len = response.len(),
                "Segmentation response was not a JSON array of strings; treating document as empty"
            );
            Vec::new()
        }
    }
}
