//! Drives segmentation, extraction, and validation as a lazy stream.

use std::sync::Arc;

use async_stream::stream;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tracing::{info, warn};

use chat_client::truncate_to_char_boundary;

use crate::completion::Completion;
use crate::extractor::extract_event;
use crate::mapper::map_candidate;
use crate::segmenter::split_document;
use crate::types::CreateEventRequest;

/// Tuning knobs for a parse run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Maximum concurrent extraction calls.
    pub concurrency: usize,

    /// Emit results in segment order instead of completion order.
    pub ordered: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            ordered: false,
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction fan-out width.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Preserve segment order on output. Costs head-of-line waiting: a
    /// slow early segment holds back finished later ones.
    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }
}

/// The import pipeline: one segmentation call, a bounded fan-out of
/// extraction calls, validation of everything that comes back.
pub struct ImportPipeline {
    completion: Arc<dyn Completion>,
    config: ImportConfig,
}

impl ImportPipeline {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self {
            completion,
            config: ImportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a document into a stream of creation requests.
    ///
    /// The stream is lazy and single-pass: nothing runs until it is
    /// polled, and each request is yielded as soon as its extraction
    /// completes. Output order therefore only follows segment order when
    /// [`ImportConfig::ordered`] is set. A segment whose extraction or
    /// validation fails is logged with its 1-based index and skipped;
    /// sibling segments are unaffected.
    pub fn parse<'a>(
        &'a self,
        document: &'a str,
    ) -> impl Stream<Item = CreateEventRequest> + 'a {
        stream! {
            let segments = split_document(self.completion.as_ref(), document).await;

            if !segments.is_empty() {
                info!(segments = segments.len(), "Document split into segments");

                let completion = &self.completion;
                let extractions =
                    segments.into_iter().enumerate().map(|(i, segment)| async move {
                        let outcome = extract_event(completion.as_ref(), &segment).await;
                        (i + 1, segment, outcome)
                    });

                let mut results: BoxStream<'_, _> = if self.config.ordered {
                    Box::pin(stream::iter(extractions).buffered(self.config.concurrency))
                } else {
                    Box::pin(stream::iter(extractions).buffer_unordered(self.config.concurrency))
                };

                while let Some((index, segment, outcome)) = results.next().await {
                    let candidate = match outcome {
                        Ok(candidate) => candidate,
                        Err(e) => {
                            warn!(
                                segment = index,
                                snippet = truncate_to_char_boundary(&segment, 80),
                                error = %e,
                                "Extraction failed; skipping segment"
                            );
                            continue;
                        }
                    };

                    match map_candidate(candidate) {
                        Ok(request) => yield request,
                        Err(e) => {
                            warn!(
                                segment = index,
                                snippet = truncate_to_char_boundary(&segment, 80),
                                error = %e,
                                "Candidate rejected; skipping segment"
                            );
                        }
                    }
                }
            }
        }
    }
}
