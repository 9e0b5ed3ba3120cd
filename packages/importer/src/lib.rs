//! Event file import pipeline.
//!
//! Turns a free-form text file describing music events into validated
//! [`CreateEventRequest`] values, in three steps:
//!
//! 1. **Segmentation** - one completion call splits the document into
//!    per-event blocks without losing any source text.
//! 2. **Extraction** - one completion call per block produces a candidate
//!    record; a currency-conversion tool is available to the model for
//!    non-dollar prices.
//! 3. **Validation** - candidates missing required fields are rejected,
//!    the rest become creation requests with freshly minted artist ids.
//!
//! The pipeline is lazy and failure-isolating: a bad split degrades to
//! zero events, a bad segment is logged and skipped, and nothing short of
//! a missing API key aborts a run. See [`ImportPipeline`].

pub mod completion;
pub mod currency;
pub mod error;
pub mod extractor;
pub mod mapper;
pub mod pipeline;
mod prompts;
pub mod segmenter;
pub mod testing;
pub mod types;

pub use completion::{Completion, OpenAiCompletion};
pub use currency::{convert_to_dollars, ConvertCurrencyTool};
pub use error::{ImportError, Result, ValidationError};
pub use pipeline::{ImportConfig, ImportPipeline};
pub use types::{Artist, CandidateArtist, CandidateRecord, CreateEventRequest};
