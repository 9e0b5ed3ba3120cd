//! Music event catalog: domain model, storage seam, completion-backed
//! recommendations, and the HTTP API.
//!
//! The import pipeline (the `importer` crate) produces
//! `CreateEventRequest` values; this crate is where they land. Storage is
//! behind [`repository::EventRepository`], so any backend can be swapped
//! in; the in-tree implementation is an in-memory store.

pub mod config;
pub mod models;
pub mod recommendations;
pub mod repository;
pub mod server;

pub use config::Config;
pub use models::Event;
pub use recommendations::EventRecommendations;
pub use repository::{EventRepository, MemoryEventRepository, RepositoryError};
