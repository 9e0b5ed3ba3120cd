//! Records flowing through the import pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unvalidated extraction output for one segment.
///
/// Every field is optional here: the model may omit or null any of them,
/// and required-field judgment belongs to the validator, not to serde.
/// The date stays a raw string so a malformed one is a validation
/// rejection rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateRecord {
    #[serde(default)]
    pub artist: CandidateArtist,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub venue: Option<String>,

    /// Calendar date as written by the model, expected `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Whole US dollars.
    #[serde(default)]
    pub price: Option<i64>,
}

/// Artist fields as extracted, before identity assignment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateArtist {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,
}

/// An artist with assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub genre: Option<String>,
}

/// The write shape the event catalog accepts.
///
/// Immutable once produced; `image_url` is always `None` for imported
/// events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub price: i64,
    pub artist: Artist,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub venue: String,
}

impl CreateEventRequest {
    /// Required-field check, applied again at the API boundary.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.venue.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.artist.name.trim().is_empty()
            && self.price >= 0
    }
}
