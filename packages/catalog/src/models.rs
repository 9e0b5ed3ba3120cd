//! Catalog domain model.

use chrono::NaiveDate;
use importer::{Artist, CreateEventRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted music event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: Uuid,
    pub name: String,
    pub price: i64,
    pub artist: Artist,
    pub date: NaiveDate,
    pub description: String,
    pub image_url: Option<String>,
    pub venue: String,
}

impl From<CreateEventRequest> for Event {
    fn from(request: CreateEventRequest) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            name: request.name,
            price: request.price,
            artist: request.artist,
            date: request.date,
            description: request.description,
            image_url: request.image_url,
            venue: request.venue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_request_assigns_identity() {
        let request = CreateEventRequest {
            name: "Blue Notes".into(),
            price: 45,
            artist: Artist {
                id: Uuid::new_v4(),
                name: "Artist B".into(),
                genre: Some("jazz".into()),
            },
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            description: "an evening of jazz".into(),
            image_url: None,
            venue: "Venue B".into(),
        };
        let artist_id = request.artist.id;

        let event = Event::from(request);

        assert!(!event.event_id.is_nil());
        assert_eq!(event.artist.id, artist_id);
        assert_eq!(event.price, 45);
    }
}
