//! Validates candidate records and maps them to creation requests.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::types::{Artist, CandidateRecord, CreateEventRequest};

fn required(field: Option<String>, name: &'static str) -> Result<String, ValidationError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField(name)),
    }
}

/// Map a candidate into a creation request, assigning the embedded artist
/// a freshly generated identity. Extraction never supplies ids, so every
/// mapped record gets its own - two segments naming the same artist yield
/// two distinct identities.
pub fn map_candidate(candidate: CandidateRecord) -> Result<CreateEventRequest, ValidationError> {
    let artist_name = required(candidate.artist.name, "artist.name")?;
    let name = required(candidate.name, "name")?;
    let venue = required(candidate.venue, "venue")?;
    let description = required(candidate.description, "description")?;

    let raw_date = candidate
        .date
        .ok_or(ValidationError::MissingField("date"))?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw_date))?;

    let price = candidate
        .price
        .ok_or(ValidationError::MissingField("price"))?;
    if price < 0 {
        return Err(ValidationError::NegativePrice(price));
    }

    Ok(CreateEventRequest {
        name,
        price,
        artist: Artist {
            id: Uuid::new_v4(),
            name: artist_name,
            genre: candidate.artist.genre,
        },
        date,
        description,
        image_url: None,
        venue,
    })
}
