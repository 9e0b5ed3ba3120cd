//! Completion-backed event recommendations.

use std::collections::HashMap;
use std::sync::Arc;

use chat_client::Message;
use chrono::{Duration, Utc};
use importer::Completion;
use tracing::warn;
use uuid::Uuid;

use crate::models::Event;
use crate::repository::{EventRepository, RepositoryResult};

/// How far ahead an event may lie to be recommendable.
const WINDOW_DAYS: i64 = 30;

const RECOMMEND_INSTRUCTION: &str = r#"You recommend music events to a fan of a given artist.
From the event listing in the latest user message, pick the events the fan is most likely to enjoy: the named artist first, then similar genres.
Respond with only a comma-separated list of the chosen event ids, nothing else."#;

/// Picks upcoming events for a fan of `artist`.
///
/// Whatever the model answers, the result is a subset of the events in
/// the forward window: ids outside it never survive selection.
pub struct EventRecommendations {
    completion: Arc<dyn Completion>,
    repository: Arc<dyn EventRepository>,
}

impl EventRecommendations {
    pub fn new(completion: Arc<dyn Completion>, repository: Arc<dyn EventRepository>) -> Self {
        Self {
            completion,
            repository,
        }
    }

    pub async fn recommend(&self, artist: &str) -> RepositoryResult<Vec<Event>> {
        let today = Utc::now().date_naive();
        let horizon = today + Duration::days(WINDOW_DAYS);

        let upcoming: Vec<Event> = self
            .repository
            .get_all()
            .await?
            .into_iter()
            .filter(|event| event.date >= today && event.date <= horizon)
            .collect();

        if upcoming.is_empty() {
            return Ok(Vec::new());
        }

        let listing = upcoming
            .iter()
            .map(describe)
            .collect::<Vec<_>>()
            .join("\n");
        let messages = vec![
            Message::system(RECOMMEND_INSTRUCTION),
            Message::user(format!(
                "The fan follows: {artist}\n\nUpcoming events:\n{listing}"
            )),
        ];

        let response = match self.completion.complete(messages, Vec::new()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(artist, error = %e, "Recommendation call failed; returning no recommendations");
                return Ok(Vec::new());
            }
        };

        Ok(select_by_ids(upcoming, &response))
    }
}

fn describe(event: &Event) -> String {
    format!(
        "{} | {} | artist: {} | genre: {} | {} | {}",
        event.event_id,
        event.name,
        event.artist.name,
        event.artist.genre.as_deref().unwrap_or("unknown"),
        event.date,
        event.venue,
    )
}

/// Keep only candidates whose ids appear in the model's comma-separated
/// answer. Junk tokens, unknown ids, and repeats are dropped; order of
/// first mention is preserved.
fn select_by_ids(candidates: Vec<Event>, response: &str) -> Vec<Event> {
    let mut by_id: HashMap<Uuid, Event> = candidates
        .into_iter()
        .map(|event| (event.event_id, event))
        .collect();

    let mut selected = Vec::new();
    for token in response.split(',') {
        if let Ok(id) = Uuid::parse_str(token.trim()) {
            if let Some(event) = by_id.remove(&id) {
                selected.push(event);
            }
        }
    }
    selected
}
