//! Event storage seam.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Event;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage operations the catalog needs from any backend.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn save(&self, event: Event) -> RepositoryResult<()>;

    async fn get_all(&self) -> RepositoryResult<Vec<Event>>;

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Event>>;
}

/// In-memory event storage.
///
/// Data is lost on restart; fine for development and tests.
#[derive(Default)]
pub struct MemoryEventRepository {
    events: RwLock<HashMap<Uuid, Event>>,
}

impl MemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().unwrap().len()
    }
}

#[async_trait]
impl EventRepository for MemoryEventRepository {
    async fn save(&self, event: Event) -> RepositoryResult<()> {
        self.events.write().unwrap().insert(event.event_id, event);
        Ok(())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Event>> {
        Ok(self.events.read().unwrap().values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<Event>> {
        Ok(self.events.read().unwrap().get(&id).cloned())
    }
}
