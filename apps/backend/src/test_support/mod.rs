//! In-process test fixtures: a fully wired service graph over the memory
//! adapters, with a broadcaster that records instead of publishing.
//!
//! Shared by unit tests and the integration suites under `tests/`.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::adapters::{MemCatalogRepo, MemPlayerRepo, MemRoomRepo};
use crate::domain::catalog::{CategoryItem, ImpostorWord};
use crate::domain::events::RoomEvent;
use crate::errors::domain::DomainError;
use crate::services::{CatalogService, RoomService, RoundService, VotingService};
use crate::state::room_locks::RoomLocks;
use crate::ws::Broadcaster;

/// Broadcast port double: records every published event in order.
#[derive(Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<(String, String)>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(room_code, event_text)` pairs published so far.
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().clone()
    }

    /// Event texts published to one room, in publish order.
    pub fn events_for(&self, room_code: &str) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|(code, _)| code == room_code)
            .map(|(_, event)| event.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn publish(&self, room_code: &str, event: &RoomEvent) {
        self.events
            .lock()
            .push((room_code.to_string(), event.to_string()));
    }
}

/// A wired backend over memory adapters and a recording broadcaster.
pub struct TestBackend {
    pub rooms: RoomService,
    pub rounds: RoundService,
    pub voting: VotingService,
    pub catalog: CatalogService,
    pub rooms_repo: Arc<MemRoomRepo>,
    pub players_repo: Arc<MemPlayerRepo>,
    pub catalog_repo: Arc<MemCatalogRepo>,
    pub broadcaster: Arc<RecordingBroadcaster>,
}

impl TestBackend {
    pub fn new() -> Self {
        let rooms_repo = Arc::new(MemRoomRepo::new());
        let players_repo = Arc::new(MemPlayerRepo::new());
        let catalog_repo = Arc::new(MemCatalogRepo::new());
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let locks = Arc::new(RoomLocks::new());

        Self {
            rooms: RoomService::new(
                rooms_repo.clone(),
                players_repo.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            rounds: RoundService::new(
                rooms_repo.clone(),
                players_repo.clone(),
                catalog_repo.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            voting: VotingService::new(
                rooms_repo.clone(),
                players_repo.clone(),
                catalog_repo.clone(),
                broadcaster.clone(),
                locks,
            ),
            catalog: CatalogService::new(catalog_repo.clone()),
            rooms_repo,
            players_repo,
            catalog_repo,
            broadcaster,
        }
    }

    /// Seed `count` items into `pack`.
    pub async fn seed_pack(&self, pack: &str, count: usize) -> Result<(), DomainError> {
        use crate::repos::CatalogRepo;
        for i in 0..count {
            let item = CategoryItem::new(format!("item-{i}"), pack);
            self.catalog_repo.save_item(&item).await?;
        }
        Ok(())
    }

    /// Seed impostor words, one per `(category, word, hint)` triple.
    pub async fn seed_words(
        &self,
        words: &[(&str, &str, &str)],
    ) -> Result<(), DomainError> {
        use crate::repos::CatalogRepo;
        for (category, word, hint) in words {
            let entry = ImpostorWord::new(*category, *word, *hint);
            self.catalog_repo.save_impostor_word(&entry).await?;
        }
        Ok(())
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}
