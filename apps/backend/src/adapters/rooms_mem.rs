//! In-memory room store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::room::Room;
use crate::errors::domain::DomainError;
use crate::repos::rooms::RoomRepo;

/// Rooms keyed by id, with a code index for join-by-code lookups.
#[derive(Default)]
pub struct MemRoomRepo {
    rooms: RwLock<HashMap<Uuid, Room>>,
    by_code: RwLock<HashMap<String, Uuid>>,
}

impl MemRoomRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepo for MemRoomRepo {
    async fn save_room(&self, room: &Room) -> Result<(), DomainError> {
        self.by_code.write().insert(room.code.clone(), room.id);
        self.rooms.write().insert(room.id, room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError> {
        Ok(self.rooms.read().get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Room>, DomainError> {
        let id = match self.by_code.read().get(code) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.rooms.read().get(&id).cloned())
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, DomainError> {
        let mut rooms: Vec<Room> = self.rooms.read().values().cloned().collect();
        rooms.sort_by_key(|r| r.created_at);
        Ok(rooms)
    }

    async fn delete_room(&self, code: &str) -> Result<(), DomainError> {
        if let Some(id) = self.by_code.write().remove(code) {
            self.rooms.write().remove(&id);
        }
        Ok(())
    }
}
