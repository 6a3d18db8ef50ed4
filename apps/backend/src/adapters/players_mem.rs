//! In-memory player store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::player::Player;
use crate::errors::domain::DomainError;
use crate::repos::players::PlayerRepo;

#[derive(Default)]
pub struct MemPlayerRepo {
    players: RwLock<HashMap<Uuid, Player>>,
}

impl MemPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerRepo for MemPlayerRepo {
    async fn save_player(&self, player: &Player) -> Result<(), DomainError> {
        self.players.write().insert(player.id, player.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>, DomainError> {
        Ok(self.players.read().get(&id).cloned())
    }

    async fn find_by_room(&self, room_id: Uuid) -> Result<Vec<Player>, DomainError> {
        let mut players: Vec<Player> = self
            .players
            .read()
            .values()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.join_order);
        Ok(players)
    }

    async fn delete_by_room(&self, room_id: Uuid) -> Result<(), DomainError> {
        self.players.write().retain(|_, p| p.room_id != room_id);
        Ok(())
    }
}
