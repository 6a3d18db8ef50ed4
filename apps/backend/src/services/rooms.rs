//! Room registry: creation, admission and lookup.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::events::RoomEvent;
use crate::domain::player::Player;
use crate::domain::room::{GameConfig, Room, RoomStatus};
use crate::errors::domain::{ConflictKind, DomainError, InvalidStateKind};
use crate::repos::rooms::require_room_by_code;
use crate::repos::{PlayerRepo, RoomRepo};
use crate::state::room_locks::RoomLocks;
use crate::utils::room_code::generate_room_code;
use crate::ws::Broadcaster;

/// A random 4-character code collides often enough at scale that allocation
/// retries against the store; past this many attempts the code space is
/// effectively saturated and we give up.
const MAX_CODE_ATTEMPTS: usize = 64;

#[derive(Clone)]
pub struct RoomService {
    rooms: Arc<dyn RoomRepo>,
    players: Arc<dyn PlayerRepo>,
    broadcaster: Arc<dyn Broadcaster>,
    locks: Arc<RoomLocks>,
}

impl RoomService {
    pub fn new(
        rooms: Arc<dyn RoomRepo>,
        players: Arc<dyn PlayerRepo>,
        broadcaster: Arc<dyn Broadcaster>,
        locks: Arc<RoomLocks>,
    ) -> Self {
        Self {
            rooms,
            players,
            broadcaster,
            locks,
        }
    }

    /// Create a room in WAITING with the host as its first player.
    pub async fn create_room(
        &self,
        host_name: &str,
        config: GameConfig,
    ) -> Result<(Room, Player), DomainError> {
        let host_name = host_name.trim();
        if host_name.is_empty() {
            return Err(DomainError::validation("player name must not be empty"));
        }

        let code = self.allocate_code().await?;
        let room = Room::new(code, config);
        self.rooms.save_room(&room).await?;

        let host = Player::new(room.id, host_name.to_string(), true, 0);
        self.players.save_player(&host).await?;

        info!(room = %room.code, game_type = %room.game_type(), "room created");
        Ok((room, host))
    }

    async fn allocate_code(&self) -> Result<String, DomainError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = {
                let mut rng = StdRng::from_os_rng();
                generate_room_code(&mut rng)
            };
            if self.rooms.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }
        Err(DomainError::conflict(
            ConflictKind::RoomCodeExhausted,
            "could not allocate an unused room code",
        ))
    }

    /// Admit a player into a WAITING room.
    pub async fn join_room(&self, code: &str, name: &str) -> Result<Player, DomainError> {
        let code = code.trim().to_uppercase();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("player name must not be empty"));
        }

        let _guard = self.locks.acquire(&code).await;
        let room = require_room_by_code(self.rooms.as_ref(), &code).await?;
        if room.status != RoomStatus::Waiting {
            return Err(DomainError::invalid_state(
                InvalidStateKind::RoomNotWaiting,
                "game already started",
            ));
        }

        let players = self.players.find_by_room(room.id).await?;
        let lowered = name.to_lowercase();
        if players.iter().any(|p| p.name.to_lowercase() == lowered) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateName,
                "name already in use in this room",
            ));
        }

        let player = Player::new(room.id, name.to_string(), false, players.len() as u32);
        self.players.save_player(&player).await?;
        self.broadcaster.publish(&room.code, &RoomEvent::PlayerJoined);
        Ok(player)
    }

    pub async fn get_room(&self, code: &str) -> Result<Room, DomainError> {
        require_room_by_code(self.rooms.as_ref(), &code.trim().to_uppercase()).await
    }

    /// Players of a room in join order (host first).
    pub async fn get_players(&self, code: &str) -> Result<Vec<Player>, DomainError> {
        let room = self.get_room(code).await?;
        self.players.find_by_room(room.id).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, DomainError> {
        self.rooms.list_rooms().await
    }

    /// Delete a room and its players. Unknown codes are a no-op.
    pub async fn delete_room(&self, code: &str) -> Result<(), DomainError> {
        let code = code.trim().to_uppercase();
        {
            let _guard = self.locks.acquire(&code).await;
            if let Some(room) = self.rooms.find_by_code(&code).await? {
                self.players.delete_by_room(room.id).await?;
                self.rooms.delete_room(&code).await?;
                info!(room = %code, "room deleted");
            }
        }
        self.locks.forget(&code);
        Ok(())
    }
}
