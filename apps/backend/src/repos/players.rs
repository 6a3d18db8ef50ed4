//! Player persistence port. Players are owned by their room and are removed
//! only when the room is deleted.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::player::Player;
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait PlayerRepo: Send + Sync {
    /// Insert or fully overwrite a player.
    async fn save_player(&self, player: &Player) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>, DomainError>;

    /// All players of a room, ordered by join order (host first).
    async fn find_by_room(&self, room_id: Uuid) -> Result<Vec<Player>, DomainError>;

    /// Remove every player belonging to the room (room deletion cascade).
    async fn delete_by_room(&self, room_id: Uuid) -> Result<(), DomainError>;
}

/// Find a player by id or return a not-found error tagged with `kind` so the
/// caller can distinguish target/requester/voter lookups.
pub async fn require_player(
    repo: &dyn PlayerRepo,
    id: Uuid,
    kind: NotFoundKind,
) -> Result<Player, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(kind, format!("player {id} not found")))
}
