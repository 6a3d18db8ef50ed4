//! Room persistence port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::room::Room;
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait RoomRepo: Send + Sync {
    /// Insert or fully overwrite a room. Callers hold the room's write lock,
    /// so an overwrite is atomic from any other reader's point of view.
    async fn save_room(&self, room: &Room) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Room>, DomainError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Room>, DomainError>;

    async fn list_rooms(&self) -> Result<Vec<Room>, DomainError>;

    /// Delete by code. Deleting an unknown code is a no-op.
    async fn delete_room(&self, code: &str) -> Result<(), DomainError>;
}

/// Find a room by code or return the canonical not-found error.
pub async fn require_room_by_code(repo: &dyn RoomRepo, code: &str) -> Result<Room, DomainError> {
    repo.find_by_code(code).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Room, format!("room with code {code} not found"))
    })
}

/// Find a room by id or return the canonical not-found error.
pub async fn require_room(repo: &dyn RoomRepo, id: Uuid) -> Result<Room, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Room, format!("room {id} not found")))
}
