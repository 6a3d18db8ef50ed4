//! Realtime broadcast: the broadcast port and its WebSocket implementation.

pub mod hub;
pub mod session;

use crate::domain::events::RoomEvent;

/// Broadcast port. Publication is fire-and-forget and best-effort: events
/// are not acknowledged and are not ordered with respect to persistence.
pub trait Broadcaster: Send + Sync {
    fn publish(&self, room_code: &str, event: &RoomEvent);
}

pub use hub::RoomChannelRegistry;
