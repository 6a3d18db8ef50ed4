//! Room channel registry: fans a room's events out to every connected
//! WebSocket session subscribed to that room's code.

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::events::RoomEvent;
use crate::ws::Broadcaster;

/// One broadcast text frame, already encoded for the wire.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct RoomBroadcast(pub String);

#[derive(Default)]
pub struct RoomChannelRegistry {
    sessions: DashMap<String, DashMap<Uuid, Recipient<RoomBroadcast>>>,
}

impl RoomChannelRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, room_code: &str, recipient: Recipient<RoomBroadcast>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self
            .sessions
            .entry(room_code.to_string())
            .or_default();
        entry.insert(token, recipient);
        token
    }

    pub fn unregister(&self, room_code: &str, token: Uuid) {
        if let Some(entry) = self.sessions.get(room_code) {
            entry.remove(&token);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove(room_code);
            }
        }
    }

    pub fn broadcast(&self, room_code: &str, message: RoomBroadcast) {
        if let Some(entry) = self.sessions.get(room_code) {
            for recipient in entry.iter() {
                let _ = recipient.value().do_send(message.clone());
            }
        }
    }
}

impl Broadcaster for RoomChannelRegistry {
    fn publish(&self, room_code: &str, event: &RoomEvent) {
        let text = event.to_string();
        debug!(room = room_code, event = %text, "broadcasting room event");
        self.broadcast(room_code, RoomBroadcast(text));
    }
}
