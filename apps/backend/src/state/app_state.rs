//! Application state: the wired service graph shared by every worker.

use std::sync::Arc;

use crate::adapters::{MemCatalogRepo, MemPlayerRepo, MemRoomRepo};
use crate::repos::{CatalogRepo, PlayerRepo, RoomRepo};
use crate::services::{CatalogService, RoomService, RoundService, VotingService};
use crate::state::room_locks::RoomLocks;
use crate::ws::{Broadcaster, RoomChannelRegistry};

#[derive(Clone)]
pub struct AppState {
    pub rooms: RoomService,
    pub rounds: RoundService,
    pub voting: VotingService,
    pub catalog: CatalogService,
    /// WebSocket session registry; also the production `Broadcaster`.
    pub channels: Arc<RoomChannelRegistry>,
}

impl AppState {
    /// Wire the service graph over explicit ports.
    pub fn new(
        rooms: Arc<dyn RoomRepo>,
        players: Arc<dyn PlayerRepo>,
        catalog: Arc<dyn CatalogRepo>,
        broadcaster: Arc<dyn Broadcaster>,
        channels: Arc<RoomChannelRegistry>,
    ) -> Self {
        let locks = Arc::new(RoomLocks::new());
        Self {
            rooms: RoomService::new(
                rooms.clone(),
                players.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            rounds: RoundService::new(
                rooms.clone(),
                players.clone(),
                catalog.clone(),
                broadcaster.clone(),
                locks.clone(),
            ),
            voting: VotingService::new(rooms, players, catalog.clone(), broadcaster, locks),
            catalog: CatalogService::new(catalog),
            channels,
        }
    }

    /// Production wiring: in-process stores and the WebSocket registry as
    /// the broadcaster.
    pub fn in_memory() -> Self {
        let channels = Arc::new(RoomChannelRegistry::new());
        let broadcaster: Arc<dyn Broadcaster> = channels.clone();
        Self::new(
            Arc::new(MemRoomRepo::new()),
            Arc::new(MemPlayerRepo::new()),
            Arc::new(MemCatalogRepo::new()),
            broadcaster,
            channels,
        )
    }
}
