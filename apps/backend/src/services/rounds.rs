//! Round orchestration: start and reset.
//!
//! Reset is not a separate code path: "play again" re-runs the same
//! assignment algorithm in place, which also clears any stale voting state.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::assignment;
use crate::domain::catalog::{DEFAULT_PACK, RANDOM_CATEGORY};
use crate::domain::events::RoomEvent;
use crate::domain::room::{GameConfig, GameType};
use crate::errors::domain::{ContentKind, DomainError};
use crate::repos::rooms::require_room_by_code;
use crate::repos::{CatalogRepo, PlayerRepo, RoomRepo};
use crate::state::room_locks::RoomLocks;
use crate::ws::Broadcaster;

#[derive(Clone)]
pub struct RoundService {
    rooms: Arc<dyn RoomRepo>,
    players: Arc<dyn PlayerRepo>,
    catalog: Arc<dyn CatalogRepo>,
    broadcaster: Arc<dyn Broadcaster>,
    locks: Arc<RoomLocks>,
}

impl RoundService {
    pub fn new(
        rooms: Arc<dyn RoomRepo>,
        players: Arc<dyn PlayerRepo>,
        catalog: Arc<dyn CatalogRepo>,
        broadcaster: Arc<dyn Broadcaster>,
        locks: Arc<RoomLocks>,
    ) -> Self {
        Self {
            rooms,
            players,
            catalog,
            broadcaster,
            locks,
        }
    }

    /// Start the room's first round: WAITING -> IN_GAME.
    pub async fn start_round(&self, code: &str) -> Result<(), DomainError> {
        self.run_assignment(code).await
    }

    /// Re-run assignment for "play again". Also the only way to leave
    /// FINISHED, and the only thing that clears a stalled vote.
    pub async fn reset_round(&self, code: &str) -> Result<(), DomainError> {
        self.run_assignment(code).await
    }

    async fn run_assignment(&self, code: &str) -> Result<(), DomainError> {
        let code = code.trim().to_uppercase();
        let _guard = self.locks.acquire(&code).await;

        let mut room = require_room_by_code(self.rooms.as_ref(), &code).await?;
        let mut players = self.players.find_by_room(room.id).await?;

        match room.game_type() {
            GameType::GuessWho => {
                let pack = room.selected_pack().unwrap_or(DEFAULT_PACK).to_string();
                let pool = self.catalog.find_by_pack(&pack).await?;
                let mut rng = StdRng::from_os_rng();
                assignment::assign_guess_who(&mut room, &mut players, &pool, &mut rng)?;
            }
            GameType::Impostor => {
                let words = self.candidate_words(&room.config).await?;
                let mut rng = StdRng::from_os_rng();
                assignment::assign_impostor(&mut room, &mut players, &words, &mut rng)?;
            }
        }

        for player in &players {
            self.players.save_player(player).await?;
        }
        self.rooms.save_room(&room).await?;

        info!(room = %room.code, game_type = %room.game_type(), "round assigned");
        self.broadcaster.publish(&room.code, &RoomEvent::GameStarted);
        Ok(())
    }

    /// Candidate words for an Impostor round. A category preference narrows
    /// the pool through the port, but is ignored when it matches nothing;
    /// an entirely empty word catalog is an error either way.
    async fn candidate_words(
        &self,
        config: &GameConfig,
    ) -> Result<Vec<crate::domain::catalog::ImpostorWord>, DomainError> {
        let all = self.catalog.all_impostor_words().await?;
        if all.is_empty() {
            return Err(DomainError::insufficient_content(
                ContentKind::NoWordsConfigured,
                "no words configured for the impostor game",
            ));
        }

        if let GameConfig::Impostor {
            category_preference: Some(pref),
            ..
        } = config
        {
            if pref.as_str() != RANDOM_CATEGORY {
                let filtered = self.catalog.impostor_words_by_category(pref).await?;
                if !filtered.is_empty() {
                    return Ok(filtered);
                }
            }
        }
        Ok(all)
    }
}
