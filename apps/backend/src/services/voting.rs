//! Voting coordinator: accumulates ballots, closes votes at threshold,
//! applies outcomes and drives terminal win/loss transitions.
//!
//! Two protocols share the room's ledgers: the binary all-but-one majority
//! vote (guess validation, role-change approval) and the many-to-one
//! accusation vote (Impostor mode). Every mutation runs under the room's
//! write lock; broadcasts are fire-and-forget.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::assignment;
use crate::domain::events::{AccuseResult, RoomEvent};
use crate::domain::player::Player;
use crate::domain::room::{Room, RoomStatus, VoteKind};
use crate::domain::voting::{self, AccuseOutcome};
use crate::errors::domain::{DomainError, InvalidStateKind, NotFoundKind};
use crate::repos::players::require_player;
use crate::repos::rooms::{require_room, require_room_by_code};
use crate::repos::{CatalogRepo, PlayerRepo, RoomRepo};
use crate::state::room_locks::RoomLocks;
use crate::ws::Broadcaster;

#[derive(Clone)]
pub struct VotingService {
    rooms: Arc<dyn RoomRepo>,
    players: Arc<dyn PlayerRepo>,
    catalog: Arc<dyn CatalogRepo>,
    broadcaster: Arc<dyn Broadcaster>,
    locks: Arc<RoomLocks>,
}

impl VotingService {
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

    /// Store a guess pending validation and announce it so the room can
    /// start voting.
    pub async fn submit_guess(&self, player_id: Uuid, guess: &str) -> Result<(), DomainError> {
        let player = require_player(self.players.as_ref(), player_id, NotFoundKind::Player).await?;
        let room = require_room(self.rooms.as_ref(), player.room_id).await?;

        let _guard = self.locks.acquire(&room.code).await;
        let mut player =
            require_player(self.players.as_ref(), player_id, NotFoundKind::Player).await?;
        player.pending_guess = Some(guess.to_string());
        self.players.save_player(&player).await?;

        self.broadcaster.publish(
            &room.code,
            &RoomEvent::GuessSubmitted {
                player: player.name.clone(),
                guess: guess.to_string(),
                player_id: player.id,
            },
        );
        Ok(())
    }

    /// Record one binary ballot about `target_id` and resolve the vote if it
    /// just reached threshold.
    ///
    /// Every player except the target must ballot. A re-vote overwrites;
    /// approval requires strictly more yes than no (a tie fails).
    pub async fn cast_vote(
        &self,
        target_id: Uuid,
        voter_id: Uuid,
        yes: bool,
        kind: VoteKind,
    ) -> Result<(), DomainError> {
        let target = require_player(self.players.as_ref(), target_id, NotFoundKind::Target).await?;
        let room = require_room(self.rooms.as_ref(), target.room_id).await?;

        let _guard = self.locks.acquire(&room.code).await;
        let mut room = require_room_by_code(self.rooms.as_ref(), &room.code).await?;
        let players = self.players.find_by_room(room.id).await?;

        room.record_ballot(voter_id, yes);
        room.voting_target = Some(target_id);
        room.voting_kind = Some(kind);
        self.rooms.save_room(&room).await?;

        let progress = voting::binary_progress(&room, players.len());
        self.broadcaster.publish(
            &room.code,
            &RoomEvent::VoteProgress {
                cast: progress.cast,
                needed: progress.needed,
                kind,
            },
        );

        if !progress.complete() {
            return Ok(());
        }

        let approved = voting::binary_approved(&room);
        room.clear_binary_ledger();
        self.rooms.save_room(&room).await?;
        info!(room = %room.code, kind = %kind, approved, "binary vote resolved");

        match kind {
            VoteKind::Guess => self.finish_guess_validation(&room, target_id, approved).await,
            VoteKind::Change => {
                if approved {
                    // A failed re-roll must not fail the vote: the protocol
                    // completed, only the side effect is reported rejected.
                    if let Err(err) = self.execute_change(&room, target_id).await {
                        warn!(room = %room.code, error = %err, "approved change could not be executed");
                        self.broadcaster.publish(
                            &room.code,
                            &RoomEvent::ChangeRejected {
                                player: target.name.clone(),
                            },
                        );
                    }
                } else {
                    self.broadcaster.publish(
                        &room.code,
                        &RoomEvent::ChangeRejected {
                            player: target.name.clone(),
                        },
                    );
                }
                Ok(())
            }
        }
    }

    async fn finish_guess_validation(
        &self,
        room: &Room,
        target_id: Uuid,
        approved: bool,
    ) -> Result<(), DomainError> {
        let players = self.players.find_by_room(room.id).await?;
        let mut target = players
            .iter()
            .find(|p| p.id == target_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Target, format!("player {target_id} not found"))
            })?;

        if approved {
            target.guessed = true;
            target.guess_order = Some(voting::next_guess_order(&players));
            target.pending_guess = None;
            self.players.save_player(&target).await?;
            self.broadcaster.publish(
                &room.code,
                &RoomEvent::GuessValidatedCorrect {
                    player: target.name.clone(),
                },
            );
        } else {
            target.pending_guess = None;
            self.players.save_player(&target).await?;
            self.broadcaster.publish(
                &room.code,
                &RoomEvent::GuessValidatedIncorrect {
                    player: target.name.clone(),
                },
            );
        }
        Ok(())
    }

    /// Re-roll the target's item from the room's pack, excluding items
    /// already assigned in the room (full pool as a last resort).
    async fn execute_change(&self, room: &Room, target_id: Uuid) -> Result<(), DomainError> {
        let pack = room
            .selected_pack()
            .ok_or_else(|| {
                DomainError::invalid_state(
                    InvalidStateKind::WrongGameMode,
                    "role changes apply to guess-who rooms only",
                )
            })?
            .to_string();
        let pool = self.catalog.find_by_pack(&pack).await?;
        let mut players = self.players.find_by_room(room.id).await?;

        {
            let mut rng = StdRng::from_os_rng();
            assignment::reroll_item(target_id, &mut players, &pool, &mut rng)?;
        }
        let target = players
            .iter()
            .find(|p| p.id == target_id)
            .expect("re-roll validated the target");
        self.players.save_player(target).await?;

        self.broadcaster.publish(
            &room.code,
            &RoomEvent::ChangeExecuted {
                player: target.name.clone(),
            },
        );
        Ok(())
    }

    /// Announce that `requester` wants `target`'s role re-rolled. Pure
    /// notification: no vote session is opened and nothing is recorded;
    /// clients decide independently whether to start casting change votes.
    pub async fn propose_change(
        &self,
        target_id: Uuid,
        requester_id: Uuid,
    ) -> Result<(), DomainError> {
        let target = require_player(self.players.as_ref(), target_id, NotFoundKind::Target).await?;
        let requester =
            require_player(self.players.as_ref(), requester_id, NotFoundKind::Requester).await?;
        let room = require_room(self.rooms.as_ref(), target.room_id).await?;

        self.broadcaster.publish(
            &room.code,
            &RoomEvent::ChangeProposed {
                target: target.name.clone(),
                target_id: target.id,
                requester: requester.name.clone(),
            },
        );
        Ok(())
    }

    /// Record an accusation (overwriting the voter's previous one) and
    /// resolve the round once every active player has voted.
    pub async fn cast_accuse_vote(
        &self,
        voter_id: Uuid,
        target_id: Uuid,
    ) -> Result<(), DomainError> {
        let voter = require_player(self.players.as_ref(), voter_id, NotFoundKind::Voter).await?;
        let room = require_room(self.rooms.as_ref(), voter.room_id).await?;

        let _guard = self.locks.acquire(&room.code).await;
        let mut room = require_room_by_code(self.rooms.as_ref(), &room.code).await?;
        let mut players = self.players.find_by_room(room.id).await?;

        let voter = players
            .iter()
            .find(|p| p.id == voter_id)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Voter, format!("player {voter_id} not found"))
            })?;
        if voter.eliminated {
            return Err(DomainError::invalid_state(
                InvalidStateKind::EliminatedPlayer,
                "eliminated players cannot accuse",
            ));
        }
        if !players.iter().any(|p| p.id == target_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Target,
                format!("player {target_id} not found in this room"),
            ));
        }

        room.accuse_votes.insert(voter_id, target_id);
        self.rooms.save_room(&room).await?;

        let active = voting::active_players(&players);
        self.broadcaster.publish(
            &room.code,
            &RoomEvent::AccuseProgress {
                cast: room.accuse_votes.len(),
                active,
            },
        );

        if room.accuse_votes.len() >= active {
            self.resolve_accusation(&mut room, &mut players).await?;
        }
        Ok(())
    }

    async fn resolve_accusation(
        &self,
        room: &mut Room,
        players: &mut [Player],
    ) -> Result<(), DomainError> {
        match voting::resolve_accusation(&room.accuse_votes) {
            AccuseOutcome::Tie => {
                // Nobody is ejected; a fresh accusation round can begin.
                room.accuse_votes.clear();
                self.rooms.save_room(room).await?;
                info!(room = %room.code, "accusation round tied");
                self.broadcaster
                    .publish(&room.code, &RoomEvent::AccuseResult(AccuseResult::Tie));
            }
            AccuseOutcome::Plurality(accused_id) => {
                let accused = players
                    .iter_mut()
                    .find(|p| p.id == accused_id)
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Target,
                            format!("accused player {accused_id} not found"),
                        )
                    })?;

                if accused.is_impostor {
                    // Town wins. Terminal; the ledger is left as-is.
                    room.status = RoomStatus::Finished;
                    self.rooms.save_room(room).await?;
                    info!(room = %room.code, "impostor caught, room finished");
                    self.broadcaster.publish(
                        &room.code,
                        &RoomEvent::AccuseResult(AccuseResult::ImpostorCaught {
                            player: accused.name.clone(),
                        }),
                    );
                } else {
                    accused.eliminated = true;
                    let accused_name = accused.name.clone();
                    self.players.save_player(accused).await?;
                    self.broadcaster.publish(
                        &room.code,
                        &RoomEvent::AccuseResult(AccuseResult::InnocentEjected {
                            player: accused_name,
                        }),
                    );

                    if voting::impostors_win(players) {
                        room.status = RoomStatus::Finished;
                        self.rooms.save_room(room).await?;
                        info!(room = %room.code, "impostors reached parity, room finished");
                        self.broadcaster
                            .publish(&room.code, &RoomEvent::GameOverImpostorsWin);
                    } else {
                        room.accuse_votes.clear();
                        self.rooms.save_room(room).await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Persist a player's free-form elimination notes. No broadcast.
    pub async fn update_notes(
        &self,
        player_id: Uuid,
        valid: Option<String>,
        invalid: Option<String>,
    ) -> Result<(), DomainError> {
        let player = require_player(self.players.as_ref(), player_id, NotFoundKind::Player).await?;
        let room = require_room(self.rooms.as_ref(), player.room_id).await?;

        let _guard = self.locks.acquire(&room.code).await;
        let mut player =
            require_player(self.players.as_ref(), player_id, NotFoundKind::Player).await?;
        player.notes = valid;
        player.invalid_notes = invalid;
        self.players.save_player(&player).await
    }
}
