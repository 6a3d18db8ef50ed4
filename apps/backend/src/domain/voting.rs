//! Pure voting arithmetic: binary-ballot progress and the accusation tally.
//!
//! The coordinator in `services::voting` owns persistence and broadcasting;
//! everything here is side-effect free so the resolution laws are directly
//! testable.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::player::Player;
use crate::domain::room::Room;

/// Progress of an open binary vote. Every player except the target ballots,
/// so `needed` is the room's player count minus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallotProgress {
    pub cast: usize,
    pub needed: usize,
}

impl BallotProgress {
    /// The vote closes exactly when the threshold is reached, never earlier.
    pub fn complete(&self) -> bool {
        self.cast >= self.needed
    }
}

pub fn binary_progress(room: &Room, player_count: usize) -> BallotProgress {
    BallotProgress {
        cast: room.ballots_cast(),
        needed: player_count.saturating_sub(1),
    }
}

/// Strict majority: a tie is not approved.
pub fn binary_approved(room: &Room) -> bool {
    room.yes_votes.len() > room.no_votes.len()
}

/// Resolution of a complete accusation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuseOutcome {
    /// Two or more targets tied for the maximum; nobody is ejected.
    Tie,
    /// A single target holds the strict maximum.
    Plurality(Uuid),
}

/// Tally the accusation ledger and find the strict plurality target.
///
/// Candidates are ordered by (count desc, id) before comparison so the
/// outcome never depends on map iteration order.
pub fn resolve_accusation(ledger: &HashMap<Uuid, Uuid>) -> AccuseOutcome {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for target in ledger.values() {
        *counts.entry(*target).or_insert(0) += 1;
    }

    let mut ranked: Vec<(Uuid, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    match ranked.as_slice() {
        [] => AccuseOutcome::Tie,
        [(winner, _)] => AccuseOutcome::Plurality(*winner),
        [(winner, top), (_, runner_up), ..] => {
            if top == runner_up {
                AccuseOutcome::Tie
            } else {
                AccuseOutcome::Plurality(*winner)
            }
        }
    }
}

/// Players still in the game (not eliminated).
pub fn active_players(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.eliminated).count()
}

/// Impostors win once they are no longer outnumbered among active players.
pub fn impostors_win(players: &[Player]) -> bool {
    let active_impostors = players
        .iter()
        .filter(|p| !p.eliminated && p.is_impostor)
        .count();
    let active_innocents = players
        .iter()
        .filter(|p| !p.eliminated && !p.is_impostor)
        .count();
    active_impostors >= active_innocents
}

/// Next finishing position: one past the highest assigned so far, starting
/// at 1. Produces a compact, strictly increasing sequence in call order.
pub fn next_guess_order(players: &[Player]) -> u32 {
    players
        .iter()
        .filter_map(|p| p.guess_order)
        .max()
        .unwrap_or(0)
        + 1
}
