//! Room aggregate: lifecycle state, mode configuration and voting ledgers.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Overall room lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Room created, players may still join.
    Waiting,
    /// A round is in progress; joins are rejected.
    InGame,
    /// Terminal. Only an explicit reset ("play again") leaves this state.
    Finished,
}

/// Which of the two party games this room is running.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    GuessWho,
    Impostor,
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::GuessWho => write!(f, "GUESS_WHO"),
            GameType::Impostor => write!(f, "IMPOSTOR"),
        }
    }
}

/// Mode-specific configuration, fixed at room creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameConfig {
    GuessWho {
        /// Pack the round draws its guessable items from.
        selected_pack: String,
    },
    Impostor {
        /// Requested impostor count; clamped to `max(1, min(k, n-1))` at
        /// assignment time.
        impostor_count: u32,
        /// Whether impostors receive the word's hint.
        hints_enabled: bool,
        /// Restrict word selection to one category. `None` or `"RANDOM"`
        /// means no restriction.
        category_preference: Option<String>,
    },
}

/// The two binary-vote protocols sharing the yes/no ledger.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteKind {
    /// Validate a submitted guess.
    Guess,
    /// Approve a role re-roll for the target.
    Change,
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteKind::Guess => write!(f, "GUESS"),
            VoteKind::Change => write!(f, "CHANGE"),
        }
    }
}

/// One game session. Owns its lifecycle state, per-round secrets and both
/// voting ledgers. Players are kept in the player store keyed by room id;
/// the room never embeds them (see the persistence port).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    /// Short join code, globally unique, 4 uppercase alphanumerics.
    pub code: String,
    pub status: RoomStatus,
    #[serde(flatten)]
    pub config: GameConfig,
    /// Impostor mode: category of the current round's secret word.
    pub current_category: Option<String>,
    /// Impostor mode: the current round's secret word.
    pub current_word: Option<String>,
    /// Advisory tag: who the open binary vote is about. Not authoritative;
    /// never used to gate ballots.
    pub voting_target: Option<Uuid>,
    /// Advisory tag: which protocol the open binary vote belongs to.
    pub voting_kind: Option<VoteKind>,
    /// Binary ledger: voters who approved.
    pub yes_votes: HashSet<Uuid>,
    /// Binary ledger: voters who rejected.
    pub no_votes: HashSet<Uuid>,
    /// Accusation ledger: voter -> accused, one live vote per voter.
    pub accuse_votes: HashMap<Uuid, Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Room {
    pub fn new(code: String, config: GameConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            status: RoomStatus::Waiting,
            config,
            current_category: None,
            current_word: None,
            voting_target: None,
            voting_kind: None,
            yes_votes: HashSet::new(),
            no_votes: HashSet::new(),
            accuse_votes: HashMap::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self.config {
            GameConfig::GuessWho { .. } => GameType::GuessWho,
            GameConfig::Impostor { .. } => GameType::Impostor,
        }
    }

    /// Guess-Who pack name, if this is a Guess-Who room.
    pub fn selected_pack(&self) -> Option<&str> {
        match &self.config {
            GameConfig::GuessWho { selected_pack } => Some(selected_pack),
            GameConfig::Impostor { .. } => None,
        }
    }

    /// Record a binary ballot. A re-vote overwrites: the voter is removed
    /// from the opposite set first so they are never counted twice.
    pub fn record_ballot(&mut self, voter_id: Uuid, yes: bool) {
        if yes {
            self.no_votes.remove(&voter_id);
            self.yes_votes.insert(voter_id);
        } else {
            self.yes_votes.remove(&voter_id);
            self.no_votes.insert(voter_id);
        }
    }

    /// Total ballots currently cast in the binary ledger.
    pub fn ballots_cast(&self) -> usize {
        self.yes_votes.len() + self.no_votes.len()
    }

    /// Clear the binary ledger and its advisory tags.
    pub fn clear_binary_ledger(&mut self) {
        self.yes_votes.clear();
        self.no_votes.clear();
        self.voting_target = None;
        self.voting_kind = None;
    }

    /// Clear both ledgers. Invoked by round assignment so a fresh round never
    /// inherits stale ballots.
    pub fn clear_all_ledgers(&mut self) {
        self.clear_binary_ledger();
        self.accuse_votes.clear();
    }
}
