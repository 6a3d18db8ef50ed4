//! Room channel events and their wire encoding.
//!
//! Events are broadcast as colon-delimited text, `TYPE:arg1:arg2:...`.
//! Field order per type is part of the client contract and must not change.

use std::fmt::{Display, Formatter, Result as FmtResult};

use uuid::Uuid;

use crate::domain::room::VoteKind;

/// Outcome tag of a resolved accusation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccuseResult {
    /// The plurality target was an impostor; town wins.
    ImpostorCaught { player: String },
    /// The plurality target was innocent and is now eliminated.
    InnocentEjected { player: String },
    /// Two or more targets tied for the maximum; nobody is ejected.
    Tie,
}

/// Everything the backend ever publishes on a room's channel.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    PlayerJoined,
    GameStarted,
    GuessSubmitted {
        player: String,
        guess: String,
        player_id: Uuid,
    },
    VoteProgress {
        cast: usize,
        needed: usize,
        kind: VoteKind,
    },
    GuessValidatedCorrect {
        player: String,
    },
    GuessValidatedIncorrect {
        player: String,
    },
    ChangeProposed {
        target: String,
        target_id: Uuid,
        requester: String,
    },
    ChangeExecuted {
        player: String,
    },
    ChangeRejected {
        player: String,
    },
    AccuseProgress {
        cast: usize,
        active: usize,
    },
    AccuseResult(AccuseResult),
    GameOverImpostorsWin,
}

impl Display for RoomEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RoomEvent::PlayerJoined => write!(f, "PLAYER_JOINED"),
            RoomEvent::GameStarted => write!(f, "GAME_STARTED"),
            RoomEvent::GuessSubmitted {
                player,
                guess,
                player_id,
            } => write!(f, "GUESS_SUBMITTED:{player}:{guess}:{player_id}"),
            RoomEvent::VoteProgress { cast, needed, kind } => {
                write!(f, "VOTE_PROGRESS:{cast}:{needed}:{kind}")
            }
            RoomEvent::GuessValidatedCorrect { player } => {
                write!(f, "GUESS_VALIDATED_CORRECT:{player}")
            }
            RoomEvent::GuessValidatedIncorrect { player } => {
                write!(f, "GUESS_VALIDATED_INCORRECT:{player}")
            }
            RoomEvent::ChangeProposed {
                target,
                target_id,
                requester,
            } => write!(f, "CHANGE_PROPOSED:{target}:{target_id}:{requester}"),
            RoomEvent::ChangeExecuted { player } => write!(f, "CHANGE_EXECUTED:{player}"),
            RoomEvent::ChangeRejected { player } => write!(f, "CHANGE_REJECTED:{player}"),
            RoomEvent::AccuseProgress { cast, active } => {
                write!(f, "ACCUSE_PROGRESS:{cast}:{active}")
            }
            RoomEvent::AccuseResult(AccuseResult::ImpostorCaught { player }) => {
                write!(f, "ACCUSE_RESULT:IMPOSTOR_CAUGHT:{player}")
            }
            RoomEvent::AccuseResult(AccuseResult::InnocentEjected { player }) => {
                write!(f, "ACCUSE_RESULT:INNOCENT_EJECTED:{player}")
            }
            RoomEvent::AccuseResult(AccuseResult::Tie) => write!(f, "ACCUSE_RESULT:TIE"),
            RoomEvent::GameOverImpostorsWin => write!(f, "GAME_OVER:IMPOSTOR_WINS"),
        }
    }
}
