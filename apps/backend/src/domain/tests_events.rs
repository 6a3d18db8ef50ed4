//! The colon-delimited event texts are a client contract; these tests pin
//! the exact encoding, field order included.

use uuid::Uuid;

use crate::domain::events::{AccuseResult, RoomEvent};
use crate::domain::room::VoteKind;

#[test]
fn lifecycle_events_have_no_arguments() {
    assert_eq!(RoomEvent::PlayerJoined.to_string(), "PLAYER_JOINED");
    assert_eq!(RoomEvent::GameStarted.to_string(), "GAME_STARTED");
}

#[test]
fn guess_submitted_carries_name_guess_and_id_in_that_order() {
    let id = Uuid::nil();
    let event = RoomEvent::GuessSubmitted {
        player: "ana".to_string(),
        guess: "Best Director Oscar winners".to_string(),
        player_id: id,
    };
    assert_eq!(
        event.to_string(),
        format!("GUESS_SUBMITTED:ana:Best Director Oscar winners:{id}")
    );
}

#[test]
fn vote_progress_carries_cast_needed_and_kind() {
    let event = RoomEvent::VoteProgress {
        cast: 2,
        needed: 3,
        kind: VoteKind::Guess,
    };
    assert_eq!(event.to_string(), "VOTE_PROGRESS:2:3:GUESS");

    let event = RoomEvent::VoteProgress {
        cast: 1,
        needed: 2,
        kind: VoteKind::Change,
    };
    assert_eq!(event.to_string(), "VOTE_PROGRESS:1:2:CHANGE");
}

#[test]
fn validation_outcomes_carry_the_player_name() {
    assert_eq!(
        RoomEvent::GuessValidatedCorrect {
            player: "bo".to_string()
        }
        .to_string(),
        "GUESS_VALIDATED_CORRECT:bo"
    );
    assert_eq!(
        RoomEvent::GuessValidatedIncorrect {
            player: "bo".to_string()
        }
        .to_string(),
        "GUESS_VALIDATED_INCORRECT:bo"
    );
}

#[test]
fn change_events_follow_the_proposed_executed_rejected_formats() {
    let id = Uuid::nil();
    assert_eq!(
        RoomEvent::ChangeProposed {
            target: "cal".to_string(),
            target_id: id,
            requester: "dot".to_string(),
        }
        .to_string(),
        format!("CHANGE_PROPOSED:cal:{id}:dot")
    );
    assert_eq!(
        RoomEvent::ChangeExecuted {
            player: "cal".to_string()
        }
        .to_string(),
        "CHANGE_EXECUTED:cal"
    );
    assert_eq!(
        RoomEvent::ChangeRejected {
            player: "cal".to_string()
        }
        .to_string(),
        "CHANGE_REJECTED:cal"
    );
}

#[test]
fn accusation_events_encode_progress_results_and_game_over() {
    assert_eq!(
        RoomEvent::AccuseProgress { cast: 3, active: 4 }.to_string(),
        "ACCUSE_PROGRESS:3:4"
    );
    assert_eq!(
        RoomEvent::AccuseResult(AccuseResult::ImpostorCaught {
            player: "eve".to_string()
        })
        .to_string(),
        "ACCUSE_RESULT:IMPOSTOR_CAUGHT:eve"
    );
    assert_eq!(
        RoomEvent::AccuseResult(AccuseResult::InnocentEjected {
            player: "fay".to_string()
        })
        .to_string(),
        "ACCUSE_RESULT:INNOCENT_EJECTED:fay"
    );
    assert_eq!(
        RoomEvent::AccuseResult(AccuseResult::Tie).to_string(),
        "ACCUSE_RESULT:TIE"
    );
    assert_eq!(
        RoomEvent::GameOverImpostorsWin.to_string(),
        "GAME_OVER:IMPOSTOR_WINS"
    );
}
