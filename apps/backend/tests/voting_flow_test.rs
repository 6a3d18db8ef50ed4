//! End-to-end voting flows through the coordinator: guess validation,
//! role-change approval and the accusation protocol, including terminal
//! transitions.

use parlor_backend::domain::player::Player;
use parlor_backend::domain::room::{GameConfig, RoomStatus, VoteKind};
use parlor_backend::errors::domain::{DomainError, InvalidStateKind};
use parlor_backend::test_support::TestBackend;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::test_logging::init();
}

/// Seed a pack, create a Guess-Who room with the given roster and start it.
async fn started_guess_room(backend: &TestBackend, names: &[&str]) -> (String, Vec<Player>) {
    backend.seed_pack("FUTBOL", 8).await.unwrap();
    let (room, _) = backend
        .rooms
        .create_room(
            names[0],
            GameConfig::GuessWho {
                selected_pack: "FUTBOL".to_string(),
            },
        )
        .await
        .unwrap();
    for name in &names[1..] {
        backend.rooms.join_room(&room.code, name).await.unwrap();
    }
    backend.rounds.start_round(&room.code).await.unwrap();
    backend.broadcaster.clear();
    let players = backend.rooms.get_players(&room.code).await.unwrap();
    (room.code, players)
}

/// Same for an Impostor room with one impostor and no hints.
async fn started_impostor_room(backend: &TestBackend, names: &[&str]) -> (String, Vec<Player>) {
    backend
        .seed_words(&[("Animals", "Lion", "roars"), ("Food", "Pizza", "round")])
        .await
        .unwrap();
    let (room, _) = backend
        .rooms
        .create_room(
            names[0],
            GameConfig::Impostor {
                impostor_count: 1,
                hints_enabled: false,
                category_preference: None,
            },
        )
        .await
        .unwrap();
    for name in &names[1..] {
        backend.rooms.join_room(&room.code, name).await.unwrap();
    }
    backend.rounds.start_round(&room.code).await.unwrap();
    backend.broadcaster.clear();
    let players = backend.rooms.get_players(&room.code).await.unwrap();
    (room.code, players)
}

async fn reload(backend: &TestBackend, code: &str) -> Vec<Player> {
    backend.rooms.get_players(code).await.unwrap()
}

#[tokio::test]
async fn approved_guess_validations_assign_gapless_orders() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    backend.voting.submit_guess(bo, "a decent guess").await.unwrap();

    // Two of three players must ballot; both approve.
    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Guess)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, true, VoteKind::Guess)
        .await
        .unwrap();

    let after = reload(&backend, &code).await;
    let bo_player = after.iter().find(|p| p.id == bo).unwrap();
    assert!(bo_player.guessed);
    assert_eq!(bo_player.guess_order, Some(1));
    assert_eq!(bo_player.pending_guess, None);

    // Second finisher gets order 2.
    backend.voting.submit_guess(carla, "another").await.unwrap();
    backend
        .voting
        .cast_vote(carla, ana, true, VoteKind::Guess)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(carla, bo, true, VoteKind::Guess)
        .await
        .unwrap();

    let after = reload(&backend, &code).await;
    let carla_player = after.iter().find(|p| p.id == carla).unwrap();
    assert_eq!(carla_player.guess_order, Some(2));

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"GUESS_VALIDATED_CORRECT:bo".to_string()));
    assert!(events.contains(&"GUESS_VALIDATED_CORRECT:carla".to_string()));
    assert!(events.contains(&format!("GUESS_SUBMITTED:bo:a decent guess:{bo}")));
}

#[tokio::test]
async fn a_split_vote_rejects_the_guess_and_assigns_no_order() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    backend.voting.submit_guess(bo, "shaky guess").await.unwrap();
    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Guess)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, false, VoteKind::Guess)
        .await
        .unwrap();

    let after = reload(&backend, &code).await;
    let bo_player = after.iter().find(|p| p.id == bo).unwrap();
    assert!(!bo_player.guessed, "a 1-1 tie is not approved");
    assert_eq!(bo_player.guess_order, None);
    assert_eq!(bo_player.pending_guess, None, "rejection still clears the pending guess");

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"GUESS_VALIDATED_INCORRECT:bo".to_string()));

    // The ledger is clear for the next vote.
    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.ballots_cast(), 0);
    assert_eq!(room.voting_target, None);
}

#[tokio::test]
async fn vote_progress_is_broadcast_for_every_ballot() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Guess)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, true, VoteKind::Guess)
        .await
        .unwrap();

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"VOTE_PROGRESS:1:2:GUESS".to_string()));
    assert!(events.contains(&"VOTE_PROGRESS:2:2:GUESS".to_string()));
}

#[tokio::test]
async fn an_approved_change_rerolls_the_target_into_an_unassigned_item() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    backend.voting.propose_change(bo, ana).await.unwrap();

    let before: Vec<_> = players
        .iter()
        .map(|p| p.assigned_item.as_ref().unwrap().id)
        .collect();

    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Change)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, true, VoteKind::Change)
        .await
        .unwrap();

    let after = reload(&backend, &code).await;
    let bo_item = after
        .iter()
        .find(|p| p.id == bo)
        .unwrap()
        .assigned_item
        .as_ref()
        .unwrap()
        .id;
    assert!(
        !before.contains(&bo_item),
        "re-roll must pick an item nobody held"
    );

    let events = backend.broadcaster.events_for(&code);
    assert!(events.iter().any(|e| e.starts_with("CHANGE_PROPOSED:bo:")));
    assert!(events.contains(&"CHANGE_EXECUTED:bo".to_string()));
}

#[tokio::test]
async fn a_rejected_change_keeps_the_assignment() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    let before = players
        .iter()
        .find(|p| p.id == bo)
        .unwrap()
        .assigned_item
        .as_ref()
        .unwrap()
        .id;

    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Change)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, false, VoteKind::Change)
        .await
        .unwrap();

    let after = reload(&backend, &code).await;
    let bo_item = after
        .iter()
        .find(|p| p.id == bo)
        .unwrap()
        .assigned_item
        .as_ref()
        .unwrap()
        .id;
    assert_eq!(before, bo_item);

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"CHANGE_REJECTED:bo".to_string()));
}

#[tokio::test]
async fn a_failing_reroll_is_reported_as_rejected_not_an_error() {
    // Change votes in an Impostor room approve fine, but the re-roll has no
    // pack to draw from; the failure must be swallowed into CHANGE_REJECTED.
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla"]).await;
    let (ana, bo, carla) = (players[0].id, players[1].id, players[2].id);

    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Change)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, carla, true, VoteKind::Change)
        .await
        .expect("the voting protocol itself must complete");

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"CHANGE_REJECTED:bo".to_string()));
    assert!(!events.iter().any(|e| e.starts_with("CHANGE_EXECUTED")));
}

#[tokio::test]
async fn a_revote_overwrites_the_earlier_ballot() {
    let backend = TestBackend::new();
    let (code, players) = started_guess_room(&backend, &["ana", "bo", "carla", "dan"]).await;
    let (ana, bo) = (players[0].id, players[1].id);

    backend
        .voting
        .cast_vote(bo, ana, true, VoteKind::Guess)
        .await
        .unwrap();
    backend
        .voting
        .cast_vote(bo, ana, false, VoteKind::Guess)
        .await
        .unwrap();

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.ballots_cast(), 1);
    assert_eq!(room.yes_votes.len(), 0);
    assert_eq!(room.no_votes.len(), 1);
}

#[tokio::test]
async fn an_accusation_tie_ejects_nobody_and_clears_the_ledger() {
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla", "dan"]).await;

    // 2-2 split across two targets.
    backend
        .voting
        .cast_accuse_vote(players[0].id, players[2].id)
        .await
        .unwrap();
    backend
        .voting
        .cast_accuse_vote(players[1].id, players[2].id)
        .await
        .unwrap();
    backend
        .voting
        .cast_accuse_vote(players[2].id, players[0].id)
        .await
        .unwrap();
    backend
        .voting
        .cast_accuse_vote(players[3].id, players[0].id)
        .await
        .unwrap();

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.status, RoomStatus::InGame);
    assert!(room.accuse_votes.is_empty(), "tie clears the ledger");

    let after = reload(&backend, &code).await;
    assert!(after.iter().all(|p| !p.eliminated));

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&"ACCUSE_RESULT:TIE".to_string()));
    assert!(events.contains(&"ACCUSE_PROGRESS:4:4".to_string()));
}

#[tokio::test]
async fn ejecting_an_innocent_continues_play_while_town_outnumbers() {
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla", "dan"]).await;

    let scapegoat = players.iter().find(|p| !p.is_impostor).unwrap().clone();
    for voter in &players {
        backend
            .voting
            .cast_accuse_vote(voter.id, scapegoat.id)
            .await
            .unwrap();
    }

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(
        room.status,
        RoomStatus::InGame,
        "1 impostor vs 2 town keeps the game alive"
    );
    assert!(room.accuse_votes.is_empty(), "a new accusation round can begin");

    let after = reload(&backend, &code).await;
    let ejected = after.iter().find(|p| p.id == scapegoat.id).unwrap();
    assert!(ejected.eliminated);

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&format!("ACCUSE_RESULT:INNOCENT_EJECTED:{}", scapegoat.name)));
    assert!(!events.contains(&"GAME_OVER:IMPOSTOR_WINS".to_string()));
}

#[tokio::test]
async fn impostors_win_when_an_ejection_reaches_parity() {
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla"]).await;

    let scapegoat = players.iter().find(|p| !p.is_impostor).unwrap().clone();
    for voter in &players {
        backend
            .voting
            .cast_accuse_vote(voter.id, scapegoat.id)
            .await
            .unwrap();
    }

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.status, RoomStatus::Finished);

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&format!("ACCUSE_RESULT:INNOCENT_EJECTED:{}", scapegoat.name)));
    assert!(events.contains(&"GAME_OVER:IMPOSTOR_WINS".to_string()));
}

#[tokio::test]
async fn catching_the_impostor_finishes_the_room_for_town() {
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla"]).await;

    let impostor = players.iter().find(|p| p.is_impostor).unwrap().clone();
    for voter in &players {
        backend
            .voting
            .cast_accuse_vote(voter.id, impostor.id)
            .await
            .unwrap();
    }

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.status, RoomStatus::Finished);
    assert!(
        !room.accuse_votes.is_empty(),
        "terminal resolution leaves the ledger as-is"
    );

    let events = backend.broadcaster.events_for(&code);
    assert!(events.contains(&format!("ACCUSE_RESULT:IMPOSTOR_CAUGHT:{}", impostor.name)));

    let after = reload(&backend, &code).await;
    assert!(after.iter().all(|p| !p.eliminated), "a caught impostor ejects nobody");
}

#[tokio::test]
async fn eliminated_players_cannot_accuse() {
    let backend = TestBackend::new();
    let (_code, players) = started_impostor_room(&backend, &["ana", "bo", "carla", "dan"]).await;

    let scapegoat = players.iter().find(|p| !p.is_impostor).unwrap().clone();
    for voter in &players {
        backend
            .voting
            .cast_accuse_vote(voter.id, scapegoat.id)
            .await
            .unwrap();
    }

    let somebody_else = players.iter().find(|p| p.id != scapegoat.id).unwrap();
    let err = backend
        .voting
        .cast_accuse_vote(scapegoat.id, somebody_else.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState(InvalidStateKind::EliminatedPlayer, _)
    ));
}

#[tokio::test]
async fn an_accusation_revote_replaces_the_previous_one() {
    let backend = TestBackend::new();
    let (code, players) = started_impostor_room(&backend, &["ana", "bo", "carla", "dan"]).await;

    backend
        .voting
        .cast_accuse_vote(players[0].id, players[1].id)
        .await
        .unwrap();
    backend
        .voting
        .cast_accuse_vote(players[0].id, players[2].id)
        .await
        .unwrap();

    let room = backend.rooms.get_room(&code).await.unwrap();
    assert_eq!(room.accuse_votes.len(), 1);
    assert_eq!(room.accuse_votes.get(&players[0].id), Some(&players[2].id));
}
