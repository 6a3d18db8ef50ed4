//! Round start/reset through the service layer, including catalog
//! shortfalls, category preferences and replay from a finished room.

use std::collections::HashSet;

use parlor_backend::domain::room::{GameConfig, RoomStatus};
use parlor_backend::errors::domain::{ContentKind, DomainError};
use parlor_backend::repos::PlayerRepo;
use parlor_backend::test_support::TestBackend;

#[ctor::ctor]
fn init_logging() {
    backend_test_support::test_logging::init();
}

fn guess_who_config() -> GameConfig {
    GameConfig::GuessWho {
        selected_pack: "FUTBOL".to_string(),
    }
}

fn impostor_config(count: u32, preference: Option<&str>) -> GameConfig {
    GameConfig::Impostor {
        impostor_count: count,
        hints_enabled: true,
        category_preference: preference.map(str::to_string),
    }
}

#[tokio::test]
async fn starting_a_guess_who_round_assigns_every_player() {
    let backend = TestBackend::new();
    backend.seed_pack("FUTBOL", 6).await.unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();
    backend.rooms.join_room(&room.code, "carla").await.unwrap();

    backend.rounds.start_round(&room.code).await.unwrap();

    let room = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(room.status, RoomStatus::InGame);

    let players = backend.rooms.get_players(&room.code).await.unwrap();
    let assigned: HashSet<_> = players
        .iter()
        .map(|p| p.assigned_item.as_ref().unwrap().id)
        .collect();
    assert_eq!(assigned.len(), 3);

    let events = backend.broadcaster.events_for(&room.code);
    assert!(events.iter().any(|e| e == "GAME_STARTED"));
}

#[tokio::test]
async fn starting_fails_when_the_pack_cannot_cover_the_room() {
    let backend = TestBackend::new();
    backend.seed_pack("FUTBOL", 1).await.unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();

    let err = backend.rounds.start_round(&room.code).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InsufficientContent(ContentKind::PackTooSmall, _)
    ));

    let room = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(room.status, RoomStatus::Waiting, "failed start leaves the room joinable");
}

#[tokio::test]
async fn impostor_start_honors_the_category_preference() {
    let backend = TestBackend::new();
    backend
        .seed_words(&[
            ("Animals", "Lion", "roars"),
            ("Animals", "Elephant", "trunk"),
            ("Food", "Pizza", "round"),
        ])
        .await
        .unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", impostor_config(1, Some("Food")))
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();
    backend.rooms.join_room(&room.code, "carla").await.unwrap();

    backend.rounds.start_round(&room.code).await.unwrap();

    let room = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(room.current_category.as_deref(), Some("Food"));
    assert_eq!(room.current_word.as_deref(), Some("Pizza"));
}

#[tokio::test]
async fn an_unmatched_preference_falls_back_to_the_whole_catalog() {
    let backend = TestBackend::new();
    backend
        .seed_words(&[("Animals", "Lion", "roars")])
        .await
        .unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", impostor_config(1, Some("Ghosts")))
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();

    backend.rounds.start_round(&room.code).await.unwrap();
    let room = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(room.current_word.as_deref(), Some("Lion"));
}

#[tokio::test]
async fn impostor_start_without_words_is_rejected() {
    let backend = TestBackend::new();
    let (room, _) = backend
        .rooms
        .create_room("ana", impostor_config(1, None))
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();

    let err = backend.rounds.start_round(&room.code).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InsufficientContent(ContentKind::NoWordsConfigured, _)
    ));
}

#[tokio::test]
async fn impostor_count_and_hints_follow_the_room_config() {
    let backend = TestBackend::new();
    backend
        .seed_words(&[("Animals", "Lion", "roars")])
        .await
        .unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", impostor_config(2, None))
        .await
        .unwrap();
    for name in ["bo", "carla", "dan"] {
        backend.rooms.join_room(&room.code, name).await.unwrap();
    }

    backend.rounds.start_round(&room.code).await.unwrap();

    let players = backend.rooms.get_players(&room.code).await.unwrap();
    let impostors: Vec<_> = players.iter().filter(|p| p.is_impostor).collect();
    assert_eq!(impostors.len(), 2, "max(1, min(2, 4 - 1))");
    assert!(impostors.iter().all(|p| p.hint.as_deref() == Some("roars")));
    assert!(players
        .iter()
        .filter(|p| !p.is_impostor)
        .all(|p| p.hint.is_none()));
}

#[tokio::test]
async fn reset_reenters_in_game_from_finished_and_clears_ledgers() {
    let backend = TestBackend::new();
    backend
        .seed_words(&[("Animals", "Lion", "roars"), ("Food", "Pizza", "round")])
        .await
        .unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", impostor_config(1, None))
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();
    backend.rounds.start_round(&room.code).await.unwrap();

    // Both players accuse the impostor: town wins, room is FINISHED.
    let players = backend.rooms.get_players(&room.code).await.unwrap();
    let impostor = players.iter().find(|p| p.is_impostor).unwrap();
    for voter in &players {
        backend
            .voting
            .cast_accuse_vote(voter.id, impostor.id)
            .await
            .unwrap();
    }
    let finished = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(finished.status, RoomStatus::Finished);
    assert!(
        !finished.accuse_votes.is_empty(),
        "terminal resolution leaves the ledger as-is"
    );

    // Play again.
    backend.rounds.reset_round(&room.code).await.unwrap();
    let replayed = backend.rooms.get_room(&room.code).await.unwrap();
    assert_eq!(replayed.status, RoomStatus::InGame);
    assert!(replayed.accuse_votes.is_empty());

    let players = backend.rooms.get_players(&room.code).await.unwrap();
    assert!(players.iter().all(|p| !p.eliminated));
    assert_eq!(players.iter().filter(|p| p.is_impostor).count(), 1);
}

#[tokio::test]
async fn reset_clears_a_stalled_binary_vote() {
    let backend = TestBackend::new();
    backend.seed_pack("FUTBOL", 6).await.unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();
    backend.rooms.join_room(&room.code, "carla").await.unwrap();
    backend.rounds.start_round(&room.code).await.unwrap();

    // One ballot of the two needed: the vote stalls open.
    let players = backend.rooms.get_players(&room.code).await.unwrap();
    backend
        .voting
        .cast_vote(
            players[0].id,
            players[1].id,
            true,
            parlor_backend::domain::room::VoteKind::Guess,
        )
        .await
        .unwrap();
    assert_eq!(
        backend.rooms.get_room(&room.code).await.unwrap().ballots_cast(),
        1
    );

    backend.rounds.reset_round(&room.code).await.unwrap();
    assert_eq!(
        backend.rooms.get_room(&room.code).await.unwrap().ballots_cast(),
        0
    );
}

#[tokio::test]
async fn players_survive_reset_with_fresh_round_state() {
    let backend = TestBackend::new();
    backend.seed_pack("FUTBOL", 6).await.unwrap();
    let (room, host) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();
    backend.rounds.start_round(&room.code).await.unwrap();

    let before = backend
        .players_repo
        .find_by_id(host.id)
        .await
        .unwrap()
        .unwrap();
    assert!(before.assigned_item.is_some());

    backend.rounds.reset_round(&room.code).await.unwrap();

    let players = backend.rooms.get_players(&room.code).await.unwrap();
    assert_eq!(players.len(), 2, "reset keeps the roster");
    assert!(players.iter().all(|p| p.guess_order.is_none() && !p.guessed));
}
