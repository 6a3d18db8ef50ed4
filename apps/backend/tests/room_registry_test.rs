//! Room registry behavior through the service layer: creation, admission,
//! lookup and deletion over the in-memory adapters.

use backend_test_support::unique_helpers::unique_player_name;
use parlor_backend::domain::room::{GameConfig, RoomStatus};
use parlor_backend::errors::domain::{ConflictKind, DomainError, InvalidStateKind, NotFoundKind};
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

#[tokio::test]
async fn create_room_yields_a_short_code_and_a_host() {
    let backend = TestBackend::new();

    let (room, host) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();

    assert_eq!(room.code.len(), 4);
    assert!(room
        .code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert_eq!(room.status, RoomStatus::Waiting);
    assert!(host.host);
    assert_eq!(host.join_order, 0);
    assert_eq!(host.name, "ana");
}

#[tokio::test]
async fn join_admits_distinct_names_and_broadcasts() {
    let backend = TestBackend::new();
    let (room, _) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();

    let bo = backend.rooms.join_room(&room.code, "bo").await.unwrap();
    assert_eq!(bo.join_order, 1);
    assert!(!bo.host);

    let players = backend.rooms.get_players(&room.code).await.unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "ana", "join order puts the host first");
    assert_eq!(players[1].name, "bo");

    assert_eq!(
        backend.broadcaster.events_for(&room.code),
        vec!["PLAYER_JOINED".to_string()]
    );
}

#[tokio::test]
async fn join_rejects_duplicate_names_case_insensitively() {
    let backend = TestBackend::new();
    let (room, _) = backend
        .rooms
        .create_room("Ana", guess_who_config())
        .await
        .unwrap();

    let err = backend.rooms.join_room(&room.code, "ana").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateName, _)
    ));

    let err = backend.rooms.join_room(&room.code, "  ANA  ").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateName, _)
    ));

    // A distinct name still gets in.
    backend
        .rooms
        .join_room(&room.code, &unique_player_name("carla"))
        .await
        .unwrap();
    assert_eq!(backend.rooms.get_players(&room.code).await.unwrap().len(), 2);
}

#[tokio::test]
async fn join_fails_once_the_room_left_waiting() {
    let backend = TestBackend::new();
    backend.seed_pack("FUTBOL", 8).await.unwrap();
    let (room, _) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();

    backend.rounds.start_round(&room.code).await.unwrap();

    let err = backend.rooms.join_room(&room.code, "late").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState(InvalidStateKind::RoomNotWaiting, _)
    ));
}

#[tokio::test]
async fn join_fails_for_an_unknown_code() {
    let backend = TestBackend::new();
    let err = backend.rooms.join_room("ZZZ9", "ana").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Room, _)));
}

#[tokio::test]
async fn room_codes_do_not_collide_across_rooms() {
    let backend = TestBackend::new();
    let mut codes = std::collections::HashSet::new();
    for i in 0..32 {
        let (room, _) = backend
            .rooms
            .create_room(&format!("host-{i}"), guess_who_config())
            .await
            .unwrap();
        assert!(codes.insert(room.code.clone()), "duplicate code {}", room.code);
    }
}

#[tokio::test]
async fn delete_room_removes_players_and_is_idempotent() {
    let backend = TestBackend::new();
    let (room, host) = backend
        .rooms
        .create_room("ana", guess_who_config())
        .await
        .unwrap();
    backend.rooms.join_room(&room.code, "bo").await.unwrap();

    backend.rooms.delete_room(&room.code).await.unwrap();

    let err = backend.rooms.get_room(&room.code).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Room, _)));

    use parlor_backend::repos::PlayerRepo;
    assert!(backend
        .players_repo
        .find_by_id(host.id)
        .await
        .unwrap()
        .is_none());

    // Second delete is a no-op.
    backend.rooms.delete_room(&room.code).await.unwrap();
}
