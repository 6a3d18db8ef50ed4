use actix_web::http::StatusCode;

use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, ContentKind, DomainError, InvalidStateKind, NotFoundKind,
};

fn mapped(err: DomainError) -> AppError {
    AppError::from(err)
}

#[test]
fn not_found_maps_to_404_with_a_kind_specific_code() {
    let err = mapped(DomainError::not_found(NotFoundKind::Room, "room ZZZZ"));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    match err {
        AppError::NotFound { code, detail } => {
            assert_eq!(code, "ROOM_NOT_FOUND");
            assert!(detail.contains("ZZZZ"));
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }

    let err = mapped(DomainError::not_found(NotFoundKind::Voter, "player x"));
    assert!(matches!(err, AppError::NotFound { code: "VOTER_NOT_FOUND", .. }));
}

#[test]
fn invalid_state_and_conflicts_map_to_409() {
    let err = mapped(DomainError::invalid_state(
        InvalidStateKind::RoomNotWaiting,
        "game already started",
    ));
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(matches!(err, AppError::Conflict { code: "ROOM_NOT_WAITING", .. }));

    let err = mapped(DomainError::invalid_state(
        InvalidStateKind::EliminatedPlayer,
        "eliminated players cannot accuse",
    ));
    assert!(matches!(err, AppError::Conflict { code: "PLAYER_ELIMINATED", .. }));

    let err = mapped(DomainError::conflict(
        ConflictKind::DuplicateName,
        "name already in use",
    ));
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert!(matches!(err, AppError::Conflict { code: "DUPLICATE_NAME", .. }));
}

#[test]
fn insufficient_content_maps_to_422() {
    let err = mapped(DomainError::insufficient_content(
        ContentKind::PackTooSmall,
        "found 2, needed 5",
    ));
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(matches!(err, AppError::Unprocessable { code: "PACK_TOO_SMALL", .. }));

    let err = mapped(DomainError::insufficient_content(
        ContentKind::NoWordsConfigured,
        "no words",
    ));
    assert!(matches!(
        err,
        AppError::Unprocessable { code: "NO_WORDS_CONFIGURED", .. }
    ));
}

#[test]
fn validation_maps_to_400_and_infra_to_500() {
    let err = mapped(DomainError::validation("player name must not be empty"));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = mapped(DomainError::infra("store unavailable"));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
