//! Room-facing HTTP routes: session lifecycle and in-round player actions.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::normalize_pack;
use crate::domain::player::Player;
use crate::domain::room::{GameConfig, GameType, Room, VoteKind};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    player_name: String,
    game_type: Option<GameType>,
    pack_type: Option<String>,
    impostor_count: Option<u32>,
    hints: Option<bool>,
    impostor_category: Option<String>,
}

#[derive(Debug, Serialize)]
struct RoomWithPlayers {
    #[serde(flatten)]
    room: Room,
    players: Vec<Player>,
}

/// POST /api/rooms/create
async fn create_room(
    app_state: web::Data<AppState>,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();

    let config = match req.game_type.unwrap_or(GameType::GuessWho) {
        GameType::GuessWho => GameConfig::GuessWho {
            selected_pack: normalize_pack(req.pack_type.as_deref()),
        },
        GameType::Impostor => GameConfig::Impostor {
            impostor_count: match req.impostor_count {
                Some(count) if count > 0 => count,
                _ => 1,
            },
            hints_enabled: req.hints.unwrap_or(false),
            category_preference: req.impostor_category,
        },
    };

    let (room, host) = app_state.rooms.create_room(&req.player_name, config).await?;
    Ok(HttpResponse::Ok().json(RoomWithPlayers {
        room,
        players: vec![host],
    }))
}

#[derive(Debug, Deserialize)]
struct JoinRoomRequest {
    room_code: String,
    player_name: String,
}

/// POST /api/rooms/join
async fn join_room(
    app_state: web::Data<AppState>,
    body: web::Json<JoinRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let player = app_state.rooms.join_room(&req.room_code, &req.player_name).await?;
    Ok(HttpResponse::Ok().json(player))
}

/// GET /api/rooms/{code}
async fn get_room(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let room = app_state.rooms.get_room(&code).await?;
    let players = app_state.rooms.get_players(&code).await?;
    Ok(HttpResponse::Ok().json(RoomWithPlayers { room, players }))
}

/// GET /api/rooms/{code}/players
async fn get_players(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let players = app_state.rooms.get_players(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(players))
}

/// POST /api/rooms/{code}/start
async fn start_game(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    app_state.rounds.start_round(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// POST /api/rooms/{code}/reset
async fn reset_game(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    app_state.rounds.reset_round(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct NotesRequest {
    valid: Option<String>,
    invalid: Option<String>,
}

/// PUT /api/rooms/players/{player_id}/notes
async fn update_notes(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<NotesRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    app_state
        .voting
        .update_notes(path.into_inner(), req.valid, req.invalid)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct GuessRequest {
    guess_name: String,
}

/// POST /api/rooms/players/{player_id}/guess
async fn submit_guess(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<GuessRequest>,
) -> Result<HttpResponse, AppError> {
    app_state
        .voting
        .submit_guess(path.into_inner(), &body.guess_name)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    voter_id: Uuid,
    correct: bool,
}

/// POST /api/rooms/players/{player_id}/validate
///
/// One ballot in the guess-validation vote.
async fn validate_guess(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ValidateRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    app_state
        .voting
        .cast_vote(path.into_inner(), req.voter_id, req.correct, VoteKind::Guess)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct ProposeChangeRequest {
    requester_id: Uuid,
}

/// POST /api/rooms/players/{target_id}/request-change
async fn request_change(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ProposeChangeRequest>,
) -> Result<HttpResponse, AppError> {
    app_state
        .voting
        .propose_change(path.into_inner(), body.requester_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct ChangeVoteRequest {
    voter_id: Uuid,
    yes: bool,
}

/// POST /api/rooms/players/{target_id}/execute-change
///
/// One ballot in the role-change vote; the change executes only if the vote
/// closes approved.
async fn execute_change(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ChangeVoteRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    app_state
        .voting
        .cast_vote(path.into_inner(), req.voter_id, req.yes, VoteKind::Change)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct AccuseRequest {
    target_id: Uuid,
}

/// POST /api/rooms/players/{voter_id}/accuse
async fn cast_accuse_vote(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AccuseRequest>,
) -> Result<HttpResponse, AppError> {
    app_state
        .voting
        .cast_accuse_vote(path.into_inner(), body.target_id)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct AddCategoryRequest {
    name: String,
    pack_type: Option<String>,
}

/// POST /api/rooms/categories — player-facing custom category submission.
async fn add_category(
    app_state: web::Data<AppState>,
    body: web::Json<AddCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let item = app_state
        .catalog
        .add_category(&req.name, req.pack_type.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// GET /api/rooms/impostor-categories
async fn impostor_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories = app_state.catalog.impostor_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal paths must be registered before the `{code}` captures.
    cfg.service(web::resource("/create").route(web::post().to(create_room)));
    cfg.service(web::resource("/join").route(web::post().to(join_room)));
    cfg.service(web::resource("/categories").route(web::post().to(add_category)));
    cfg.service(
        web::resource("/impostor-categories").route(web::get().to(impostor_categories)),
    );
    cfg.service(
        web::resource("/players/{player_id}/notes").route(web::put().to(update_notes)),
    );
    cfg.service(web::resource("/players/{player_id}/guess").route(web::post().to(submit_guess)));
    cfg.service(
        web::resource("/players/{player_id}/validate").route(web::post().to(validate_guess)),
    );
    cfg.service(
        web::resource("/players/{target_id}/request-change")
            .route(web::post().to(request_change)),
    );
    cfg.service(
        web::resource("/players/{target_id}/execute-change")
            .route(web::post().to(execute_change)),
    );
    cfg.service(
        web::resource("/players/{voter_id}/accuse").route(web::post().to(cast_accuse_vote)),
    );
    cfg.service(web::resource("/{code}").route(web::get().to(get_room)));
    cfg.service(web::resource("/{code}/players").route(web::get().to(get_players)));
    cfg.service(web::resource("/{code}/start").route(web::post().to(start_game)));
    cfg.service(web::resource("/{code}/reset").route(web::post().to(reset_game)));
}
