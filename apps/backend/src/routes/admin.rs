//! Admin HTTP routes: catalog management and room oversight.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// GET /api/admin/categories
async fn list_categories(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let items = app_state.catalog.list_categories().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[derive(Debug, Deserialize)]
struct CategoryRequest {
    name: String,
    pack_type: Option<String>,
}

/// PUT /api/admin/categories/{id}
async fn update_category(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let item = app_state
        .catalog
        .update_category(path.into_inner(), &req.name, req.pack_type.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /api/admin/categories/{id}
async fn delete_category(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    app_state.catalog.delete_category(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// GET /api/admin/packs
async fn list_packs(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let packs = app_state.catalog.packs().await?;
    Ok(HttpResponse::Ok().json(packs))
}

/// GET /api/admin/rooms
async fn list_rooms(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let rooms = app_state.rooms.list_rooms().await?;
    Ok(HttpResponse::Ok().json(rooms))
}

/// DELETE /api/admin/rooms/{code}
async fn delete_room(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    app_state.rooms.delete_room(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[derive(Debug, Deserialize)]
struct WordsQuery {
    category: Option<String>,
}

/// GET /api/admin/impostor-words[?category=...]
async fn list_impostor_words(
    app_state: web::Data<AppState>,
    query: web::Query<WordsQuery>,
) -> Result<HttpResponse, AppError> {
    let words = match &query.category {
        Some(category) => app_state.catalog.impostor_words_in_category(category).await?,
        None => app_state.catalog.impostor_words().await?,
    };
    Ok(HttpResponse::Ok().json(words))
}

#[derive(Debug, Deserialize)]
struct AddWordRequest {
    category: String,
    word: String,
    hint: String,
}

/// POST /api/admin/impostor-words
async fn add_impostor_word(
    app_state: web::Data<AppState>,
    body: web::Json<AddWordRequest>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    let word = app_state
        .catalog
        .add_impostor_word(&req.category, &req.word, &req.hint)
        .await?;
    Ok(HttpResponse::Ok().json(word))
}

/// DELETE /api/admin/impostor-words/{id}
async fn delete_impostor_word(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    app_state
        .catalog
        .delete_impostor_word(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/categories").route(web::get().to(list_categories)));
    cfg.service(
        web::resource("/categories/{id}")
            .route(web::put().to(update_category))
            .route(web::delete().to(delete_category)),
    );
    cfg.service(web::resource("/packs").route(web::get().to(list_packs)));
    cfg.service(web::resource("/rooms").route(web::get().to(list_rooms)));
    cfg.service(web::resource("/rooms/{code}").route(web::delete().to(delete_room)));
    cfg.service(
        web::resource("/impostor-words")
            .route(web::get().to(list_impostor_words))
            .route(web::post().to(add_impostor_word)),
    );
    cfg.service(
        web::resource("/impostor-words/{id}").route(web::delete().to(delete_impostor_word)),
    );
}
