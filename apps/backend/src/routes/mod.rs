use actix_web::web;

pub mod admin;
pub mod health;
pub mod realtime;
pub mod rooms;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wires these under the same scopes with CORS and
/// request-trace middleware on top; tests register the same paths directly
/// so endpoint behavior can be exercised without the wrappers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Room routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Admin routes: /api/admin/**
    cfg.service(web::scope("/api/admin").configure(admin::configure_routes));

    // Realtime routes: /api/ws/**
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
