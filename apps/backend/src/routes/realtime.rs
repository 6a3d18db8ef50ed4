//! Realtime HTTP routes: WebSocket upgrades onto room channels.

use actix_web::web;

use crate::ws::session;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/rooms/{code}").route(web::get().to(session::upgrade)));
}
