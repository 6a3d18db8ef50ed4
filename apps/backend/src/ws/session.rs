//! Per-connection WebSocket session actor.
//!
//! A session subscribes to exactly one room channel for its whole lifetime.
//! The server only pushes events; inbound frames are limited to protocol
//! control (ping/pong/close).

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::ws::hub::{RoomBroadcast, RoomChannelRegistry};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// GET /api/ws/rooms/{code} — upgrade to a room-channel subscription.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let room_code = path.into_inner().to_uppercase();

    // Reject subscriptions to rooms that don't exist.
    app_state.rooms.get_room(&room_code).await.map_err(AppError::from)?;

    let session = RoomSession::new(room_code, app_state.channels.clone());
    ws::start(session, &req, stream)
}

pub struct RoomSession {
    room_code: String,
    registry: Arc<RoomChannelRegistry>,
    /// Registration token, present while subscribed.
    token: Option<Uuid>,
    last_heartbeat: Instant,
}

impl RoomSession {
    fn new(room_code: String, registry: Arc<RoomChannelRegistry>) -> Self {
        Self {
            room_code,
            registry,
            token: None,
            last_heartbeat: Instant::now(),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.last_heartbeat) > CLIENT_TIMEOUT {
                info!(room = %act.room_code, "websocket client timed out, closing session");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for RoomSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
        let token = self
            .registry
            .register(&self.room_code, ctx.address().recipient());
        self.token = Some(token);
    }

    fn stopping(&mut self, _ctx: &mut Self::Context) -> Running {
        if let Some(token) = self.token.take() {
            self.registry.unregister(&self.room_code, token);
        }
        Running::Stop
    }
}

impl Handler<RoomBroadcast> for RoomSession {
    type Result = ();

    fn handle(&mut self, msg: RoomBroadcast, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for RoomSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            // The channel is push-only; inbound data frames are ignored.
            Ok(_) => {}
            Err(_) => ctx.stop(),
        }
    }
}
