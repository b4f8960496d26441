//! Drives the session core with an in-process transport stub.
//!
//! Two players connect, pick names, land in the same quickplay room and
//! get simulated for half a second. Every outbound event is printed
//! instead of hitting a socket.
//!
//! Run with: `cargo run -p sidewinder --example local_arcade`

use std::time::Duration;

use serde_json::{Value, json};
use sidewinder::{EventSink, GameServerBuilder, PlayerId, RoomId, UpdateHook, event};

/// Prints outbound traffic instead of writing to sockets.
struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, to: PlayerId, event: &str, payload: Value) {
        tracing::info!(%to, event, %payload, "emit");
    }

    fn broadcast(&self, room: &RoomId, event: &str, payload: Value) {
        tracing::info!(%room, event, %payload, "broadcast");
    }

    fn join_channel(&self, conn: PlayerId, room: &RoomId) {
        tracing::debug!(%conn, %room, "channel joined");
    }

    fn leave_channels(&self, conn: PlayerId) {
        tracing::debug!(%conn, "channels left");
    }
}

/// Counts simulation steps instead of moving snakes around.
#[derive(Default)]
struct StepCounter {
    steps: u64,
}

impl UpdateHook for StepCounter {
    fn update_player(&mut self, _player: PlayerId) {
        self.steps += 1;
    }

    fn handle_input(&mut self, player: PlayerId, payload: Value) {
        tracing::info!(%player, %payload, "input queued");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let server = GameServerBuilder::new().start(LogSink, StepCounter::default());

    let ada = server.connection_opened(PlayerId(1)).await;
    let lin = server.connection_opened(PlayerId(2)).await;

    ada.dispatch(event::PLAYER_SET_NAME_REQUEST, json!("ada")).await;
    lin.dispatch(event::PLAYER_SET_NAME_REQUEST, json!("lin")).await;

    // Both ask for quickplay and land together.
    ada.dispatch(event::ROOM_CREATE_REQUEST, json!(true)).await;
    lin.dispatch(event::ROOM_CREATE_REQUEST, json!(true)).await;

    ada.dispatch(event::PLAYER_INPUT_REQUEST, json!({ "turn": "left" }))
        .await;

    tokio::time::sleep(Duration::from_millis(500)).await;

    let stats = server.stats().await;
    tracing::info!(
        players = stats.players,
        rooms = stats.rooms,
        ticks = stats.ticks,
        "arcade running"
    );

    lin.dispatch(event::ROOM_LEAVE_REQUEST, json!(null)).await;
    server.connection_closed(PlayerId(2)).await;
    server.connection_closed(PlayerId(1)).await;

    server.shutdown().await;
}
