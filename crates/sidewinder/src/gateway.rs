//! Per-connection event dispatch.

use std::sync::Arc;

use serde_json::{Value, json};
use sidewinder_protocol::{PlayerId, RoomId, code, event};
use sidewinder_registry::{UpdateHook, find_quickplay_room};
use sidewinder_transport::EventSink;

use crate::server::ServerState;

/// Routes one connection's inbound events into the registry.
///
/// The transport holds one gateway per live connection and calls
/// [`dispatch`](Self::dispatch) with every `(event, payload)` pair it
/// receives. Responses and broadcasts flow back out through the server's
/// [`EventSink`]; nothing is returned to the caller.
///
/// No input ever drops the connection. Unknown events are logged and
/// ignored, and payloads of the wrong shape are answered with
/// `error_invalid_data` on the generic error event.
pub struct SessionGateway<E: EventSink, H: UpdateHook> {
    player: PlayerId,
    state: Arc<ServerState<E, H>>,
}

impl<E: EventSink, H: UpdateHook> SessionGateway<E, H> {
    pub(crate) fn new(player: PlayerId, state: Arc<ServerState<E, H>>) -> Self {
        Self { player, state }
    }

    /// The connection this gateway serves.
    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    /// Routes one inbound event.
    pub async fn dispatch(&self, event_name: &str, payload: Value) {
        tracing::trace!(player = %self.player, event = event_name, "dispatching");
        match event_name {
            event::ROOM_CREATE_REQUEST => self.on_create_room(payload).await,
            event::ROOM_JOIN_REQUEST => self.on_join_room(payload).await,
            event::ROOM_LEAVE_REQUEST => self.on_leave_room().await,
            event::PLAYER_SET_NAME_REQUEST => self.on_set_name(payload).await,
            event::PLAYER_INPUT_REQUEST => self.on_player_input(payload).await,
            event::DISCONNECT => self.on_disconnect().await,
            other => {
                tracing::debug!(player = %self.player, event = other, "unknown event ignored");
            }
        }
    }

    /// Create request: `true` asks the matchmaker for a quickplay seat,
    /// `false` opens a fresh private room. Either way the player ends up
    /// joined and the answer is a join response.
    async fn on_create_room(&self, payload: Value) {
        let Some(quickplay) = payload.as_bool() else {
            self.reject_payload("room create payload is not a bool").await;
            return;
        };

        let mut registry = self.state.registry.lock().await;
        // Matchmaking and join run under one lock acquisition, so the
        // found slot cannot be stolen in between.
        let created = if quickplay {
            find_quickplay_room(&mut registry)
        } else {
            registry.create_room(false)
        };
        let result = created.and_then(|room_id| registry.join_room(self.player, &room_id));

        match result {
            Ok(room_id) => {
                registry
                    .sink()
                    .emit(self.player, event::ROOM_JOIN_RESPONSE, json!(room_id.as_str()));
            }
            Err(e) => {
                tracing::warn!(player = %self.player, error = %e, "room create failed");
                registry
                    .sink()
                    .emit(self.player, event::ROOM_JOIN_RESPONSE, json!(e.code()));
            }
        }
    }

    /// Join request: the raw id is validated and case-folded before the
    /// registry sees it.
    async fn on_join_room(&self, payload: Value) {
        let Some(raw) = payload.as_str() else {
            self.reject_payload("room join payload is not a string").await;
            return;
        };

        let mut registry = self.state.registry.lock().await;
        let Some(room_id) = RoomId::parse(raw) else {
            tracing::debug!(player = %self.player, raw, "join with malformed room id");
            registry
                .sink()
                .emit(self.player, event::ROOM_JOIN_RESPONSE, json!(code::ROOM_INVALID_ID));
            return;
        };

        match registry.join_room(self.player, &room_id) {
            Ok(joined) => {
                registry
                    .sink()
                    .emit(self.player, event::ROOM_JOIN_RESPONSE, json!(joined.as_str()));
            }
            Err(e) => {
                tracing::debug!(player = %self.player, room_id = %room_id, error = %e, "join refused");
                registry
                    .sink()
                    .emit(self.player, event::ROOM_JOIN_RESPONSE, json!(e.code()));
            }
        }
    }

    async fn on_leave_room(&self) {
        let mut registry = self.state.registry.lock().await;
        let left = registry.leave_room(self.player);
        registry
            .sink()
            .emit(self.player, event::ROOM_LEAVE_RESPONSE, json!(left));
    }

    async fn on_set_name(&self, payload: Value) {
        let Some(proposed) = payload.as_str() else {
            self.reject_payload("set name payload is not a string").await;
            return;
        };

        let mut registry = self.state.registry.lock().await;
        match registry.set_display_name(self.player, proposed) {
            Ok(applied) => {
                registry
                    .sink()
                    .emit(self.player, event::PLAYER_SET_NAME_RESPONSE, json!(applied));
            }
            Err(e) => {
                tracing::debug!(player = %self.player, error = %e, "rename refused");
                registry
                    .sink()
                    .emit(self.player, event::PLAYER_SET_NAME_RESPONSE, json!(e.code()));
            }
        }
    }

    /// Input payloads are opaque here; the gameplay hook owns their shape.
    async fn on_player_input(&self, payload: Value) {
        let mut registry = self.state.registry.lock().await;
        registry.player_input(self.player, payload);
    }

    async fn on_disconnect(&self) {
        let mut registry = self.state.registry.lock().await;
        registry.remove_player(self.player);
    }

    async fn reject_payload(&self, reason: &str) {
        tracing::warn!(player = %self.player, reason, "malformed payload");
        let registry = self.state.registry.lock().await;
        registry
            .sink()
            .emit(self.player, event::ERROR, json!(code::INVALID_DATA));
    }
}
