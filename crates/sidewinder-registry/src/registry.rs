//! The registry: every connected player and live room in one place.

use std::collections::HashMap;

use serde_json::Value;
use sidewinder_protocol::{PlayerId, RoomId};
use sidewinder_transport::EventSink;

use crate::allocator::allocate_room_id;
use crate::{RegistryConfig, RegistryError, Room, UpdateHook};

/// Longest display name kept after truncation, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 16;

/// A connected player.
#[derive(Debug, Clone)]
pub struct Player {
    /// Transport-assigned connection id, stable for the connection's life.
    pub id: PlayerId,
    /// Display name, unique among connected players. Defaults to the id's
    /// rendering, clipped to the display limit.
    pub display_name: String,
    /// The room this player is in, if any.
    pub room: Option<RoomId>,
}

/// Owns every connected player and live room.
///
/// All mutation funnels through here so the invariants hold at every
/// return: a player is in at most one room, a member list never exceeds
/// capacity, and `Player::room` always points at a room that lists the
/// player back.
///
/// # Concurrency
///
/// The registry is not synchronized internally. It is built to sit behind
/// a single async mutex (`GameServer` owns one), which is what linearizes
/// racing joins against the capacity check and keeps tick execution from
/// overlapping membership changes.
pub struct Registry<E: EventSink, H: UpdateHook> {
    config: RegistryConfig,
    players: HashMap<PlayerId, Player>,
    rooms: HashMap<RoomId, Room>,
    sink: E,
    hook: H,
}

impl<E: EventSink, H: UpdateHook> Registry<E, H> {
    /// Creates an empty registry around a transport sink and gameplay hook.
    pub fn new(config: RegistryConfig, sink: E, hook: H) -> Self {
        Self {
            config,
            players: HashMap::new(),
            rooms: HashMap::new(),
            sink,
            hook,
        }
    }

    /// The transport sink, for callers that emit responses after an
    /// operation. The gateway does.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    // ------------------------------------------------------------------
    // Player lifecycle
    // ------------------------------------------------------------------

    /// Registers a new connection as a player.
    ///
    /// Ids are transport-assigned and must not repeat while live; if one
    /// does, the stale player is fully removed first and the id starts
    /// over with defaults.
    pub fn register_player(&mut self, id: PlayerId) -> &Player {
        if self.players.contains_key(&id) {
            tracing::warn!(player = %id, "id re-registered while live, replacing");
            self.remove_player(id);
        }

        let display_name = truncate_name(&id.to_string());
        tracing::info!(player = %id, name = %display_name, "player connected");
        self.players.entry(id).or_insert(Player {
            id,
            display_name,
            room: None,
        })
    }

    /// Removes a player, forcing a room leave first.
    ///
    /// Idempotent: returns `false` when the id is not registered.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if !self.players.contains_key(&id) {
            return false;
        }
        self.leave_room(id);
        self.players.remove(&id);
        self.hook.player_removed(id);
        tracing::info!(player = %id, "player disconnected");
        true
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    /// Creates an empty room and returns its id.
    pub fn create_room(&mut self, quickplay: bool) -> Result<RoomId, RegistryError> {
        let id = allocate_room_id(|candidate| self.rooms.contains_key(candidate))?;
        self.rooms.insert(
            id.clone(),
            Room::new(id.clone(), quickplay, self.config.room_capacity),
        );
        tracing::info!(room_id = %id, quickplay, "room created");
        Ok(id)
    }

    /// Moves a player into a room.
    ///
    /// The target is validated before anything is touched, so a failed
    /// join leaves the player's current membership as it was. On success
    /// the player leaves any prior room (with its leave broadcast), the
    /// connection enters the target's channel, and the join is announced
    /// to the whole room, the joiner included.
    ///
    /// Joining the room the player is already in succeeds without
    /// broadcasts or membership churn.
    pub fn join_room(
        &mut self,
        player: PlayerId,
        room_id: &RoomId,
    ) -> Result<RoomId, RegistryError> {
        let (display_name, current_room) = match self.players.get(&player) {
            Some(p) => (p.display_name.clone(), p.room.clone()),
            None => return Err(RegistryError::UnknownPlayer(player)),
        };

        if current_room.as_ref() == Some(room_id) {
            return Ok(room_id.clone());
        }

        match self.rooms.get(room_id) {
            None => return Err(RegistryError::RoomNotFound(room_id.clone())),
            Some(room) if room.is_full() => {
                return Err(RegistryError::RoomFull(room_id.clone()));
            }
            Some(_) => {}
        }

        // Target checks passed; only now touch current membership.
        self.leave_room(player);

        if let Some(p) = self.players.get_mut(&player) {
            p.room = Some(room_id.clone());
        }
        self.sink.join_channel(player, room_id);
        if let Some(room) = self.rooms.get_mut(room_id) {
            room.add_member(player, &display_name, &self.sink);
        }
        Ok(room_id.clone())
    }

    /// Removes the player from their current room, if any.
    ///
    /// Returns whether a room was left. The leaver's connection is
    /// detached from the channel before the broadcast goes out, so the
    /// leave announcement reaches only the remaining members.
    pub fn leave_room(&mut self, player: PlayerId) -> bool {
        let Some(p) = self.players.get_mut(&player) else {
            return false;
        };
        let Some(room_id) = p.room.take() else {
            return false;
        };
        let display_name = p.display_name.clone();

        self.sink.leave_channels(player);
        let now_empty = match self.rooms.get_mut(&room_id) {
            Some(room) => {
                room.remove_member(player, &display_name, &self.sink);
                room.member_count() == 0
            }
            None => false,
        };

        if now_empty && self.config.drop_empty_rooms {
            self.rooms.remove(&room_id);
            tracing::info!(room_id = %room_id, "empty room dropped");
        }
        true
    }

    // ------------------------------------------------------------------
    // Display names
    // ------------------------------------------------------------------

    /// Renames a player and returns the name that was applied.
    ///
    /// The proposed name is clipped to [`MAX_DISPLAY_NAME_LEN`] characters
    /// first; the uniqueness check runs on the clipped name, is
    /// case-sensitive, and ignores the renaming player, so re-applying
    /// one's own name succeeds.
    pub fn set_display_name(
        &mut self,
        player: PlayerId,
        proposed: &str,
    ) -> Result<String, RegistryError> {
        if !self.players.contains_key(&player) {
            return Err(RegistryError::UnknownPlayer(player));
        }

        let name = truncate_name(proposed);
        let taken = self
            .players
            .values()
            .any(|p| p.id != player && p.display_name == name);
        if taken {
            return Err(RegistryError::NameTaken(name));
        }

        if let Some(p) = self.players.get_mut(&player) {
            tracing::info!(player = %player, old = %p.display_name, new = %name, "player renamed");
            p.display_name = name.clone();
        }
        Ok(name)
    }

    /// Exact-match scan over every connected player's display name.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.players.values().any(|p| p.display_name == name)
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Runs one simulation step across every room.
    ///
    /// Members are visited in join order within a room; room order is
    /// unspecified. Players outside any room are not visited.
    pub fn tick(&mut self) {
        for room in self.rooms.values() {
            room.tick(&mut self.hook);
        }
    }

    /// Forwards an opaque input payload to the gameplay hook.
    pub fn player_input(&mut self, player: PlayerId, payload: Value) {
        if self.players.contains_key(&player) {
            self.hook.handle_input(player, payload);
        } else {
            tracing::debug!(player = %player, "input from unregistered player dropped");
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Looks up a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Looks up a room.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Iterates over all connected players.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Iterates over all live rooms.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Number of connected players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Ids of all live rooms, in no particular order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }
}

/// Clips a proposed name to the display limit, counting characters rather
/// than bytes.
fn truncate_name(proposed: &str) -> String {
    proposed.chars().take(MAX_DISPLAY_NAME_LEN).collect()
}
