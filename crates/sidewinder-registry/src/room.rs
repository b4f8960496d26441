//! A room: a bounded member list plus its broadcast scope.

use serde_json::json;
use sidewinder_protocol::{PlayerId, RoomId, event};
use sidewinder_transport::EventSink;

use crate::UpdateHook;

/// A bounded set of players sharing one broadcast scope.
///
/// Rooms hold no game state; they are the unit of matchmaking, broadcast
/// and tick fan-out. Mutation goes through the
/// [`Registry`](crate::Registry), which validates capacity and membership
/// before touching the member list.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    quickplay: bool,
    capacity: usize,
    /// Member ids in join order.
    members: Vec<PlayerId>,
}

impl Room {
    pub(crate) fn new(id: RoomId, quickplay: bool, capacity: usize) -> Self {
        Self {
            id,
            quickplay,
            capacity,
            members: Vec::new(),
        }
    }

    /// The room's id.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Whether the matchmaker may place players here.
    pub fn is_quickplay(&self) -> bool {
        self.quickplay
    }

    /// Member capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current members in join order.
    pub fn members(&self) -> &[PlayerId] {
        &self.members
    }

    /// Number of current members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether the room has no free member slots.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Appends a member and announces the join to the room's channel.
    ///
    /// The caller has already checked capacity and added the joiner's
    /// connection to the channel, so the joiner hears its own join.
    pub(crate) fn add_member<E: EventSink>(
        &mut self,
        player: PlayerId,
        display_name: &str,
        sink: &E,
    ) {
        self.members.push(player);
        sink.broadcast(
            &self.id,
            event::ROOM_PLAYER_JOIN_BROADCAST,
            json!(display_name),
        );
        tracing::info!(
            room_id = %self.id,
            %player,
            name = display_name,
            members = self.members.len(),
            capacity = self.capacity,
            "player joined room"
        );
    }

    /// Removes a member and announces the leave.
    ///
    /// The caller has already detached the leaver from the channel, so the
    /// broadcast reaches only the remaining members. Removing an id that
    /// is not a member does nothing.
    pub(crate) fn remove_member<E: EventSink>(
        &mut self,
        player: PlayerId,
        display_name: &str,
        sink: &E,
    ) {
        let before = self.members.len();
        self.members.retain(|m| *m != player);
        if self.members.len() == before {
            return;
        }
        sink.broadcast(
            &self.id,
            event::ROOM_PLAYER_LEAVE_BROADCAST,
            json!(display_name),
        );
        tracing::info!(
            room_id = %self.id,
            %player,
            name = display_name,
            members = self.members.len(),
            capacity = self.capacity,
            "player left room"
        );
    }

    /// Runs one simulation step over this room's members.
    pub(crate) fn tick<H: UpdateHook>(&self, hook: &mut H) {
        // Membership as of tick start.
        let members = self.members.clone();
        for player in members {
            hook.update_player(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidewinder_transport::NullSink;

    fn room(capacity: usize) -> Room {
        Room::new(RoomId::from_u32(0xABCD), false, capacity)
    }

    #[test]
    fn test_new_room_is_empty() {
        let room = room(8);
        assert_eq!(room.member_count(), 0);
        assert!(room.members().is_empty());
        assert!(!room.is_full());
    }

    #[test]
    fn test_members_keep_join_order() {
        let mut room = room(8);
        for n in [3u64, 1, 2] {
            room.add_member(PlayerId(n), "p", &NullSink);
        }
        assert_eq!(
            room.members(),
            &[PlayerId(3), PlayerId(1), PlayerId(2)]
        );
    }

    #[test]
    fn test_is_full_at_exact_capacity() {
        let mut room = room(2);
        room.add_member(PlayerId(1), "a", &NullSink);
        assert!(!room.is_full());
        room.add_member(PlayerId(2), "b", &NullSink);
        assert!(room.is_full());
    }

    #[test]
    fn test_remove_unknown_member_is_a_no_op() {
        let mut room = room(8);
        room.add_member(PlayerId(1), "a", &NullSink);
        room.remove_member(PlayerId(99), "ghost", &NullSink);
        assert_eq!(room.members(), &[PlayerId(1)]);
    }

    #[test]
    fn test_tick_visits_members_in_join_order() {
        struct OrderHook(Vec<PlayerId>);
        impl UpdateHook for OrderHook {
            fn update_player(&mut self, player: PlayerId) {
                self.0.push(player);
            }
        }

        let mut room = room(8);
        for n in 1..=4u64 {
            room.add_member(PlayerId(n), "p", &NullSink);
        }

        let mut hook = OrderHook(Vec::new());
        room.tick(&mut hook);
        assert_eq!(
            hook.0,
            vec![PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)]
        );
    }
}
