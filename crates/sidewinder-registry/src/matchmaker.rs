//! Quickplay matchmaking.

use sidewinder_protocol::RoomId;
use sidewinder_transport::EventSink;

use crate::{Registry, RegistryError, UpdateHook};

/// Picks a room for a quickplay request.
///
/// Scans live rooms in no particular order and returns the first
/// quickplay-flagged one with a free slot; when none qualifies, a fresh
/// quickplay room is created. Private rooms are never considered.
///
/// The returned id is only a suggestion until the caller joins it: the
/// capacity check runs again inside [`Registry::join_room`]. Callers that
/// race other joins must hold the registry lock across both the scan and
/// the join.
pub fn find_quickplay_room<E, H>(registry: &mut Registry<E, H>) -> Result<RoomId, RegistryError>
where
    E: EventSink,
    H: UpdateHook,
{
    let found = registry
        .rooms()
        .find(|room| room.is_quickplay() && !room.is_full())
        .map(|room| room.id().clone());

    match found {
        Some(id) => {
            tracing::debug!(room_id = %id, "quickplay matched to existing room");
            Ok(id)
        }
        None => registry.create_room(true),
    }
}

#[cfg(test)]
mod tests {
    use sidewinder_transport::NullSink;

    use super::*;
    use crate::{NoopHook, RegistryConfig};

    fn registry() -> Registry<NullSink, NoopHook> {
        registry_with(RegistryConfig::default())
    }

    fn registry_with(config: RegistryConfig) -> Registry<NullSink, NoopHook> {
        Registry::new(config, NullSink, NoopHook)
    }

    #[test]
    fn test_quickplay_creates_a_room_when_none_exists() {
        let mut reg = registry();

        let room_id = find_quickplay_room(&mut reg).unwrap();
        assert_eq!(reg.room_count(), 1);
        assert!(reg.room(&room_id).unwrap().is_quickplay());
    }

    #[test]
    fn test_quickplay_reuses_a_room_with_space() {
        let mut reg = registry();

        let first = find_quickplay_room(&mut reg).unwrap();
        let second = find_quickplay_room(&mut reg).unwrap();
        assert_eq!(first, second);
        assert_eq!(reg.room_count(), 1);
    }

    #[test]
    fn test_quickplay_ignores_private_rooms() {
        let mut reg = registry();
        let private = reg.create_room(false).unwrap();

        let matched = find_quickplay_room(&mut reg).unwrap();
        assert_ne!(matched, private);
        assert!(reg.room(&matched).unwrap().is_quickplay());
    }

    #[test]
    fn test_quickplay_skips_full_rooms() {
        use sidewinder_protocol::PlayerId;

        let mut reg = registry_with(RegistryConfig {
            room_capacity: 2,
            ..RegistryConfig::default()
        });
        for n in 1..=2u64 {
            reg.register_player(PlayerId(n));
        }

        let first = find_quickplay_room(&mut reg).unwrap();
        reg.join_room(PlayerId(1), &first).unwrap();
        reg.join_room(PlayerId(2), &first).unwrap();

        // First room is at capacity, so the next request opens a new one.
        let second = find_quickplay_room(&mut reg).unwrap();
        assert_ne!(first, second);
        assert_eq!(reg.room_count(), 2);
    }

    #[test]
    fn test_quickplay_fills_back_up_after_a_leave() {
        use sidewinder_protocol::PlayerId;

        let mut reg = registry_with(RegistryConfig {
            room_capacity: 2,
            ..RegistryConfig::default()
        });
        for n in 1..=3u64 {
            reg.register_player(PlayerId(n));
        }

        let room_id = find_quickplay_room(&mut reg).unwrap();
        reg.join_room(PlayerId(1), &room_id).unwrap();
        reg.join_room(PlayerId(2), &room_id).unwrap();
        reg.leave_room(PlayerId(1));

        // The freed slot is matched again before any new room opens.
        let matched = find_quickplay_room(&mut reg).unwrap();
        assert_eq!(matched, room_id);
        assert_eq!(reg.room_count(), 1);
    }
}
