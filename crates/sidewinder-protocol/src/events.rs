//! Event names and error codes shared with deployed clients.
//!
//! These strings are the wire contract: clients in the field match on them
//! byte for byte, so they are frozen. New vocabulary may be added, existing
//! entries never change.

/// Event identifiers.
///
/// Names ending in `_request` are client-to-server, `_response` answers the
/// requesting connection, and `_broadcast` goes to every member of a room's
/// channel.
pub mod event {
    /// Carries an error code to one client. Payload: a `code` string.
    pub const ERROR: &str = "error";

    /// Raised by the transport when a connection goes away. Never sent by
    /// clients deliberately; treated the same when it is.
    pub const DISCONNECT: &str = "disconnect";

    /// Asks for a room. Payload: `bool`, `true` for quickplay matchmaking,
    /// `false` for a fresh private room.
    pub const ROOM_CREATE_REQUEST: &str = "room_create_request";

    /// Asks to join an existing room. Payload: the room id string.
    pub const ROOM_JOIN_REQUEST: &str = "room_join_request";

    /// Answers a create or join request. Payload: the joined room's id on
    /// success, an error code otherwise.
    pub const ROOM_JOIN_RESPONSE: &str = "room_join_response";

    /// Asks to leave the current room. Payload: ignored.
    pub const ROOM_LEAVE_REQUEST: &str = "room_leave_request";

    /// Answers a leave request. Payload: `bool`, whether a room was left.
    pub const ROOM_LEAVE_RESPONSE: &str = "room_leave_response";

    /// Announces a join to the room, the joiner included. Payload: the
    /// joiner's display name.
    pub const ROOM_PLAYER_JOIN_BROADCAST: &str = "room_player_join_broadcast";

    /// Announces a leave to the remaining members. Payload: the leaver's
    /// display name.
    pub const ROOM_PLAYER_LEAVE_BROADCAST: &str = "room_player_leave_broadcast";

    /// Asks for a display name change. Payload: the proposed name.
    pub const PLAYER_SET_NAME_REQUEST: &str = "player_set_name_request";

    /// Answers a name change. Payload: the applied name on success, an
    /// error code otherwise.
    pub const PLAYER_SET_NAME_RESPONSE: &str = "player_set_name_response";

    /// Carries an opaque gameplay input to apply on the next tick.
    pub const PLAYER_INPUT_REQUEST: &str = "player_input_request";
}

/// Error code strings.
///
/// Every code starts with `error_`, which is how clients tell an error
/// payload from a success payload on the response events.
pub mod code {
    /// The payload did not have the shape the event requires.
    pub const INVALID_DATA: &str = "error_invalid_data";

    /// The room id allocator ran out of attempts.
    pub const ROOM_ID_GENERATION_FAILED: &str = "error_room_id_generation_failed";

    /// The room id is malformed or names no live room.
    pub const ROOM_INVALID_ID: &str = "error_room_invalid_id";

    /// The room has no free member slots.
    pub const ROOM_FULL: &str = "error_room_full";

    /// Another connected player already holds the proposed name.
    pub const PLAYER_NAME_TAKEN: &str = "error_player_name_taken";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_share_the_error_prefix() {
        // Clients rely on the prefix to classify response payloads.
        for c in [
            code::INVALID_DATA,
            code::ROOM_ID_GENERATION_FAILED,
            code::ROOM_INVALID_ID,
            code::ROOM_FULL,
            code::PLAYER_NAME_TAKEN,
        ] {
            assert!(c.starts_with("error_"), "{c} misses the error_ prefix");
        }
    }

    #[test]
    fn test_event_names_are_frozen() {
        // Deployed clients match on these exact strings.
        assert_eq!(event::ERROR, "error");
        assert_eq!(event::DISCONNECT, "disconnect");
        assert_eq!(event::ROOM_CREATE_REQUEST, "room_create_request");
        assert_eq!(event::ROOM_JOIN_REQUEST, "room_join_request");
        assert_eq!(event::ROOM_JOIN_RESPONSE, "room_join_response");
        assert_eq!(event::ROOM_LEAVE_REQUEST, "room_leave_request");
        assert_eq!(event::ROOM_LEAVE_RESPONSE, "room_leave_response");
        assert_eq!(event::ROOM_PLAYER_JOIN_BROADCAST, "room_player_join_broadcast");
        assert_eq!(event::ROOM_PLAYER_LEAVE_BROADCAST, "room_player_leave_broadcast");
        assert_eq!(event::PLAYER_SET_NAME_REQUEST, "player_set_name_request");
        assert_eq!(event::PLAYER_SET_NAME_RESPONSE, "player_set_name_response");
        assert_eq!(event::PLAYER_INPUT_REQUEST, "player_input_request");
    }
}
