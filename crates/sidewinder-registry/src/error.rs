//! Error types for registry operations.

use sidewinder_protocol::{PlayerId, RoomId, code};

/// Errors produced by registry operations.
///
/// None of these are fatal. Every variant maps to a wire error code via
/// [`code`](RegistryError::code) and degrades only the requesting session;
/// registry state is left exactly as it was before the failed call.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The allocator exhausted its random draws without finding a free id.
    #[error("room id generation failed")]
    IdGenerationFailed,

    /// No live room has this id.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The room has no free member slots.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// Another connected player already holds this display name.
    #[error("display name {0:?} is taken")]
    NameTaken(String),

    /// The player id is not registered.
    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),
}

impl RegistryError {
    /// The wire error code reported to the requesting connection.
    pub fn code(&self) -> &'static str {
        match self {
            Self::IdGenerationFailed => code::ROOM_ID_GENERATION_FAILED,
            Self::RoomNotFound(_) => code::ROOM_INVALID_ID,
            Self::RoomFull(_) => code::ROOM_FULL,
            Self::NameTaken(_) => code::PLAYER_NAME_TAKEN,
            Self::UnknownPlayer(_) => code::INVALID_DATA,
        }
    }
}
