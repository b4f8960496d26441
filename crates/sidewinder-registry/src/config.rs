//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum members per room.
    pub room_capacity: usize,

    /// Remove a room from the registry when its last member leaves.
    ///
    /// Off by default: an id handed to players stays joinable until the
    /// process restarts, even while the room sits empty.
    pub drop_empty_rooms: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            room_capacity: 8,
            drop_empty_rooms: false,
        }
    }
}
