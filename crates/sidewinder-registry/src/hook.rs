//! The gameplay seam.
//!
//! The session core does not simulate anything. Each tick it walks every
//! room's member list and hands the ids to an [`UpdateHook`]; the hook
//! owns whatever per-player state the game needs, keyed by id.

use serde_json::Value;
use sidewinder_protocol::PlayerId;

/// Per-player simulation driven by the registry tick.
pub trait UpdateHook: Send + 'static {
    /// Advances one player's simulation.
    ///
    /// Called once per room member per tick, in join order within a room.
    /// Runs on the tick task with the registry lock held, so it must not
    /// block.
    fn update_player(&mut self, player: PlayerId);

    /// Receives an opaque input payload forwarded from the player's
    /// connection, to apply on the next tick. Ignored by default.
    fn handle_input(&mut self, _player: PlayerId, _payload: Value) {}

    /// Signals that a player left the registry, so per-player state can be
    /// dropped. No-op by default.
    fn player_removed(&mut self, _player: PlayerId) {}
}

/// A hook that does nothing.
///
/// For tests and lobby-only deployments where nothing is simulated yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl UpdateHook for NoopHook {
    fn update_player(&mut self, _player: PlayerId) {}
}
