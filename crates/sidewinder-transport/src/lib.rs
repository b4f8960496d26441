//! Transport seam for the Sidewinder session core.
//!
//! The wire transport itself lives outside this workspace. Whatever carries
//! the traffic, the session core only needs its outbound half: unicast
//! emits, room-scoped broadcasts, and the channel membership that defines
//! each room's broadcast scope. [`EventSink`] is that seam.
//!
//! Inbound traffic takes the opposite path. The transport adapter calls
//! `connection_opened` / `connection_closed` on the server and feeds each
//! received `(event, payload)` pair into the per-connection gateway; no
//! trait is needed for a direction the core never initiates.

use serde_json::Value;
use sidewinder_protocol::{PlayerId, RoomId};

/// Outbound half of the transport.
///
/// Implementations are called with the registry lock held, so every method
/// must return without blocking. The expected shape is a handoff onto
/// per-connection send queues; delivery is best effort and failures stay
/// inside the transport.
///
/// Channel membership is keyed by connection. A connection is in at most
/// one room's channel at a time, which [`leave_channels`](Self::leave_channels)
/// enforces by detaching from everything.
pub trait EventSink: Send + Sync + 'static {
    /// Delivers an event to a single connection.
    fn emit(&self, to: PlayerId, event: &str, payload: Value);

    /// Delivers an event to every connection currently in the room's
    /// channel.
    fn broadcast(&self, room: &RoomId, event: &str, payload: Value);

    /// Adds a connection to a room's channel.
    fn join_channel(&self, conn: PlayerId, room: &RoomId);

    /// Removes a connection from every channel it is in.
    fn leave_channels(&self, conn: PlayerId);
}

/// A sink that discards everything.
///
/// Stands in for the transport in tests and in deployments that drive the
/// registry directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _to: PlayerId, _event: &str, _payload: Value) {}

    fn broadcast(&self, _room: &RoomId, _event: &str, _payload: Value) {}

    fn join_channel(&self, _conn: PlayerId, _room: &RoomId) {}

    fn leave_channels(&self, _conn: PlayerId) {}
}
