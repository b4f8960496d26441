//! Player and room registry for the Sidewinder session core.
//!
//! This crate owns the session state of a running arcade server:
//!
//! - [`Registry`]: every connected player and live room, plus the
//!   operations that mutate them
//! - [`Room`]: a bounded member list doubling as a broadcast scope
//! - [`find_quickplay_room`]: quickplay matchmaking over the live rooms
//! - [`allocate_room_id`]: random allocation of eight-char hex room ids
//! - [`UpdateHook`]: the seam where the actual game plugs in
//!
//! The registry pushes outbound traffic through the
//! [`EventSink`](sidewinder_transport::EventSink) it is constructed with
//! and never touches sockets itself. It carries no synchronization of its
//! own; the `sidewinder` crate wraps it in the one mutex that serializes
//! request handling against the tick loop.

mod allocator;
mod config;
mod error;
mod hook;
mod matchmaker;
mod registry;
mod room;

pub use allocator::allocate_room_id;
pub use config::RegistryConfig;
pub use error::RegistryError;
pub use hook::{NoopHook, UpdateHook};
pub use matchmaker::find_quickplay_room;
pub use registry::{MAX_DISPLAY_NAME_LEN, Player, Registry};
pub use room::Room;
