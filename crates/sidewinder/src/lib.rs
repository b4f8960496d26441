//! # Sidewinder
//!
//! Session core for a real-time multiplayer arcade server: player and
//! room registry, quickplay matchmaking, and a fixed 50 ms simulation
//! tick, all behind one [`GameServer`] facade.
//!
//! Two things live outside this workspace and plug in at construction
//! time:
//!
//! - the wire transport, through [`EventSink`]
//! - the per-player gameplay simulation, through [`UpdateHook`]
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let server = GameServer::builder().start(my_sink, my_hook);
//!
//! // In the transport's accept path:
//! let gateway = server.connection_opened(conn_id).await;
//!
//! // For every event the connection sends:
//! gateway.dispatch("room_create_request", serde_json::json!(true)).await;
//!
//! // When the connection goes away:
//! server.connection_closed(conn_id).await;
//! ```
//!
//! Every registry operation and every tick runs under a single lock, so
//! racing requests serialize and a room can never be driven past its
//! capacity.

mod gateway;
mod server;

pub use gateway::SessionGateway;
pub use server::{GameServer, GameServerBuilder, ServerStats};

pub use sidewinder_protocol::{PlayerId, RoomId, code, event};
pub use sidewinder_registry::{
    MAX_DISPLAY_NAME_LEN, NoopHook, Player, Registry, RegistryConfig, RegistryError, Room,
    UpdateHook, allocate_room_id, find_quickplay_room,
};
pub use sidewinder_tick::{Scheduler, TickConfig};
pub use sidewinder_transport::{EventSink, NullSink};
