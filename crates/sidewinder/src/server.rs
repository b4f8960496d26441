//! The server facade: one registry behind one lock, plus the tick loop.

use std::sync::Arc;

use sidewinder_protocol::PlayerId;
use sidewinder_registry::{Registry, RegistryConfig, UpdateHook};
use sidewinder_tick::{Scheduler, TickConfig};
use sidewinder_transport::EventSink;
use tokio::sync::Mutex;

use crate::SessionGateway;

/// State shared between the server handle, its gateways, and the tick
/// task. The single mutex is the synchronization domain: everything that
/// reads or writes session state goes through it.
pub(crate) struct ServerState<E: EventSink, H: UpdateHook> {
    pub(crate) registry: Mutex<Registry<E, H>>,
}

/// Builder for a [`GameServer`].
///
/// ```rust,ignore
/// let server = GameServer::builder()
///     .registry_config(RegistryConfig { room_capacity: 4, ..Default::default() })
///     .start(sink, hook);
/// ```
#[derive(Debug, Default)]
pub struct GameServerBuilder {
    registry_config: RegistryConfig,
    tick_config: TickConfig,
}

impl GameServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the registry configuration.
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = config;
        self
    }

    /// Overrides the tick configuration.
    pub fn tick_config(mut self, config: TickConfig) -> Self {
        self.tick_config = config;
        self
    }

    /// Builds the server and starts its tick loop.
    ///
    /// Must run inside a Tokio runtime; the tick task is spawned here and
    /// begins immediately.
    pub fn start<E, H>(self, sink: E, hook: H) -> GameServer<E, H>
    where
        E: EventSink,
        H: UpdateHook,
    {
        let state = Arc::new(ServerState {
            registry: Mutex::new(Registry::new(self.registry_config, sink, hook)),
        });

        let tick_state = Arc::clone(&state);
        let scheduler = Scheduler::spawn(self.tick_config, move || {
            let state = Arc::clone(&tick_state);
            async move {
                state.registry.lock().await.tick();
            }
        });

        tracing::info!("game server started");
        GameServer { state, scheduler }
    }
}

/// A running session server.
///
/// Owns the registry, the quickplay matchmaker, and the fixed-rate tick
/// loop. The wire transport drives it from outside: call
/// [`connection_opened`](Self::connection_opened) when a connection is
/// accepted, feed inbound events to the returned [`SessionGateway`], and
/// call [`connection_closed`](Self::connection_closed) when the connection
/// goes away.
pub struct GameServer<E: EventSink, H: UpdateHook> {
    state: Arc<ServerState<E, H>>,
    scheduler: Scheduler,
}

impl<E: EventSink, H: UpdateHook> GameServer<E, H> {
    /// Builder with default configuration.
    pub fn builder() -> GameServerBuilder {
        GameServerBuilder::new()
    }

    /// Starts a server with default configuration.
    pub fn start(sink: E, hook: H) -> Self {
        GameServerBuilder::new().start(sink, hook)
    }

    /// Registers a newly accepted connection and returns its gateway.
    pub async fn connection_opened(&self, id: PlayerId) -> SessionGateway<E, H> {
        {
            let mut registry = self.state.registry.lock().await;
            registry.register_player(id);
        }
        SessionGateway::new(id, Arc::clone(&self.state))
    }

    /// Removes a closed connection's player. Idempotent, so transports
    /// that report a close more than once are harmless.
    pub async fn connection_closed(&self, id: PlayerId) {
        let mut registry = self.state.registry.lock().await;
        registry.remove_player(id);
    }

    /// Ticks completed since startup.
    pub fn tick_count(&self) -> u64 {
        self.scheduler.tick_count()
    }

    /// Point-in-time occupancy counters.
    pub async fn stats(&self) -> ServerStats {
        let registry = self.state.registry.lock().await;
        ServerStats {
            players: registry.player_count(),
            rooms: registry.room_count(),
            ticks: self.scheduler.tick_count(),
        }
    }

    /// Stops the tick loop and waits for an in-flight tick to finish.
    ///
    /// Connected players are not notified; the transport owns connection
    /// teardown.
    pub async fn shutdown(self) {
        self.scheduler.shutdown().await;
        tracing::info!("game server stopped");
    }
}

/// Occupancy counters reported by [`GameServer::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    /// Connected players.
    pub players: usize,
    /// Live rooms, empty ones included.
    pub rooms: usize,
    /// Ticks completed since startup.
    pub ticks: u64,
}
