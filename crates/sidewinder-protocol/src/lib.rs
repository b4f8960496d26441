//! Wire vocabulary for the Sidewinder session core.
//!
//! Everything the server and its clients must agree on lives here:
//!
//! - [`PlayerId`] and [`RoomId`]: the identifier newtypes
//! - [`event`]: the event name strings
//! - [`code`]: the error code strings
//!
//! Payload encoding and transport framing are absent. The deployed
//! clients speak an event-per-message protocol where payloads are single
//! JSON scalars, and the transport adapter owns that layer.

mod events;
mod ids;

pub use events::{code, event};
pub use ids::{PlayerId, RoomId};
