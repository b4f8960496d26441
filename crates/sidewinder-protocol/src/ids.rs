//! Identifier newtypes shared across the session core.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a connected player.
///
/// Assigned by the transport when it accepts a connection and stable for
/// that connection's lifetime. A reconnect is a new connection and gets a
/// new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Room identifier: exactly eight lowercase hexadecimal characters.
///
/// The inner string is private so the format holds by construction. The
/// two ways in are [`RoomId::from_u32`], which left-pads a random draw,
/// and [`RoomId::parse`], which validates and case-folds client input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Length of every room id, in characters.
    pub const LEN: usize = 8;

    /// Formats a 32-bit value as a left-padded lowercase hex id.
    ///
    /// Every `u32` maps to exactly one id, so the id space holds
    /// 2^32 rooms.
    pub fn from_u32(value: u32) -> Self {
        Self(format!("{value:08x}"))
    }

    /// Parses a client-supplied id.
    ///
    /// Uppercase hex digits are folded to lowercase before use, so
    /// `"00C0FFEE"` and `"00c0ffee"` name the same room. Returns `None`
    /// unless the input is exactly eight hex characters.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != Self::LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(raw.to_ascii_lowercase()))
    }

    /// The id as a string slice, for wire payloads.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Decoded ids take the `parse` path and carry the same format invariant
// as constructed ones.
impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RoomId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid room id: {raw:?}")))
    }
}
