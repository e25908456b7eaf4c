//! Basic type definitions for the chat relay
//!
//! Provides the `ConnectionId` newtype used as the registry key, plus
//! the message-id generators for the wire protocol.

use uuid::Uuid;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4 for type-safe connection identification.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generate a short 8-character id for a relayed chat message
pub fn chat_message_id() -> String {
    short_uuid(8)
}

/// Generate a `server_`-prefixed id for a server announcement
pub fn server_message_id() -> String {
    format!("server_{}", short_uuid(4))
}

/// Generate an `admin_`-prefixed id for an admin notification
pub fn admin_message_id() -> String {
    format!("admin_{}", short_uuid(4))
}

/// First `len` hex characters of a fresh UUID v4
fn short_uuid(len: usize) -> String {
    let mut s = Uuid::new_v4().simple().to_string();
    s.truncate(len);
    s
}
