//! Wire protocol definitions
//!
//! JSON-based server → client message protocol using Serde's tagged enum
//! for type-safe serialization/deserialization. Every frame is one JSON
//! object followed by a single `\n` (framing lives in [`crate::codec`]).

use serde::{Deserialize, Serialize};

use crate::types::server_message_id;

/// Display prefix for server announcements
pub const SERVER_PREFIX: &str = "📢 Servidor: ";

/// Display prefix for admin notifications
pub const ADMIN_PREFIX: &str = "📢 [ADMIN]: ";

/// Server → Client message
///
/// Tagged enum carried as one JSON object per line on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireMessage {
    /// A chat line; `id` uniquely identifies it for later deletion,
    /// `prefix` carries the sender display formatting
    Chat {
        id: String,
        prefix: String,
        payload: String,
    },
    /// Retract a previously delivered chat message by id
    Delete { id: String },
    /// Wipe the client's transcript
    Clear,
}

impl WireMessage {
    /// Build a chat frame from a sender's username
    pub fn chat(id: String, username: &str, payload: String) -> Self {
        Self::Chat {
            id,
            prefix: sender_prefix(username),
            payload,
        }
    }

    /// Build a server announcement (fresh `server_` id, server prefix)
    pub fn server_notice(payload: String) -> Self {
        Self::Chat {
            id: server_message_id(),
            prefix: SERVER_PREFIX.to_string(),
            payload,
        }
    }

    /// The join announcement broadcast when a client registers
    pub fn join_notice(username: &str) -> Self {
        Self::server_notice(format!("{} se ha unido al chat.", username))
    }

    /// The leave announcement broadcast when a client disconnects
    pub fn leave_notice(username: &str) -> Self {
        Self::server_notice(format!("{} se ha desconectado.", username))
    }
}

/// Display prefix for a chat message from `username`
pub fn sender_prefix(username: &str) -> String {
    format!("💬 {}: ", username)
}
