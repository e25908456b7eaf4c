//! Error types for the chat relay
//!
//! Defines application-level errors and registry errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Covers fatal per-connection errors (the handler terminates its own
/// connection) and internal channel failures.
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error on the connection's transport (fatal to that connection)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Peer closed the connection before sending a username
    #[error("connection closed before a username was received")]
    HandshakeFailed,

    /// Outbound channel closed (writer task gone)
    #[error("outbound channel closed")]
    ChannelSend,

    /// Registry rejected an operation
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Connection registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection is already registered
    #[error("connection is already registered")]
    DuplicateConnection,
}

/// Message send errors
///
/// Occurs when attempting to deliver to a connection whose writer task
/// has already gone away.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
