//! Peer struct definition
//!
//! Represents a registered connection with its username and the channel
//! feeding its writer task.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::message::WireMessage;
use crate::types::ConnectionId;

/// A registered connection as seen by the broadcaster
///
/// Holds the connection id, the username received during the handshake,
/// and the sender half of the connection's outbound channel. Cloning a
/// `Peer` clones the channel handle, not the connection.
#[derive(Debug, Clone)]
pub struct Peer {
    /// Unique identifier for this connection
    pub id: ConnectionId,
    /// Username received in the handshake
    pub username: String,
    /// Server → Client message channel
    pub sender: mpsc::Sender<WireMessage>,
}

impl Peer {
    /// Create a new peer with the given id, username and sender channel
    pub fn new(id: ConnectionId, username: String, sender: mpsc::Sender<WireMessage>) -> Self {
        Self {
            id,
            username,
            sender,
        }
    }

    /// Send a message to this peer
    ///
    /// Blocks while the peer's outbound buffer is full. Returns an error
    /// if the writer task has exited (connection dead).
    pub async fn send(&self, msg: WireMessage) -> Result<(), SendError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| SendError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_peer_send() {
        let (tx, mut rx) = mpsc::channel(32);
        let peer = Peer::new(ConnectionId::new(), "alice".to_string(), tx);

        peer.send(WireMessage::Clear).await.unwrap();
        assert_eq!(rx.recv().await, Some(WireMessage::Clear));
    }

    #[tokio::test]
    async fn test_peer_send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(32);
        drop(rx);
        let peer = Peer::new(ConnectionId::new(), "alice".to_string(), tx);

        assert!(peer.send(WireMessage::Clear).await.is_err());
    }
}
