//! Per-connection handler
//!
//! Runs the connection state machine: `AwaitingHandshake → Active → Closed`.
//! The first inbound line is the raw username (not JSON-framed); after
//! registration every line is either a slash command (answered privately)
//! or a chat message (broadcast to everyone else). A writer task owns the
//! outbound half so all writes to one connection stay totally ordered.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::broadcast::Broadcaster;
use crate::codec::{self, LineFramer};
use crate::commands;
use crate::error::AppError;
use crate::events::{EventBus, ServerEvent};
use crate::message::{sender_prefix, WireMessage};
use crate::registry::Registry;
use crate::types::{chat_message_id, ConnectionId};

/// Outbound channel capacity per connection
const OUTBOUND_BUFFER: usize = 32;

/// Read buffer size for inbound traffic
const READ_BUFFER: usize = 1024;

/// Handle one accepted TCP connection until it closes
///
/// Transport errors returned here are fatal to this connection only; the
/// accept loop logs them and moves on. Cleanup (unregister + leave
/// announcement) runs exactly once on every exit path past registration.
pub async fn handle_connection(
    stream: TcpStream,
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    events: EventBus,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let id = ConnectionId::new();
    debug!("New connection {} from {}", id, peer_addr);

    let (mut read_half, write_half) = stream.into_split();
    let (msg_tx, msg_rx) = mpsc::channel::<WireMessage>(OUTBOUND_BUFFER);
    tokio::spawn(write_loop(write_half, msg_rx));

    let mut framer = LineFramer::new();

    // AwaitingHandshake: an empty read before any line means no registration
    let (username, pending) = await_username(&mut read_half, &mut framer).await?;

    registry.register(id, username.clone(), msg_tx.clone())?;
    info!("Connection {} registered as '{}'", id, username);
    events.emit(ServerEvent::ClientConnected {
        username: username.clone(),
        addr: peer_addr,
    });

    // Join announcement goes to everyone, the new client included
    broadcaster
        .broadcast(&WireMessage::join_notice(&username), None)
        .await;

    let session = Session {
        id,
        username: username.clone(),
        registry: Arc::clone(&registry),
        broadcaster: broadcaster.clone(),
        events: events.clone(),
        reply_tx: msg_tx,
    };
    let result = session.run(&mut read_half, &mut framer, pending).await;

    // Closed: idempotent cleanup. A failed broadcast write may already
    // have unregistered this connection, forfeiting the leave notice.
    if registry.unregister(id).is_some() {
        broadcaster
            .broadcast(&WireMessage::leave_notice(&username), None)
            .await;
        events.emit(ServerEvent::ClientDisconnected {
            username: username.clone(),
        });
    }
    info!("Connection {} ('{}') closed", id, username);

    result
}

/// Read until the first complete line arrives
///
/// Returns the username and any further lines that came in the same
/// read, so nothing the client pipelined gets lost.
async fn await_username(
    read_half: &mut OwnedReadHalf,
    framer: &mut LineFramer,
) -> Result<(String, Vec<String>), AppError> {
    let mut buf = [0u8; READ_BUFFER];
    loop {
        let n = read_half.read(&mut buf).await?;
        if n == 0 {
            return Err(AppError::HandshakeFailed);
        }
        let mut lines = framer.push(&buf[..n]).into_iter();
        if let Some(username) = lines.next() {
            return Ok((username, lines.collect()));
        }
    }
}

/// Active-state context for one registered connection
struct Session {
    id: ConnectionId,
    username: String,
    registry: Arc<Registry>,
    broadcaster: Broadcaster,
    events: EventBus,
    reply_tx: mpsc::Sender<WireMessage>,
}

impl Session {
    /// Consume inbound lines until the peer closes or the transport fails
    async fn run(
        &self,
        read_half: &mut OwnedReadHalf,
        framer: &mut LineFramer,
        pending: Vec<String>,
    ) -> Result<(), AppError> {
        for line in pending {
            self.handle_line(line).await?;
        }

        let mut buf = [0u8; READ_BUFFER];
        loop {
            let n = read_half.read(&mut buf).await?;
            if n == 0 {
                return Ok(()); // peer closed
            }
            for line in framer.push(&buf[..n]) {
                self.handle_line(line).await?;
            }
        }
    }

    /// Dispatch one inbound line: slash command or chat broadcast
    async fn handle_line(&self, line: String) -> Result<(), AppError> {
        if line.starts_with('/') {
            let reply = commands::process(&self.username, &line, &self.registry.usernames());
            return self
                .reply_tx
                .send(reply)
                .await
                .map_err(|_| AppError::ChannelSend);
        }

        let msg_id = chat_message_id();
        let prefix = sender_prefix(&self.username);
        self.events.emit(ServerEvent::ChatMessage {
            id: msg_id.clone(),
            prefix: prefix.clone(),
            payload: line.clone(),
        });

        let msg = WireMessage::Chat {
            id: msg_id,
            prefix,
            payload: line,
        };
        self.broadcaster.broadcast(&msg, Some(self.id)).await;
        Ok(())
    }
}

/// Writer task: encodes and writes every outbound frame for one connection
async fn write_loop(mut write_half: OwnedWriteHalf, mut rx: mpsc::Receiver<WireMessage>) {
    while let Some(msg) = rx.recv().await {
        match codec::encode(&msg) {
            Ok(bytes) => {
                if let Err(e) = write_half.write_all(&bytes).await {
                    debug!("Write failed, ending writer task: {}", e);
                    break;
                }
            }
            Err(e) => {
                error!("Failed to serialize frame: {}", e);
                // Continue - don't break on serialization errors
            }
        }
    }
    let _ = write_half.shutdown().await;
}
