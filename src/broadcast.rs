//! Broadcast fan-out
//!
//! Takes a registry snapshot and delivers a message to every registered
//! connection except an optional excluded sender. A failed delivery prunes
//! that connection from the registry and never aborts delivery to the rest.

use std::sync::Arc;

use tracing::debug;

use crate::message::WireMessage;
use crate::registry::Registry;
use crate::types::ConnectionId;

/// Fans messages out to all registered connections
///
/// Cheap to clone; all clones share the same registry.
#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<Registry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Deliver `msg` to every registered connection except `exclude`
    ///
    /// Iterates a point-in-time snapshot, so registrations racing with the
    /// broadcast may or may not be included. A connection whose writer task
    /// has exited is unregistered (best-effort, idempotent) and delivery
    /// continues with the remaining connections. No retries.
    pub async fn broadcast(&self, msg: &WireMessage, exclude: Option<ConnectionId>) {
        for peer in self.registry.snapshot() {
            if Some(peer.id) == exclude {
                continue;
            }
            if peer.send(msg.clone()).await.is_err() {
                debug!("Dropping dead connection {} ({})", peer.id, peer.username);
                self.registry.unregister(peer.id);
            }
        }
    }
}
