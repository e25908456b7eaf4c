//! Connection registry
//!
//! The single point of mutation for live connections. All reads and
//! mutations happen under one exclusive lock, held only for the duration
//! of the map operation or snapshot copy, never across a socket write.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::Peer;
use crate::error::RegistryError;
use crate::message::WireMessage;
use crate::types::ConnectionId;

struct Entry {
    peer: Peer,
    /// Registration order, used to keep snapshots in join order
    seq: u64,
}

#[derive(Default)]
struct Inner {
    clients: HashMap<ConnectionId, Entry>,
    next_seq: u64,
}

/// Mapping of live connections to usernames
///
/// Entries are added only after a successful username handshake and removed
/// exactly once, by whichever path (read-loop exit or failed broadcast
/// write) first detects the failure. `snapshot` returns a point-in-time
/// copy so the broadcaster never iterates under the lock.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere; the map is still valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a connection after its username handshake
    ///
    /// Fails with `DuplicateConnection` if the connection is already
    /// present (should not occur given the single accept-to-register path).
    pub fn register(
        &self,
        id: ConnectionId,
        username: String,
        sender: mpsc::Sender<WireMessage>,
    ) -> Result<(), RegistryError> {
        let mut inner = self.lock();
        if inner.clients.contains_key(&id) {
            return Err(RegistryError::DuplicateConnection);
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.clients.insert(
            id,
            Entry {
                peer: Peer::new(id, username, sender),
                seq,
            },
        );
        debug!("Registered {} ({} clients)", id, inner.clients.len());
        Ok(())
    }

    /// Remove a connection, returning its username
    ///
    /// Idempotent: a second call for the same connection is a no-op
    /// returning `None`.
    pub fn unregister(&self, id: ConnectionId) -> Option<String> {
        let mut inner = self.lock();
        let entry = inner.clients.remove(&id)?;
        debug!("Unregistered {} ({} clients)", id, inner.clients.len());
        Some(entry.peer.username)
    }

    /// Point-in-time copy of all registered peers, in join order
    pub fn snapshot(&self) -> Vec<Peer> {
        let inner = self.lock();
        let mut entries: Vec<_> = inner.clients.values().collect();
        entries.sort_by_key(|e| e.seq);
        entries.iter().map(|e| e.peer.clone()).collect()
    }

    /// Usernames of all registered peers, in join order
    pub fn usernames(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|p| p.username).collect()
    }

    /// Number of registered connections
    pub fn len(&self) -> usize {
        self.lock().clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
