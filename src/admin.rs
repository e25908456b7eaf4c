//! Operator-side actions
//!
//! The original server exposed these through its GUI panel; here they are
//! a handle on the core plus a small stdin console. Admin frames go to
//! every connected client, no sender exclusion.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::broadcast::Broadcaster;
use crate::events::{EventBus, ServerEvent};
use crate::message::{WireMessage, ADMIN_PREFIX};
use crate::types::admin_message_id;

/// Handle for operator actions against a running server
#[derive(Clone)]
pub struct Admin {
    broadcaster: Broadcaster,
    events: EventBus,
}

impl Admin {
    pub fn new(broadcaster: Broadcaster, events: EventBus) -> Self {
        Self {
            broadcaster,
            events,
        }
    }

    /// Broadcast an admin notification to all clients
    pub async fn notify(&self, text: &str) {
        let id = admin_message_id();
        self.events.emit(ServerEvent::AdminNotice {
            id: id.clone(),
            payload: text.to_string(),
        });
        let msg = WireMessage::Chat {
            id,
            prefix: ADMIN_PREFIX.to_string(),
            payload: text.to_string(),
        };
        self.broadcaster.broadcast(&msg, None).await;
    }

    /// Wipe the transcript of every connected client
    pub async fn clear_chats(&self) {
        self.events.emit(ServerEvent::ChatsCleared);
        self.broadcaster.broadcast(&WireMessage::Clear, None).await;
    }

    /// Retract a previously relayed message by id
    pub async fn delete_message(&self, id: &str) {
        self.events.emit(ServerEvent::MessageDeleted {
            id: id.to_string(),
        });
        let msg = WireMessage::Delete { id: id.to_string() };
        self.broadcaster.broadcast(&msg, None).await;
    }
}

/// Operator console on stdin
///
/// `/clear` wipes all client transcripts, `/delete <id>` retracts a
/// message, any other non-empty line is sent as an admin notification.
pub async fn console(admin: Admin) {
    info!("Admin console ready: /clear, /delete <id>, or a notification");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/clear" {
            admin.clear_chats().await;
        } else if let Some(id) = line.strip_prefix("/delete ") {
            let id = id.trim();
            if id.is_empty() {
                warn!("Usage: /delete <id>");
            } else {
                admin.delete_message(id).await;
            }
        } else {
            admin.notify(line).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use crate::registry::Registry;
    use crate::types::ConnectionId;

    fn subject() -> (Arc<Registry>, Admin) {
        let registry = Arc::new(Registry::new());
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        (registry, Admin::new(broadcaster, EventBus::new()))
    }

    #[tokio::test]
    async fn test_clear_reaches_every_client() {
        let (registry, admin) = subject();
        let mut receivers = Vec::new();
        for name in ["alice", "bob"] {
            let (tx, rx) = mpsc::channel(32);
            registry
                .register(ConnectionId::new(), name.to_string(), tx)
                .unwrap();
            receivers.push(rx);
        }

        admin.clear_chats().await;

        for rx in &mut receivers {
            assert_eq!(rx.try_recv(), Ok(WireMessage::Clear));
            assert!(rx.try_recv().is_err(), "clear must arrive exactly once");
        }
    }

    #[tokio::test]
    async fn test_delete_carries_id() {
        let (registry, admin) = subject();
        let (tx, mut rx) = mpsc::channel(32);
        registry
            .register(ConnectionId::new(), "alice".to_string(), tx)
            .unwrap();

        admin.delete_message("m1").await;

        assert_eq!(
            rx.try_recv(),
            Ok(WireMessage::Delete {
                id: "m1".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_notify_uses_admin_prefix() {
        let (registry, admin) = subject();
        let (tx, mut rx) = mpsc::channel(32);
        registry
            .register(ConnectionId::new(), "alice".to_string(), tx)
            .unwrap();

        admin.notify("mantenimiento en 5 minutos").await;

        match rx.try_recv().unwrap() {
            WireMessage::Chat { id, prefix, payload } => {
                assert!(id.starts_with("admin_"));
                assert_eq!(prefix, ADMIN_PREFIX);
                assert_eq!(payload, "mantenimiento en 5 minutos");
            }
            other => panic!("expected chat frame, got {:?}", other),
        }
    }
}
