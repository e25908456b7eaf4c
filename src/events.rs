//! Server event boundary
//!
//! The network core reports what happened through [`EventSink`] observers
//! instead of rendering anything itself. Presentation layers (the tracing
//! log, the chat log file, a future GUI) subscribe to the bus.

use std::sync::Arc;

use tracing::info;

/// Something the server core did or observed
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// The accept loop is up
    Listening { addr: String },
    /// A client completed the username handshake
    ClientConnected { username: String, addr: String },
    /// A registered client went away
    ClientDisconnected { username: String },
    /// A chat line was relayed
    ChatMessage {
        id: String,
        prefix: String,
        payload: String,
    },
    /// The operator sent a notification to all clients
    AdminNotice { id: String, payload: String },
    /// The operator wiped every client transcript
    ChatsCleared,
    /// The operator retracted a message by id
    MessageDeleted { id: String },
}

impl std::fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listening { addr } => write!(f, "Servidor escuchando en {}", addr),
            Self::ClientConnected { username, addr } => {
                write!(f, "🔗 {} se ha conectado desde {}", username, addr)
            }
            Self::ClientDisconnected { username } => {
                write!(f, "❌ {} (conexión cerrada).", username)
            }
            Self::ChatMessage { id, prefix, payload } => {
                write!(f, "[ID: {}] {}{}", id, prefix, payload)
            }
            Self::AdminNotice { id, payload } => {
                write!(f, "[ID: {}] 📢 [ADMIN]: {}", id, payload)
            }
            Self::ChatsCleared => {
                write!(f, "[ADMIN_ACTION] Admin ha limpiado las ventanas de chat.")
            }
            Self::MessageDeleted { id } => {
                write!(f, "[ADMIN_ACTION] Admin eliminó mensaje ID: {}", id)
            }
        }
    }
}

/// Observer of server events
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &ServerEvent);
}

/// Fan-out of server events to all subscribed sinks
///
/// Sinks are registered once at startup; the bus is then cheap to clone
/// into every handler task.
#[derive(Clone, Default)]
pub struct EventBus {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn emit(&self, event: ServerEvent) {
        for sink in &self.sinks {
            sink.on_event(&event);
        }
    }
}

/// Sink that forwards events to the tracing subscriber
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&self, event: &ServerEvent) {
        info!("{}", event);
    }
}
