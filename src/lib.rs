//! TCP Chat Relay Library
//!
//! A small real-time chat relay: clients connect over TCP, send a raw
//! username line as a handshake, then exchange chat lines. The server
//! relays messages to everyone else using a line-delimited JSON protocol
//! (`chat` / `delete` / `clear` frames).
//!
//! # Features
//! - Username handshake and join/leave announcements
//! - Broadcast fan-out with sender exclusion and dead-connection pruning
//! - Slash commands answered privately (`/help`, `/usuarios`)
//! - Admin operations: notifications, transcript clearing, deletion by id
//! - Append-only chat log file behind an observer boundary
//!
//! # Architecture
//! One task per connection plus a writer task per connection:
//! - The `Registry` is the single point of shared mutable state, behind
//!   one exclusive lock held only for map operations
//! - The `Broadcaster` iterates a registry snapshot, never holding the
//!   lock across a socket write
//! - Presentation (tracing, chat log file) subscribes to `ServerEvent`s
//!   instead of being called by the core
//!
//! # Example
//! ```ignore
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use chat_relay::{handle_connection, Broadcaster, EventBus, Registry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:5000").await.unwrap();
//!     let registry = Arc::new(Registry::new());
//!     let broadcaster = Broadcaster::new(Arc::clone(&registry));
//!     let events = EventBus::new();
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         tokio::spawn(handle_connection(
//!             stream,
//!             Arc::clone(&registry),
//!             broadcaster.clone(),
//!             events.clone(),
//!         ));
//!     }
//! }
//! ```

pub mod admin;
pub mod broadcast;
pub mod client;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod logfile;
pub mod message;
pub mod net;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use admin::Admin;
pub use broadcast::Broadcaster;
pub use client::Peer;
pub use codec::{encode, LineFramer, StreamDecoder};
pub use config::Config;
pub use error::{AppError, RegistryError, SendError};
pub use events::{EventBus, EventSink, ServerEvent, TracingSink};
pub use handler::handle_connection;
pub use logfile::ChatLog;
pub use message::WireMessage;
pub use registry::Registry;
pub use types::ConnectionId;
