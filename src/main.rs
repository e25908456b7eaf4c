//! TCP Chat Relay - Entry Point
//!
//! Builds the registry, broadcaster and event sinks, binds the listener,
//! and accepts connections. A bind failure is fatal; everything after
//! that only ever kills its own connection.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chat_relay::{
    admin, handle_connection, Admin, Broadcaster, ChatLog, Config, EventBus, Registry,
    ServerEvent, TracingSink,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with environment filter
    // Use RUST_LOG env var to control log level
    // e.g., RUST_LOG=debug or RUST_LOG=chat_relay=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chat_relay=info")),
        )
        .init();

    let config = Config::from_env();

    let registry = Arc::new(Registry::new());
    let broadcaster = Broadcaster::new(Arc::clone(&registry));

    let mut events = EventBus::new();
    events.subscribe(Arc::new(TracingSink));
    events.subscribe(Arc::new(ChatLog::new(&config.log_file)));

    // Bind failure is the one fatal startup error
    let listener = TcpListener::bind(&config.addr).await?;
    events.emit(ServerEvent::Listening {
        addr: config.addr.clone(),
    });
    if let Some(ip) = chat_relay::net::local_ip() {
        info!("LAN address: {}", ip);
    }

    // Operator console on stdin
    let admin_handle = Admin::new(broadcaster.clone(), events.clone());
    tokio::spawn(admin::console(admin_handle));

    // Connection accept loop
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let registry = Arc::clone(&registry);
                let broadcaster = broadcaster.clone();
                let events = events.clone();

                // Spawn handler task for each connection
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, registry, broadcaster, events).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
