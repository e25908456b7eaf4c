//! Server configuration
//!
//! Bind address and chat-log path, taken from the environment with
//! defaults matching the original deployment. The bind address may also
//! be given as the first CLI argument.

use std::env;
use std::path::PathBuf;

/// Default bind address
pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";

/// Default chat log file
pub const DEFAULT_LOG_FILE: &str = "chat_log.txt";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the accept loop binds to
    pub addr: String,
    /// Path of the append-only chat log
    pub log_file: PathBuf,
}

impl Config {
    /// Build from CLI argument / environment, falling back to defaults
    ///
    /// Precedence for the address: first CLI argument, then
    /// `CHAT_RELAY_ADDR`, then the default. The log path comes from
    /// `CHAT_RELAY_LOG`.
    pub fn from_env() -> Self {
        let addr = env::args()
            .nth(1)
            .or_else(|| env::var("CHAT_RELAY_ADDR").ok())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let log_file = env::var("CHAT_RELAY_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));
        Self { addr, log_file }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}
