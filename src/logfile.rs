//! Append-only chat log file
//!
//! One `[YYYY-MM-DD HH:MM:SS] <message>` line per event. The file is
//! created if absent, opened in append mode per write, and never rotated
//! or truncated. Writes are serialized under their own lock, independent
//! of the connection registry.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing::error;

use crate::events::{EventSink, ServerEvent};

pub struct ChatLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Append one timestamped line to the log file
    pub fn append(&self, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{}] {}\n", timestamp, message);

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl EventSink for ChatLog {
    fn on_event(&self, event: &ServerEvent) {
        if let Err(e) = self.append(&event.to_string()) {
            error!("Failed to write chat log: {}", e);
        }
    }
}
