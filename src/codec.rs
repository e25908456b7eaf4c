//! Line-delimited JSON codec
//!
//! Encoding produces one canonical JSON object followed by a single `\n`.
//! Decoding accumulates raw bytes per connection, extracts complete lines,
//! and parses each as a [`WireMessage`]. Malformed lines are logged and
//! discarded without terminating the connection; partial trailing data is
//! retained for the next read.

use tracing::warn;

use crate::message::WireMessage;

/// Serialize a message to JSON plus trailing `\n`
///
/// The producer must not embed raw newlines in `prefix`/`payload`;
/// standard JSON string escaping covers everything else.
pub fn encode(msg: &WireMessage) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec(msg)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Per-connection accumulation buffer that splits raw bytes into lines
///
/// `push` appends incoming bytes and drains every complete `\n`-terminated
/// line. Empty lines are skipped; a trailing `\r` is stripped so clients
/// using CRLF line endings are handled too. Bytes after the last `\n` stay
/// buffered until the next read.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append incoming bytes and return all complete lines
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop(); // the '\n'
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.is_empty() {
                continue;
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// True if no partial line is pending
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Stream decoder for the server → client direction
///
/// Combines the line framer with JSON parsing. A line that fails to parse
/// is dropped; decoding continues with the next line already in the buffer.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    framer: LineFramer,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append incoming bytes and return every message decoded from them
    pub fn push(&mut self, bytes: &[u8]) -> Vec<WireMessage> {
        self.framer
            .push(bytes)
            .into_iter()
            .filter_map(|line| match serde_json::from_str(&line) {
                Ok(msg) => Some(msg),
                Err(e) => {
                    warn!("Discarding malformed frame: {}", e);
                    None
                }
            })
            .collect()
    }
}
