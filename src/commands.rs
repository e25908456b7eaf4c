//! Slash-command processing
//!
//! Interprets client lines beginning with `/` into private replies. The
//! reply is a server-prefixed chat frame addressed to the issuing
//! connection only, never broadcast. Unknown commands never fail the
//! connection.

use tracing::debug;

use crate::message::WireMessage;

/// Usage text for `/help`
const HELP_TEXT: &str = "\
--- Comandos Disponibles ---
/help          Muestra esta ayuda.
/usuarios      Muestra los usuarios conectados.
--------------------------------";

/// Process one command line against a registry snapshot
///
/// `users` is the point-in-time username list, in join order. Returns the
/// private reply frame for the issuing client.
pub fn process(username: &str, line: &str, users: &[String]) -> WireMessage {
    // First word only; arguments after a space are ignored
    let command = line.split(' ').next().unwrap_or(line);
    debug!("Command {} from {}", command, username);

    let payload = match command {
        "/help" => HELP_TEXT.to_string(),
        "/usuarios" => {
            let mut listing = format!("Usuarios conectados ({}):", users.len());
            for (i, user) in users.iter().enumerate() {
                listing.push_str(&format!("\n  {}. {}", i + 1, user));
            }
            listing
        }
        _ => format!(
            "Comando '{}' no reconocido. Escribe /help para ver la lista.",
            command
        ),
    };

    WireMessage::server_notice(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SERVER_PREFIX;

    fn payload_of(msg: WireMessage) -> String {
        match msg {
            WireMessage::Chat { prefix, payload, .. } => {
                assert_eq!(prefix, SERVER_PREFIX);
                payload
            }
            other => panic!("command reply must be a chat frame, got {:?}", other),
        }
    }

    #[test]
    fn test_help() {
        let payload = payload_of(process("alice", "/help", &[]));
        assert!(payload.contains("/help"));
        assert!(payload.contains("/usuarios"));
    }

    #[test]
    fn test_usuarios_lists_in_join_order() {
        let users = vec!["alice".to_string(), "bob".to_string()];
        let payload = payload_of(process("bob", "/usuarios", &users));

        assert!(payload.starts_with("Usuarios conectados (2):"));
        assert!(payload.contains("\n  1. alice"));
        assert!(payload.contains("\n  2. bob"));
    }

    #[test]
    fn test_unknown_command_names_first_token() {
        let payload = payload_of(process("alice", "/foo bar baz", &[]));
        assert!(payload.contains("Comando '/foo' no reconocido"));
    }

    #[test]
    fn test_arguments_after_space_ignored() {
        let users = vec!["alice".to_string()];
        let payload = payload_of(process("alice", "/usuarios extra", &users));
        assert!(payload.starts_with("Usuarios conectados (1):"));
    }
}
