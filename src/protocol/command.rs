//! Command definitions
//!
//! Represents the requests a client can send.

use std::fmt;

use crate::destination::Destination;

/// A client request
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// Credential handshake
    Auth { username: String, password: String },

    /// Redirect `number` at schedule slot `index` to `destination`
    Set {
        number: String,
        index: String,
        destination: Destination,
    },

    /// Deactivate a number
    Deac { number: String },

    /// End the session (no reply is sent)
    Quit,
}

impl Command {
    /// Protocol verb
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Auth { .. } => "AUTH",
            Command::Set { .. } => "SET",
            Command::Deac { .. } => "DEAC",
            Command::Quit => "QUIT",
        }
    }

    /// Render the command line, without terminator
    pub fn to_line(&self) -> String {
        match self {
            Command::Auth { username, password } => format!("AUTH {} {}", username, password),
            Command::Set {
                number,
                index,
                destination,
            } => format!("SET {} {} {}", number, index, destination.as_wire()),
            Command::Deac { number } => format!("DEAC {}", number),
            Command::Quit => "QUIT".to_string(),
        }
    }
}

// Keeps the password out of logs
impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Auth { username, .. } => write!(f, "AUTH {} ****", username),
            other => f.write_str(&other.to_line()),
        }
    }
}
