//! Protocol Module
//!
//! Defines the line-based wire protocol spoken with the provisioning API.
//!
//! ## Exchange
//! ```text
//! server: 0 <greeting>
//! client: AUTH <username> <password>
//! server: 0 <text>
//! client: SET <number> <index> <destination>   |   DEAC <number>
//! server: <status> <text>
//! client: QUIT
//! ```
//!
//! Every message is a single `\n`-terminated line. A server line whose first
//! byte is `'0'` means success; anything else is a failure and the whole line
//! is kept as diagnostic text.

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::StatusLine;
pub use codec::{encode_command, read_status_line, write_command, LINE_TERMINATOR};
