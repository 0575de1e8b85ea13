//! Protocol codec
//!
//! Line framing for commands and status lines.

use std::io::{self, BufRead, Read, Write};

use crate::error::{MagratheaError, Result};
use super::{Command, StatusLine};

/// Terminator appended to every command line
pub const LINE_TERMINATOR: &str = "\n";

/// Longest status line accepted before the peer is considered broken
pub const MAX_LINE_LEN: usize = 8 * 1024;

/// Encode a command to bytes, terminator included.
///
/// A command whose fields would produce more than one line is refused.
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    let line = command.to_line();
    if line.contains(['\r', '\n']) {
        return Err(MagratheaError::Validation(format!(
            "{} command contains an embedded line break",
            command.verb()
        )));
    }

    let mut message = Vec::with_capacity(line.len() + LINE_TERMINATOR.len());
    message.extend_from_slice(line.as_bytes());
    message.extend_from_slice(LINE_TERMINATOR.as_bytes());
    Ok(message)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read exactly one status line from a stream
///
/// End of stream before any byte arrives is a connection error; a final
/// line without terminator is returned as-is.
pub fn read_status_line<R: BufRead>(reader: &mut R) -> Result<StatusLine> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Err(MagratheaError::Connection(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed by server",
        )));
    }
    if buf.len() > MAX_LINE_LEN && !buf.ends_with(b"\n") {
        return Err(MagratheaError::Connection(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("status line exceeds {} bytes", MAX_LINE_LEN),
        )));
    }

    Ok(StatusLine::new(String::from_utf8_lossy(&buf).into_owned()))
}
