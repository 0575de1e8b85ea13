//! Response definitions
//!
//! Represents a single status line returned by the server.

use std::fmt;

/// A raw server status line, trailing CR/LF removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    raw: String,
}

impl StatusLine {
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let trimmed = raw.trim_end_matches(['\r', '\n']).len();
        raw.truncate(trimmed);
        Self { raw }
    }

    /// Success is signalled solely by a leading ASCII `'0'`
    pub fn is_success(&self) -> bool {
        self.raw.as_bytes().first() == Some(&b'0')
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
