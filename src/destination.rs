//! Redirect destinations
//!
//! Validates raw destination strings against their kind and produces the
//! protocol-ready form sent in a `SET` command.
//!
//! | Flag | Kind         | Accepts                          | Wire form        |
//! |------|--------------|----------------------------------|------------------|
//! | `L`  | Landline     | UK `01`/`02` number, 8+ digits   | `44` + national  |
//! | `F`  | Fax          | email address                    | `F:<email>`      |
//! | `V`  | Voicemail    | email address                    | `V:<email>`      |
//! | `S`  | Sms          | `<alnum>@<alnum>` identifier     | `S:<identifier>` |
//! | `s`  | ShortMessage | `<alnum>@<alnum>` identifier     | `s:<identifier>` |
//!
//! `I` and `H` exist upstream but are not supported here.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{MagratheaError, Result};

static LANDLINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[12]\d{6,}$").expect("Invalid landline regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z](\.?[[:alnum:]_-]+)*@([[:alnum:]_-]+\.)+[a-zA-Z]{2,6}$")
        .expect("Invalid email regex")
});

static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:alnum:]]+@[[:alnum:]]+").expect("Invalid identifier regex"));

/// Destination kinds accepted by `SET`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    Landline,
    Fax,
    Voicemail,
    Sms,
    ShortMessage,
}

impl DestinationKind {
    /// Map a single-character kind flag. `I`, `H` and anything else are rejected.
    pub fn from_flag(flag: char) -> Result<Self> {
        match flag {
            'L' => Ok(DestinationKind::Landline),
            'F' => Ok(DestinationKind::Fax),
            'V' => Ok(DestinationKind::Voicemail),
            'S' => Ok(DestinationKind::Sms),
            's' => Ok(DestinationKind::ShortMessage),
            other => Err(invalid(other, "unsupported destination kind")),
        }
    }

    /// The flag character, also used as the wire prefix for non-landline kinds
    pub fn flag(self) -> char {
        match self {
            DestinationKind::Landline => 'L',
            DestinationKind::Fax => 'F',
            DestinationKind::Voicemail => 'V',
            DestinationKind::Sms => 'S',
            DestinationKind::ShortMessage => 's',
        }
    }
}

/// A validated, protocol-ready redirect target.
///
/// Only obtainable through [`Destination::parse`] / [`Destination::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    kind: DestinationKind,
    wire: String,
}

impl Destination {
    /// Validate `raw` against the kind named by `flag`
    pub fn parse(flag: char, raw: &str) -> Result<Self> {
        Self::new(DestinationKind::from_flag(flag)?, raw)
    }

    /// Validate and normalize `raw` for `kind`
    pub fn new(kind: DestinationKind, raw: &str) -> Result<Self> {
        let wire = match kind {
            DestinationKind::Landline => {
                let digits = strip_non_digits(raw);
                if !LANDLINE_PATTERN.is_match(&digits) {
                    return Err(invalid(kind.flag(), "not a UK landline number"));
                }
                // national 0 -> country code 44
                format!("44{}", &digits[1..])
            }
            DestinationKind::Fax | DestinationKind::Voicemail => {
                if !EMAIL_PATTERN.is_match(raw) {
                    return Err(invalid(kind.flag(), "not a valid email address"));
                }
                format!("{}:{}", kind.flag(), raw)
            }
            DestinationKind::Sms | DestinationKind::ShortMessage => {
                if raw.chars().any(char::is_whitespace) || !IDENTIFIER_PATTERN.is_match(raw) {
                    return Err(invalid(kind.flag(), "not a valid message identifier"));
                }
                format!("{}:{}", kind.flag(), raw)
            }
        };

        Ok(Self { kind, wire })
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }

    /// Normalized form as it appears on the `SET` line
    pub fn as_wire(&self) -> &str {
        &self.wire
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire)
    }
}

/// Drop every character that is not an ASCII digit
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn invalid(flag: char, reason: &str) -> MagratheaError {
    MagratheaError::Validation(format!("Invalid destination type '{}': {}", flag, reason))
}
