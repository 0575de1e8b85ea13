//! # Magrathea
//!
//! Client for the Magrathea provisioning API, a line-based request/response
//! text protocol for managing call redirection on non-geographic numbers:
//! - Authenticated session over a plain TCP stream
//! - `SET` redirects to landline, fax, voicemail and message destinations
//! - `DEAC` deactivation
//! - Destination validation and normalization before any I/O
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Session                               │
//! │        (handshake, SET / DEAC, last error, teardown)         │
//! └──────────┬───────────────────────────────┬──────────────────┘
//!            │                               │
//!            ▼                               ▼
//!   ┌─────────────────┐             ┌─────────────────┐
//!   │   Destination   │             │   Connection    │
//!   │  (validation)   │             │  (TcpStream)    │
//!   └─────────────────┘             └────────┬────────┘
//!                                            │
//!                                            ▼
//!                                   ┌─────────────────┐
//!                                   │    Protocol     │
//!                                   │ (line framing)  │
//!                                   └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use magrathea::{Config, Session};
//!
//! # fn main() -> magrathea::Result<()> {
//! let config = Config::builder()
//!     .username("user")
//!     .password("secret")
//!     .build();
//!
//! let mut session = Session::connect(config)?;
//! session.set_redirect("0845 000 0000", "020 3555 0100", 1, 'L')?;
//! session.deactivate("08450000001")?;
//! session.disconnect()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod destination;
pub mod protocol;
pub mod network;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MagratheaError, Result};
pub use config::Config;
pub use destination::{Destination, DestinationKind};
pub use session::{ConnectionState, Session};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
