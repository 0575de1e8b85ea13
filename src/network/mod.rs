//! Network Module
//!
//! TCP transport for a provisioning session.
//!
//! ## Model
//! - One blocking stream per session
//! - Strict request/response: one line out, one line back
//! - Read/write deadlines surface as connection errors

mod connection;

pub use connection::Connection;
