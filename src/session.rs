//! Provisioning session
//!
//! Connection lifecycle, handshake, and the redirect/deactivate commands.
//!
//! ## Lifecycle
//! ```text
//!   connect() ──► greeting '0'? ──► AUTH '0'? ──► Connected
//!                     │ no              │ no
//!                     ▼                 ▼
//!               Protocol error    Authentication error
//!
//!   Connected ──disconnect()/drop──► QUIT, close ──► Disconnected
//!   Connected ──transport error─────► close ──────► Disconnected
//! ```
//!
//! A session is single-threaded: each command is one line written followed
//! by one blocking line read. It is `Send` but not meant to be shared.

use std::fmt::Display;

use crate::config::Config;
use crate::destination::{strip_non_digits, Destination};
use crate::error::{MagratheaError, Result};
use crate::network::Connection;
use crate::protocol::{Command, StatusLine};

/// Public view of the session's connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Connection state together with the handle it owns
enum Link {
    Disconnected,
    Connected(Connection),
}

/// An authenticated session with the provisioning API
pub struct Session {
    config: Config,
    link: Link,
    last_error: Option<String>,
}

impl Session {
    /// Open a connection, read the greeting and authenticate.
    pub fn connect(config: Config) -> Result<Self> {
        let connection = handshake(&config)?;
        Ok(Self {
            config,
            link: Link::Connected(connection),
            last_error: None,
        })
    }

    /// Close any open connection and run the handshake again with the
    /// current config.
    pub fn reconnect(&mut self) -> Result<()> {
        if self.is_connected() {
            // a failed close still leaves us disconnected
            if let Err(e) = self.disconnect() {
                tracing::warn!("Close before reconnect failed: {}", e);
            }
        }
        let outcome = handshake(&self.config);
        let connection = self.record(outcome)?;
        self.link = Link::Connected(connection);
        Ok(())
    }

    /// Send `QUIT` and close the stream.
    ///
    /// Fails with `NotConnected` when no connection is open.
    pub fn disconnect(&mut self) -> Result<()> {
        let mut connection = match std::mem::replace(&mut self.link, Link::Disconnected) {
            Link::Connected(connection) => connection,
            Link::Disconnected => return self.record(Err(MagratheaError::NotConnected)),
        };

        // no reply is read for QUIT
        if let Err(e) = connection.send(&Command::Quit) {
            tracing::warn!("Failed to send QUIT to {}: {}", connection.peer_addr(), e);
        }
        let outcome = connection.close();
        self.record(outcome)
    }

    /// Redirect `number` to `target`.
    ///
    /// `kind` is the destination flag (`L`, `F`, `V`, `S`, `s`) and `index`
    /// selects one of the scheduled redirect slots (conventionally 1 to 3).
    /// The number and index are reduced to their digits; the target is
    /// validated before any I/O.
    pub fn set_redirect(
        &mut self,
        number: &str,
        target: &str,
        index: impl Display,
        kind: char,
    ) -> Result<()> {
        let outcome = self.try_set_redirect(number, target, &index.to_string(), kind);
        self.record(outcome)
    }

    /// Redirect to a landline in slot 1
    pub fn redirect(&mut self, number: &str, target: &str) -> Result<()> {
        self.set_redirect(number, target, 1, 'L')
    }

    /// Deactivate `number`. The number is sent exactly as given.
    pub fn deactivate(&mut self, number: &str) -> Result<()> {
        let outcome = self.try_deactivate(number);
        self.record(outcome)
    }

    /// Description of the most recent failure, if any has occurred.
    ///
    /// Successful calls leave this untouched, so it may be stale.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> ConnectionState {
        match self.link {
            Link::Connected(_) => ConnectionState::Connected,
            Link::Disconnected => ConnectionState::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Edit the config. Changes apply from the next [`Session::reconnect`].
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    fn try_set_redirect(&mut self, number: &str, target: &str, index: &str, kind: char) -> Result<()> {
        let destination = Destination::parse(kind, target)?;
        let command = Command::Set {
            number: strip_non_digits(number),
            index: strip_non_digits(index),
            destination,
        };
        self.execute(&command, "SET command")
    }

    fn try_deactivate(&mut self, number: &str) -> Result<()> {
        let command = Command::Deac {
            number: number.to_string(),
        };
        self.execute(&command, "deactivation")
    }

    /// Send a command on the live connection and check its status line
    fn execute(&mut self, command: &Command, context: &'static str) -> Result<()> {
        let connection = match &mut self.link {
            Link::Connected(connection) => connection,
            Link::Disconnected => return Err(MagratheaError::NotConnected),
        };

        tracing::debug!("Sending {:?}", command);
        let status = match connection.request(command) {
            Ok(status) => status,
            Err(e @ MagratheaError::Connection(_)) => {
                // stream state is unknown: a late reply would be read as the next status
                self.drop_link();
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        expect_success(status, |response| MagratheaError::Protocol { context, response })
    }

    /// Abandon the current connection without sending `QUIT`
    fn drop_link(&mut self) {
        if let Link::Connected(connection) = std::mem::replace(&mut self.link, Link::Disconnected) {
            tracing::warn!("Dropping connection to {} after transport failure", connection.peer_addr());
            if let Err(e) = connection.close() {
                tracing::debug!("Close after transport failure failed: {}", e);
            }
        }
    }

    /// Remember the description of a failed outcome
    fn record<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            self.last_error = Some(e.to_string());
        }
        outcome
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.is_connected() {
            if let Err(e) = self.disconnect() {
                tracing::debug!("Disconnect on drop failed: {}", e);
            }
        }
    }
}

/// Open the stream, check the greeting and authenticate
fn handshake(config: &Config) -> Result<Connection> {
    config.validate()?;

    let mut connection = Connection::open(config)?;

    let greeting = connection.receive()?;
    expect_success(greeting, |response| MagratheaError::Protocol {
        context: "connection",
        response,
    })?;

    let auth = Command::Auth {
        username: config.username.clone(),
        password: config.password.clone(),
    };
    let status = connection.request(&auth)?;
    expect_success(status, |response| MagratheaError::Authentication { response })?;

    tracing::debug!("Authenticated to {} as {}", connection.peer_addr(), config.username);
    Ok(connection)
}

fn expect_success(status: StatusLine, reject: impl FnOnce(String) -> MagratheaError) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    tracing::warn!("API rejected request: {}", status);
    Err(reject(status.into_string()))
}
