//! Configuration for the Magrathea client
//!
//! Centralized session settings with sensible defaults. The recognized
//! settings form a closed set; anything else is rejected.

use serde::{Deserialize, Serialize};

use crate::error::{MagratheaError, Result};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Provisioning API host name or address
    pub server: String,

    /// Provisioning API TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Credentials
    // -------------------------------------------------------------------------
    pub username: String,
    pub password: String,

    // -------------------------------------------------------------------------
    // Transport deadlines (milliseconds, 0 = none)
    // -------------------------------------------------------------------------
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "api.magrathea-telecom.co.uk".to_string(),
            port: 777,
            username: String::new(),
            password: String::new(),
            connect_timeout_ms: 10_000,
            read_timeout_ms: 10_000,
            write_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Settings addressable by name through [`Config::get`] / [`Config::set`]
    pub const KEYS: [&'static str; 4] = ["server", "port", "username", "password"];

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from defaults plus named settings.
    ///
    /// Fails on the first unrecognized key or unparsable value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Config::default();
        for (key, value) in pairs {
            config.set(key.as_ref(), value.as_ref())?;
        }
        Ok(config)
    }

    /// Read a named setting, `None` if the key is not recognized
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server" => Some(self.server.clone()),
            "port" => Some(self.port.to_string()),
            "username" => Some(self.username.clone()),
            "password" => Some(self.password.clone()),
            _ => None,
        }
    }

    /// Set a named setting. Unrecognized keys leave the config untouched.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server" => self.server = value.to_string(),
            "port" => {
                self.port = value.trim().parse().map_err(|_| {
                    MagratheaError::Config(format!("invalid port '{}'", value))
                })?
            }
            "username" => self.username = value.to_string(),
            "password" => self.password = value.to_string(),
            _ => {
                return Err(MagratheaError::Config(format!(
                    "unrecognized setting '{}'",
                    key
                )))
            }
        }
        Ok(())
    }

    /// `server:port` as handed to the resolver
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Check the config can produce a well-formed handshake
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(MagratheaError::Config("server must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(MagratheaError::Config("port must not be 0".to_string()));
        }
        // AUTH is space separated; a blank or control char would split the line
        for (name, value) in [("username", &self.username), ("password", &self.password)] {
            if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(MagratheaError::Config(format!(
                    "{} must not contain whitespace or control characters",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the API host
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.config.server = server.into();
        self
    }

    /// Set the API port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
