//! Connection Handler
//!
//! Owns the TCP stream to the provisioning API.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{MagratheaError, Result};
use crate::protocol::{read_status_line, write_command, Command, StatusLine};

/// A single open stream to the API
pub struct Connection {
    /// TCP stream reader (buffered for line reads)
    reader: BufReader<TcpStream>,

    /// TCP stream writer
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a stream to `config.server:config.port` and apply deadlines
    pub fn open(config: &Config) -> Result<Self> {
        let addrs: Vec<SocketAddr> = config.addr().to_socket_addrs()?.collect();
        let stream = connect_any(&addrs, config.connect_timeout_ms)?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.addr());

        // Disable Nagle's algorithm, every exchange is one short line
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let connection = Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        };
        connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;

        tracing::debug!("Connected to {}", connection.peer_addr);
        Ok(connection)
    }

    /// Configure read/write deadlines; 0 leaves that direction unbounded
    fn set_timeouts(&self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_timeout = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write_timeout = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.reader.get_ref().set_read_timeout(read_timeout)?;
        self.writer.get_ref().set_write_timeout(write_timeout)?;
        Ok(())
    }

    /// Write one command line
    pub fn send(&mut self, command: &Command) -> Result<()> {
        tracing::trace!("-> {}: {:?}", self.peer_addr, command);
        write_command(&mut self.writer, command)
    }

    /// Read one status line
    pub fn receive(&mut self) -> Result<StatusLine> {
        let line = read_status_line(&mut self.reader)?;
        tracing::trace!("<- {}: {}", self.peer_addr, line);
        Ok(line)
    }

    /// Send a command and read its status line
    pub fn request(&mut self, command: &Command) -> Result<StatusLine> {
        self.send(command)?;
        self.receive()
    }

    /// Shut down both directions of the stream.
    ///
    /// A peer that already hung up is not an error.
    pub fn close(self) -> Result<()> {
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {
                tracing::debug!("Peer {} already closed the stream", self.peer_addr);
            }
            Err(e) => return Err(MagratheaError::Connection(e)),
        }
        tracing::debug!("Closed connection to {}", self.peer_addr);
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Try each resolved address in turn, keeping the last failure
fn connect_any(addrs: &[SocketAddr], timeout_ms: u64) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        let attempt = if timeout_ms > 0 {
            TcpStream::connect_timeout(addr, Duration::from_millis(timeout_ms))
        } else {
            TcpStream::connect(addr)
        };
        match attempt {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
    }))
}
