//! # Connection
//!
//! One persistent TCP socket to the server, translating the six store
//! operations into framed request/response pairs.

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::error::ClientResult;
use crate::frame;

/// A single live connection to the server.
///
/// Each operation performs exactly one framed write and one framed read.
/// `Connection` does no internal locking: a connection checked out of the
/// pool is exclusively owned by the caller, and must not be shared.
///
/// Connections are created only during pool initialisation and are never
/// reconnected. After an I/O or protocol error the connection's state is
/// unknown; this client keeps using it anyway (no health tracking), so a
/// socket fault degrades that connection for the rest of the process.
pub struct Connection {
    // Buffered reader reduces syscalls; writes go directly to the stream.
    reader: BufReader<TcpStream>,
    host: String,
    port: u16,
}

impl Connection {
    pub(crate) async fn connect(host: &str, port: u16) -> ClientResult<Self> {
        let stream = TcpStream::connect((host, port)).await?;
        // Disable Nagle to keep request latency low for small payloads.
        stream.set_nodelay(true)?;
        debug!(host, port, "connection established");

        Ok(Connection {
            reader: BufReader::new(stream),
            host: host.to_string(),
            port,
        })
    }

    /// Remote host this connection is bound to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Remote port this connection is bound to.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Fetches the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is missing. Keys must not contain
    /// spaces: the server splits commands on the first space, so a key with
    /// embedded whitespace silently changes the command's meaning. This is
    /// a protocol limitation, not enforced here.
    pub async fn get(&mut self, key: &str) -> ClientResult<Option<String>> {
        let reply = self.round_trip(&format!("GET {key}")).await?;
        frame::decode_value(&reply)
    }

    /// Stores `value` under `key`, returning the previous value if any.
    ///
    /// The reply semantics (previous value or nil) are defined by the
    /// server. Values containing spaces are a documented protocol
    /// limitation of the space-separated command grammar.
    pub async fn set(&mut self, key: &str, value: &str) -> ClientResult<Option<String>> {
        let reply = self.round_trip(&format!("SET {key} {value}")).await?;
        frame::decode_value(&reply)
    }

    /// Removes `key`, returning the value it held if any.
    pub async fn delete(&mut self, key: &str) -> ClientResult<Option<String>> {
        let reply = self.round_trip(&format!("DEL {key}")).await?;
        frame::decode_value(&reply)
    }

    /// Asks the server to echo `msg` back.
    pub async fn echo(&mut self, msg: &str) -> ClientResult<Option<String>> {
        let reply = self.round_trip(&format!("ECHO {msg}")).await?;
        frame::decode_value(&reply)
    }

    /// Pings the server. The reply must be exactly `PONG`.
    pub async fn ping(&mut self) -> ClientResult<String> {
        let reply = self.round_trip("PING").await?;
        frame::expect_literal(&reply, "PONG")?;
        Ok(reply)
    }

    /// Clears the entire store. The reply must be exactly `CLR`.
    pub async fn clear(&mut self) -> ClientResult<String> {
        let reply = self.round_trip("CLR").await?;
        frame::expect_literal(&reply, "CLR")?;
        Ok(reply)
    }

    /// One framed write followed by one framed read.
    async fn round_trip(&mut self, command: &str) -> ClientResult<String> {
        trace!(host = %self.host, port = self.port, command, "round trip");
        frame::write_frame(self.reader.get_mut(), command.as_bytes()).await?;
        let payload = frame::read_frame(&mut self.reader).await?;
        Ok(String::from_utf8(payload)?)
    }
}
