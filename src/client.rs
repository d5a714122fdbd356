//! # Client API
//!
//! Purpose: Expose a compact async API for issuing FrameKV commands,
//! hiding pooling and framing behind one facade.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `KVClient` owns the pool; callers never see
//!    connections unless they want to manage checkout themselves.
//! 2. **One Round Trip per Call**: Each method acquires a connection,
//!    performs a single request/response, and releases it.
//! 3. **Fail Fast**: Framing and protocol errors surface immediately.

use crate::error::ClientResult;
use crate::pool::{ConnectionPool, PoolConfig, DEFAULT_POOL_SIZE};

/// Configuration for the client and its pool.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Pool capacity (number of persistent connections).
    pub size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: "127.0.0.1".to_string(),
            port: 6791,
            size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Async client with connection pooling.
///
/// This is a facade over [`ConnectionPool`]: every call checks a connection
/// out, runs one framed request/response, and returns it to the pool when
/// the call finishes, whether it succeeded or failed.
pub struct KVClient {
    pool: ConnectionPool,
}

impl KVClient {
    /// Connects a client with the default pool size.
    pub async fn connect(host: impl Into<String>, port: u16) -> ClientResult<Self> {
        Self::with_config(ClientConfig {
            host: host.into(),
            port,
            ..ClientConfig::default()
        })
        .await
    }

    /// Connects a client with a custom configuration.
    ///
    /// Establishes every pooled connection up front; any connect failure
    /// fails construction.
    pub async fn with_config(config: ClientConfig) -> ClientResult<Self> {
        let pool = ConnectionPool::initialise(PoolConfig {
            host: config.host,
            port: config.port,
            size: config.size,
        })
        .await?;
        Ok(KVClient { pool })
    }

    /// Fetches a value by key. Returns `Ok(None)` when the key is missing.
    pub async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let mut conn = self.pool.acquire().await;
        conn.get(key).await
    }

    /// Stores a value, returning the previous value if the server reports
    /// one.
    pub async fn set(&self, key: &str, value: &str) -> ClientResult<Option<String>> {
        let mut conn = self.pool.acquire().await;
        conn.set(key, value).await
    }

    /// Deletes a key, returning the value it held if any.
    pub async fn delete(&self, key: &str) -> ClientResult<Option<String>> {
        let mut conn = self.pool.acquire().await;
        conn.delete(key).await
    }

    /// Echoes a message off the server.
    pub async fn echo(&self, msg: &str) -> ClientResult<Option<String>> {
        let mut conn = self.pool.acquire().await;
        conn.echo(msg).await
    }

    /// Pings the server; the reply must be exactly `PONG`.
    pub async fn ping(&self) -> ClientResult<String> {
        let mut conn = self.pool.acquire().await;
        conn.ping().await
    }

    /// Clears the entire store; the reply must be exactly `CLR`.
    pub async fn clear(&self) -> ClientResult<String> {
        let mut conn = self.pool.acquire().await;
        conn.clear().await
    }
}
