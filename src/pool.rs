//! # Connection Pool
//!
//! Purpose: Share a fixed set of persistent connections between many
//! concurrent tasks with bounded checkout.
//!
//! ## Design Principles
//! 1. **Bounded Blocking**: A counting semaphore sized to the pool gates
//!    checkout; callers wait for a free connection, they never get an
//!    "exhausted" error and the pool never grows.
//! 2. **Scoped Checkout**: [`PooledConnection`] returns the connection and
//!    its permit on `Drop`, on success and on error alike.
//! 3. **Minimal Locking**: The idle-queue mutex is held only to push or pop
//!    a connection, never across an await point.
//! 4. **All-or-Nothing Startup**: Initialisation connects every socket up
//!    front; one failure fails the whole pool.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tracing::debug;

use crate::connection::Connection;
use crate::error::ClientResult;

/// Pool capacity used when none is configured.
pub const DEFAULT_POOL_SIZE: usize = 8;

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Server hostname or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Number of connections to open; also the checkout bound.
    pub size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            host: "127.0.0.1".to_string(),
            port: 6791,
            size: DEFAULT_POOL_SIZE,
        }
    }
}

struct PoolInner {
    idle: Mutex<VecDeque<Connection>>,
    permits: Semaphore,
}

/// Fixed-capacity pool of persistent connections.
///
/// The handle is cheap to clone; clones share the same connections.
///
/// Invariant: the semaphore's available permits always equal the number of
/// idle connections, so a caller holding a permit always finds one. At most
/// `size` connections exist and at most `size` callers hold a checkout at
/// any moment. Idle connections are interchangeable; checkout is FIFO,
/// though nothing depends on the order.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Connects `config.size` sockets and builds the pool.
    ///
    /// Connections are established eagerly and sequentially; if any attempt
    /// fails the whole initialisation fails and no pool is created.
    pub async fn initialise(config: PoolConfig) -> ClientResult<Self> {
        let mut idle = VecDeque::with_capacity(config.size);
        for _ in 0..config.size {
            idle.push_back(Connection::connect(&config.host, config.port).await?);
        }
        debug!(host = %config.host, port = config.port, size = config.size, "pool initialised");

        Ok(ConnectionPool {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(idle),
                permits: Semaphore::new(config.size),
            }),
        })
    }

    /// Checks a connection out of the pool, waiting until one is free.
    ///
    /// This is the only suspension point in the pool: with all connections
    /// checked out the caller waits indefinitely (no timeout, no error).
    /// The returned guard hands the connection back when dropped.
    pub async fn acquire(&self) -> PooledConnection {
        let permit = self
            .inner
            .permits
            .acquire()
            .await
            .expect("pool semaphore closed");
        // The guard re-adds the permit on drop, after the connection is
        // back in the idle queue.
        permit.forget();

        let conn = self
            .inner
            .idle
            .lock()
            .expect("pool mutex poisoned")
            .pop_front()
            .expect("permit held but no idle connection");

        PooledConnection {
            pool: Arc::clone(&self.inner),
            conn: Some(conn),
        }
    }
}

/// RAII checkout guard; derefs to [`Connection`].
///
/// While the guard lives, the caller owns the connection exclusively. On
/// drop the connection rejoins the idle queue and one permit becomes
/// available again, regardless of whether the operation that used it
/// succeeded.
pub struct PooledConnection {
    pool: Arc<PoolInner>,
    conn: Option<Connection>,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn.as_ref().expect("connection present until drop")
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn.as_mut().expect("connection present until drop")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => return,
        };
        // Queue before permit: a waiter woken by the permit must find the
        // connection already idle.
        self.pool
            .idle
            .lock()
            .expect("pool mutex poisoned")
            .push_back(conn);
        self.pool.permits.add_permits(1);
    }
}
