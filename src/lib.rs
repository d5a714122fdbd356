//! # FrameKV Async Client
//!
//! Purpose: Provide a small async client for the FrameKV server's
//! length-prefixed text protocol, with connection pooling to keep a fixed
//! set of persistent sockets shared across tasks.
//!
//! ## Design Principles
//! 1. **Object Pool Pattern**: Reuse a bounded set of TCP connections;
//!    callers wait for a free one instead of opening more.
//! 2. **Scoped Checkout**: A checked-out connection travels in an RAII
//!    guard that returns it to the pool on every exit path.
//! 3. **Explicit Framing**: Frames are delivered whole or the read fails;
//!    truncation is never surfaced as a short buffer.
//! 4. **Fail Fast**: Protocol violations surface immediately as errors.

mod client;
mod connection;
mod error;
mod frame;
mod pool;

pub use client::{ClientConfig, KVClient};
pub use connection::Connection;
pub use error::{ClientError, ClientResult};
pub use pool::{ConnectionPool, PoolConfig, PooledConnection, DEFAULT_POOL_SIZE};
