//! Error types surfaced by the client.
//!
//! Pool exhaustion is deliberately not represented here: a full pool makes
//! `acquire` wait, it does not fail.

use thiserror::Error;

/// Result type for all client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the client.
///
/// All variants propagate directly to the caller of the failing operation;
/// the pool neither intercepts nor masks them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or IO failure while connecting, writing, or reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream closed before a declared frame was fully delivered.
    #[error("truncated frame: stream closed with {expected} byte(s) outstanding")]
    TruncatedFrame { expected: usize },

    /// The server reply did not match what the protocol requires.
    ///
    /// After this error the connection's state is no longer trustworthy;
    /// the design keeps no health tracking, so subsequent use of the same
    /// connection may fail arbitrarily.
    #[error("protocol violation: expected {expected:?}, server sent {actual:?}")]
    ProtocolViolation { expected: String, actual: String },

    /// The server sent a reply payload that is not valid UTF-8.
    #[error("invalid reply payload: {0}")]
    InvalidPayload(#[from] std::string::FromUtf8Error),
}
