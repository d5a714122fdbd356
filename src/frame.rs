//! # Frame Codec
//!
//! Purpose: Encode and decode the length-prefixed frames exchanged with the
//! FrameKV server, and interpret reply payloads.
//!
//! ## Design Principles
//! 1. **State-Free**: Every function is a pure transform over a buffer or
//!    stream; the codec keeps no state between calls.
//! 2. **All-or-Nothing Reads**: A frame is returned whole or the read fails
//!    with [`ClientError::TruncatedFrame`]; short buffers never escape.
//! 3. **Sentinel-Aware Decoding**: The `(nil)` sentinel and the fixed
//!    verb-plus-space reply prefix are interpreted here, not by callers.
//! 4. **Fail Fast**: Malformed replies are protocol violations, raised
//!    immediately.

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ClientError, ClientResult};

/// Size of the big-endian length prefix on every frame.
pub const HEADER_LEN: usize = 4;

/// Reply payload signaling the absence of a value.
pub const NIL_SENTINEL: &str = "(nil)";

/// Length of the verb-plus-space prefix on value-carrying replies,
/// e.g. `"GET "` in `"GET somevalue"`.
pub const VERB_PREFIX_LEN: usize = 4;

/// Encodes a payload into a frame: 4-byte big-endian length, then the bytes.
///
/// The only size constraint is that the payload length fits in 32 bits;
/// callers are expected to keep commands small.
pub fn encode(payload: &[u8]) -> BytesMut {
    let mut frame = BytesMut::with_capacity(HEADER_LEN + payload.len());
    frame.put_u32(payload.len() as u32);
    frame.put_slice(payload);
    frame
}

/// Writes one frame to the stream.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> ClientResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode(payload)).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one complete frame payload from the stream.
///
/// Blocks until the declared number of bytes has arrived. If the stream
/// closes first, this fails with [`ClientError::TruncatedFrame`] instead of
/// returning whatever bytes were available.
pub async fn read_frame<R>(reader: &mut R) -> ClientResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_LEN];
    read_exact_or_truncated(reader, &mut header).await?;

    let len = u32::from_be_bytes(header) as usize;
    let mut payload = vec![0u8; len];
    read_exact_or_truncated(reader, &mut payload).await?;
    Ok(payload)
}

async fn read_exact_or_truncated<R>(reader: &mut R, buf: &mut [u8]) -> ClientResult<()>
where
    R: AsyncRead + Unpin,
{
    reader.read_exact(buf).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            ClientError::TruncatedFrame { expected: buf.len() }
        } else {
            ClientError::Io(err)
        }
    })?;
    Ok(())
}

/// Decodes a value-carrying reply payload.
///
/// `"(nil)"` means no value. Anything else must start with the fixed
/// four-byte verb-plus-space echo of the command (`"GET "`, `"SET "`,
/// `"DEL "`); the remainder is the value. A reply too short to carry the
/// prefix is a protocol violation.
pub fn decode_value(payload: &str) -> ClientResult<Option<String>> {
    if payload == NIL_SENTINEL {
        return Ok(None);
    }
    match payload.get(VERB_PREFIX_LEN..) {
        Some(value) => Ok(Some(value.to_string())),
        None => Err(ClientError::ProtocolViolation {
            expected: "a verb-prefixed reply or (nil)".to_string(),
            actual: payload.to_string(),
        }),
    }
}

/// Validates an exact-literal reply (`PONG`, `CLR`) by equality.
///
/// A mismatch is fatal for the operation: prefix-stripping does not apply
/// to these commands, and an unexpected reply means the connection state
/// can no longer be trusted.
pub fn expect_literal(payload: &str, literal: &str) -> ClientResult<()> {
    if payload == literal {
        Ok(())
    } else {
        Err(ClientError::ProtocolViolation {
            expected: literal.to_string(),
            actual: payload.to_string(),
        })
    }
}
