//! Length-prefixed frame I/O.
//!
//! Every frame is a 4-byte big-endian unsigned length followed by a JSON
//! object of exactly that many bytes. There is no pipelining: a caller
//! reads one frame, dispatches, and writes one response frame before
//! reading the next.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ProtoError, MAX_FRAME_LEN};

/// Reads one length-prefixed frame body from `reader`.
///
/// Returns [`ProtoError::FrameTooLarge`] without consuming the body if the
/// declared length exceeds [`MAX_FRAME_LEN`] — the caller MUST close the
/// connection on this error rather than attempt to resynchronize.
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtoError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(ProtoError::FrameTooLarge(len));
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    Ok(body)
}

/// Writes `body` as one length-prefixed frame to `writer` and flushes it.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    body: &[u8],
) -> Result<(), ProtoError> {
    if body.len() as u64 > MAX_FRAME_LEN as u64 {
        return Err(ProtoError::FrameTooLarge(body.len() as u32));
    }
    let len = body.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}
