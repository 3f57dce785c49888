//! Protocol-level error types.

use thiserror::Error;

/// The hard cap on a single frame's declared body length: 16 MiB − 1.
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024 - 1;

/// Failure modes while decoding a frame or the request it carries.
///
/// Every variant here maps to "close the connection" per spec — none of
/// these are recoverable within a single request/response cycle.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// The transport failed before a full frame could be read or written.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The declared frame length exceeds [`MAX_FRAME_LEN`].
    #[error("frame length {0} exceeds the {MAX_FRAME_LEN} byte cap")]
    FrameTooLarge(u32),

    /// The frame body is not valid JSON.
    #[error("frame body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The JSON body parsed but is not an object, or the object has no
    /// usable `type` field.
    #[error("frame body has no recognised integer `type` field")]
    MissingType,

    /// The `type` field's value is not one of the fixed request codes.
    #[error("unrecognised request type code {0}")]
    UnknownType(u64),

    /// A request-specific required field is missing or has the wrong shape.
    #[error("request type {request_type} is missing required field `{field}`")]
    MissingField {
        /// The request type code that failed to parse.
        request_type: u8,
        /// The name of the missing/malformed field.
        field: &'static str,
    },
}
