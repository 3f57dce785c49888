//! Client-side error types.

use thiserror::Error;

/// Failures from driving a broker connection. This client is an internal
/// helper for journal replay and redelivery traffic, not the public
/// driver library (that remains an external collaborator per spec §1).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connection failed before a full request/response round-trip.
    #[error("transport error: {0}")]
    Transport(#[from] qbroker_proto::ProtoError),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// LOGIN was rejected by the broker.
    #[error("login rejected for user '{0}'")]
    LoginRejected(String),

    /// The broker answered with `status=0` for a request that this
    /// caller treats as must-succeed.
    #[error("request type {request_type} failed: status=0")]
    RequestFailed {
        /// The request type code that failed.
        request_type: u8,
    },
}
