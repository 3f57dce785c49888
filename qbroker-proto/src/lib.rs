//! # qbroker-proto — wire framing and request/response types
//!
//! Every request and response is a 4-byte big-endian length prefix
//! followed by a JSON object of exactly that many bytes ([`frame`]). The
//! fixed set of request codes is [`types::RequestType`]; [`request::Request`]
//! decodes a frame body into one of them, and [`response::Response`]
//! encodes the broker's reply.
//!
//! This crate deliberately does not implement the legacy hex `K...J`
//! "message window" envelope used by older revisions of the system this
//! protocol is drawn from — only the length-prefixed framing is current.

pub mod error;
pub mod frame;
pub mod request;
pub mod response;
pub mod types;

pub use error::{ProtoError, MAX_FRAME_LEN};
pub use frame::{read_frame, write_frame};
pub use request::Request;
pub use response::Response;
pub use types::RequestType;
