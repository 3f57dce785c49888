//! Response encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RequestType;

/// A response frame: echoes the request `type`, carries a 0/1 `status`,
/// and a `json_obj` array (empty for acknowledgements, one element for
/// data-returning calls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub r#type: u8,
    pub status: u8,
    pub json_obj: Vec<Value>,
}

impl Response {
    /// A bare success response with an empty payload.
    pub fn success(request_type: RequestType) -> Self {
        Self {
            r#type: request_type.code(),
            status: 1,
            json_obj: Vec::new(),
        }
    }

    /// A success response carrying a single-element payload.
    pub fn success_with(request_type: RequestType, item: Value) -> Self {
        Self {
            r#type: request_type.code(),
            status: 1,
            json_obj: vec![item],
        }
    }

    /// A bare failure response with an empty payload.
    pub fn fail(request_type: RequestType) -> Self {
        Self {
            r#type: request_type.code(),
            status: 0,
            json_obj: Vec::new(),
        }
    }

    /// A failure response carrying a single-element payload (e.g. the
    /// `[null]` GET_DATA_FROM_QUEUE returns on an empty queue).
    pub fn fail_with(request_type: RequestType, item: Value) -> Self {
        Self {
            r#type: request_type.code(),
            status: 0,
            json_obj: vec![item],
        }
    }

    /// Authentication failure: `type=FORBIDDEN`, connection closes after.
    pub fn forbidden() -> Self {
        Self {
            r#type: RequestType::Forbidden.code(),
            status: 0,
            json_obj: Vec::new(),
        }
    }

    /// Protocol malformation where the body parsed but named no
    /// recognised request: `type=DATA_WRONG`, connection closes after.
    pub fn data_wrong() -> Self {
        Self {
            r#type: RequestType::DataWrong.code(),
            status: 0,
            json_obj: Vec::new(),
        }
    }

    /// Serializes this response to its wire JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
