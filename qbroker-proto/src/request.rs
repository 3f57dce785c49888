//! Request decoding.

use serde_json::Value;

use crate::error::ProtoError;
use crate::types::RequestType;

/// A decoded request. Every variant names exactly the fields spec §4.2
/// requires for that request type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login { user_name: String, passwd: String },
    Logout,
    DeclareQueue { queue_name: String },
    SendDataToQueue { queue_name: String, message_data: String },
    GetDataFromQueue { queue_name: String },
    AckMessage { queue_name: String, message_id: String },
    DeleteQueue { queue_name: String },
    ClearQueue { queue_name: String },
    GetSpeed { queue_name: String },
    GetStat,
    DeleteAckMessageId { queue_name: String, message_id: String },
    RestoreAckMessageId { queue_name: String, message_id: String },
    RestoreSendMessage {
        queue_name: String,
        message_id: String,
        message_data: String,
    },
    Ping,
}

impl Request {
    /// The request type code this value was (or would be) decoded from.
    pub fn request_type(&self) -> RequestType {
        match self {
            Self::Login { .. } => RequestType::Login,
            Self::Logout => RequestType::Logout,
            Self::DeclareQueue { .. } => RequestType::DeclareQueue,
            Self::SendDataToQueue { .. } => RequestType::SendDataToQueue,
            Self::GetDataFromQueue { .. } => RequestType::GetDataFromQueue,
            Self::AckMessage { .. } => RequestType::AckMessage,
            Self::DeleteQueue { .. } => RequestType::DeleteQueue,
            Self::ClearQueue { .. } => RequestType::ClearQueue,
            Self::GetSpeed { .. } => RequestType::GetSpeed,
            Self::GetStat => RequestType::GetStat,
            Self::DeleteAckMessageId { .. } => RequestType::DeleteAckMessageId,
            Self::RestoreAckMessageId { .. } => RequestType::RestoreAckMessageId,
            Self::RestoreSendMessage { .. } => RequestType::RestoreSendMessage,
            Self::Ping => RequestType::Ping,
        }
    }

    /// Parses a frame body into a [`Request`].
    ///
    /// Fails with [`ProtoError::InvalidJson`] if the body is not JSON,
    /// [`ProtoError::MissingType`]/[`ProtoError::UnknownType`] if `type`
    /// is absent or unrecognised, and [`ProtoError::MissingField`] if a
    /// request-specific field is missing or of the wrong shape.
    pub fn parse(body: &[u8]) -> Result<Self, ProtoError> {
        let value: Value = serde_json::from_slice(body)?;
        let obj = value.as_object().ok_or(ProtoError::MissingType)?;
        let type_code = obj
            .get("type")
            .and_then(Value::as_u64)
            .ok_or(ProtoError::MissingType)?;
        let request_type = RequestType::try_from(type_code)?;

        let field = |name: &'static str| -> Result<String, ProtoError> {
            obj.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(ProtoError::MissingField {
                    request_type: request_type.code(),
                    field: name,
                })
        };

        Ok(match request_type {
            RequestType::Login => Self::Login {
                user_name: field("user_name")?,
                passwd: field("passwd")?,
            },
            RequestType::Logout => Self::Logout,
            RequestType::DeclareQueue => Self::DeclareQueue {
                queue_name: field("queue_name")?,
            },
            RequestType::SendDataToQueue => Self::SendDataToQueue {
                queue_name: field("queue_name")?,
                message_data: field("message_data")?,
            },
            RequestType::GetDataFromQueue => Self::GetDataFromQueue {
                queue_name: field("queue_name")?,
            },
            RequestType::AckMessage => Self::AckMessage {
                queue_name: field("queue_name")?,
                message_id: field("message_id")?,
            },
            RequestType::DeleteQueue => Self::DeleteQueue {
                queue_name: field("queue_name")?,
            },
            RequestType::ClearQueue => Self::ClearQueue {
                queue_name: field("queue_name")?,
            },
            RequestType::GetSpeed => Self::GetSpeed {
                queue_name: field("queue_name")?,
            },
            RequestType::GetStat => Self::GetStat,
            RequestType::DeleteAckMessageId => Self::DeleteAckMessageId {
                queue_name: field("queue_name")?,
                message_id: field("message_id")?,
            },
            RequestType::RestoreAckMessageId => Self::RestoreAckMessageId {
                queue_name: field("queue_name")?,
                message_id: field("message_id")?,
            },
            RequestType::RestoreSendMessage => Self::RestoreSendMessage {
                queue_name: field("queue_name")?,
                message_id: field("message_id")?,
                message_data: field("message_data")?,
            },
            RequestType::Ping => Self::Ping,
            // NotFound/Forbidden/DataWrong are response-only codes.
            RequestType::NotFound | RequestType::Forbidden | RequestType::DataWrong => {
                return Err(ProtoError::UnknownType(type_code))
            }
        })
    }

    /// Encodes this request back into its wire JSON representation.
    /// Used by `qbroker-client` to build outgoing frames.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        map.insert("type".to_string(), Value::from(self.request_type().code()));
        match self {
            Self::Login { user_name, passwd } => {
                map.insert("user_name".to_string(), Value::from(user_name.clone()));
                map.insert("passwd".to_string(), Value::from(passwd.clone()));
            }
            Self::Logout | Self::GetStat | Self::Ping => {}
            Self::DeclareQueue { queue_name }
            | Self::DeleteQueue { queue_name }
            | Self::ClearQueue { queue_name }
            | Self::GetSpeed { queue_name }
            | Self::GetDataFromQueue { queue_name } => {
                map.insert("queue_name".to_string(), Value::from(queue_name.clone()));
            }
            Self::SendDataToQueue {
                queue_name,
                message_data,
            } => {
                map.insert("queue_name".to_string(), Value::from(queue_name.clone()));
                map.insert("message_data".to_string(), Value::from(message_data.clone()));
            }
            Self::AckMessage {
                queue_name,
                message_id,
            }
            | Self::DeleteAckMessageId {
                queue_name,
                message_id,
            }
            | Self::RestoreAckMessageId {
                queue_name,
                message_id,
            } => {
                map.insert("queue_name".to_string(), Value::from(queue_name.clone()));
                map.insert("message_id".to_string(), Value::from(message_id.clone()));
            }
            Self::RestoreSendMessage {
                queue_name,
                message_id,
                message_data,
            } => {
                map.insert("queue_name".to_string(), Value::from(queue_name.clone()));
                map.insert("message_id".to_string(), Value::from(message_id.clone()));
                map.insert("message_data".to_string(), Value::from(message_data.clone()));
            }
        }
        Value::Object(map)
    }
}
