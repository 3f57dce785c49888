//! The fixed request/response type codes (spec §6).

use crate::error::ProtoError;

/// The fixed set of request/response type codes. Values are exactly the
/// integer codes on the wire — never renumber these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestType {
    Login = 0,
    Logout = 1,
    DeclareQueue = 2,
    SendDataToQueue = 3,
    GetDataFromQueue = 4,
    AckMessage = 5,
    NotFound = 6,
    Forbidden = 7,
    DataWrong = 8,
    DeleteQueue = 9,
    ClearQueue = 10,
    GetSpeed = 11,
    GetStat = 12,
    DeleteAckMessageId = 13,
    RestoreAckMessageId = 14,
    RestoreSendMessage = 15,
    Ping = 16,
}

impl RequestType {
    /// The wire code for this type.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u64> for RequestType {
    type Error = ProtoError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let code = u8::try_from(value).map_err(|_| ProtoError::UnknownType(value))?;
        Self::try_from(code).map_err(|_| ProtoError::UnknownType(value))
    }
}

impl TryFrom<u8> for RequestType {
    type Error = ();

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Login,
            1 => Self::Logout,
            2 => Self::DeclareQueue,
            3 => Self::SendDataToQueue,
            4 => Self::GetDataFromQueue,
            5 => Self::AckMessage,
            6 => Self::NotFound,
            7 => Self::Forbidden,
            8 => Self::DataWrong,
            9 => Self::DeleteQueue,
            10 => Self::ClearQueue,
            11 => Self::GetSpeed,
            12 => Self::GetStat,
            13 => Self::DeleteAckMessageId,
            14 => Self::RestoreAckMessageId,
            15 => Self::RestoreSendMessage,
            16 => Self::Ping,
            _ => return Err(()),
        })
    }
}
