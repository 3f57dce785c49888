//! A minimal internal TCP client for driving the broker's wire protocol.
//!
//! Used only by the send-log/ack-log replay procedures and the
//! redelivery worker's resend traffic — not exposed as a public driver
//! library (spec §1, §13).

use tokio::net::{TcpStream, ToSocketAddrs};

use qbroker_proto::{read_frame, write_frame, Request, Response};

use crate::error::ClientError;

/// A single authenticated connection to the broker.
#[derive(Debug)]
pub struct Client {
    stream: TcpStream,
}

impl Client {
    /// Opens a TCP connection to `addr`. Does not authenticate; call
    /// [`Self::login`] next.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await.map_err(qbroker_proto::ProtoError::Io)?;
        Ok(Self { stream })
    }

    /// Sends `request` as one frame and decodes the response frame.
    pub async fn call(&mut self, request: Request) -> Result<Response, ClientError> {
        let body = serde_json::to_vec(&request.to_json())?;
        write_frame(&mut self.stream, &body).await?;
        let resp_body = read_frame(&mut self.stream).await?;
        let response: Response = serde_json::from_slice(&resp_body)?;
        Ok(response)
    }

    /// Authenticates the connection. Required before any other request.
    pub async fn login(&mut self, user_name: &str, passwd: &str) -> Result<(), ClientError> {
        let response = self
            .call(Request::Login {
                user_name: user_name.to_string(),
                passwd: passwd.to_string(),
            })
            .await?;
        if response.status == 1 {
            Ok(())
        } else {
            Err(ClientError::LoginRejected(user_name.to_string()))
        }
    }

    /// Liveness check, used by the connection pool to validate a
    /// checked-out connection before handing it to a caller.
    pub async fn ping(&mut self) -> Result<bool, ClientError> {
        let response = self.call(Request::Ping).await?;
        Ok(response.status == 1)
    }

    /// `DECLARE_QUEUE`, tolerating `status=0` (already declared) since
    /// replay declares each queue unconditionally before restoring rows.
    pub async fn declare_queue_idempotent(&mut self, queue_name: &str) -> Result<(), ClientError> {
        self.call(Request::DeclareQueue {
            queue_name: queue_name.to_string(),
        })
        .await?;
        Ok(())
    }

    /// `RESTORE_SEND_MESSAGE`, requiring success.
    pub async fn restore_send_message(
        &mut self,
        queue_name: &str,
        message_id: &str,
        message_data: &str,
    ) -> Result<(), ClientError> {
        self.require_success(Request::RestoreSendMessage {
            queue_name: queue_name.to_string(),
            message_id: message_id.to_string(),
            message_data: message_data.to_string(),
        })
        .await
    }

    /// `RESTORE_ACK_MESSAGE_ID`, requiring success.
    pub async fn restore_ack_message_id(
        &mut self,
        queue_name: &str,
        message_id: &str,
    ) -> Result<(), ClientError> {
        self.require_success(Request::RestoreAckMessageId {
            queue_name: queue_name.to_string(),
            message_id: message_id.to_string(),
        })
        .await
    }

    /// `SEND_DATA_TO_QUEUE`, requiring success. Used by the redelivery
    /// worker to re-inject an aged payload under a fresh identifier.
    pub async fn send_data_to_queue(
        &mut self,
        queue_name: &str,
        message_data: &str,
    ) -> Result<(), ClientError> {
        self.require_success(Request::SendDataToQueue {
            queue_name: queue_name.to_string(),
            message_data: message_data.to_string(),
        })
        .await
    }

    /// `DELETE_ACK_MESSAGE_ID`, requiring success. Used by the
    /// redelivery worker to evict the original in-flight entry after a
    /// successful resend.
    pub async fn delete_ack_message_id(
        &mut self,
        queue_name: &str,
        message_id: &str,
    ) -> Result<(), ClientError> {
        self.require_success(Request::DeleteAckMessageId {
            queue_name: queue_name.to_string(),
            message_id: message_id.to_string(),
        })
        .await
    }

    async fn require_success(&mut self, request: Request) -> Result<(), ClientError> {
        let request_type = request.request_type();
        let response = self.call(request).await?;
        if response.status == 1 {
            Ok(())
        } else {
            Err(ClientError::RequestFailed {
                request_type: request_type.code(),
            })
        }
    }
}
