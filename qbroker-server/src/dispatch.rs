//! Request dispatch — spec §4.2's fourteen contracts.
//!
//! One [`Dispatcher`] is shared (via `Arc`) by every connection handler. It
//! owns no per-connection state; [`crate::connection`] threads the
//! [`Session`] through each call.

use std::sync::Arc;
use std::time::Instant;

use qbroker_proto::{Request, RequestType, Response};
use qbroker_rt::mailbox::{AtomicMetrics, BoundedMailboxSender, MailboxSender};
use qbroker_rt::message::MessageEnvelope;
use qbroker_journal::{AckLogEvent, SendLogEvent};
use qbroker_osl::logging::{ActivityLog, ActivityLogger};
use qbroker_store::{BrokerStore, Session, StoreError};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Shared broker state and collaborators needed to answer any request.
pub struct Dispatcher {
    store: Arc<BrokerStore>,
    send_log_tx: BoundedMailboxSender<SendLogEvent, AtomicMetrics>,
    ack_log_tx: BoundedMailboxSender<AckLogEvent, AtomicMetrics>,
    activity_logger: Arc<dyn ActivityLogger>,
    user_name: String,
    passwd: String,
}

/// Whether the connection handler must close the socket after writing the
/// response (spec §4.2/§7: FORBIDDEN, DATA_WRONG, and LOGOUT all close).
pub struct Dispatched {
    pub response: Response,
    pub must_close: bool,
}

impl Dispatcher {
    pub fn new(
        store: Arc<BrokerStore>,
        send_log_tx: BoundedMailboxSender<SendLogEvent, AtomicMetrics>,
        ack_log_tx: BoundedMailboxSender<AckLogEvent, AtomicMetrics>,
        activity_logger: Arc<dyn ActivityLogger>,
        user_name: String,
        passwd: String,
    ) -> Self {
        Self {
            store,
            send_log_tx,
            ack_log_tx,
            activity_logger,
            user_name,
            passwd,
        }
    }

    /// Answers one request, updating `session`'s authentication state as a
    /// side effect of a successful LOGIN.
    pub async fn dispatch(&self, request: Request, session: &mut Session) -> Dispatched {
        let started = Instant::now();
        let request_type = request.request_type();

        if !session.is_authenticated() && !matches!(request, Request::Login { .. }) {
            self.log(
                &request_type,
                None,
                "Error: FORBIDDEN (unauthenticated)",
                started,
                true,
            )
            .await;
            return Dispatched {
                response: Response::forbidden(),
                must_close: true,
            };
        }

        let (response, must_close) = match request {
            Request::Login { user_name, passwd } => self.handle_login(session, &user_name, &passwd),
            Request::Logout => (Response::success(RequestType::Logout), true),
            Request::DeclareQueue { queue_name } => (self.handle_declare(&queue_name), false),
            Request::SendDataToQueue {
                queue_name,
                message_data,
            } => (self.handle_send(&queue_name, message_data).await, false),
            Request::GetDataFromQueue { queue_name } => {
                (self.handle_fetch(&queue_name).await, false)
            }
            Request::AckMessage {
                queue_name,
                message_id,
            } => (self.handle_ack(&queue_name, &message_id).await, false),
            Request::DeleteQueue { queue_name } => {
                (self.handle_delete_queue(&queue_name).await, false)
            }
            Request::ClearQueue { queue_name } => (self.handle_clear(&queue_name), false),
            Request::GetSpeed { queue_name } => (self.handle_speed(&queue_name), false),
            Request::GetStat => (self.handle_stat(), false),
            Request::DeleteAckMessageId {
                queue_name,
                message_id,
            } => (
                self.handle_admin_drop(&queue_name, &message_id).await,
                false,
            ),
            Request::RestoreAckMessageId {
                queue_name,
                message_id,
            } => (self.handle_restore_ack(&queue_name, &message_id), false),
            Request::RestoreSendMessage {
                queue_name,
                message_id,
                message_data,
            } => (
                self.handle_restore_send(&queue_name, &message_id, message_data),
                false,
            ),
            Request::Ping => (Response::success(RequestType::Ping), false),
        };

        let result = if response.status == 1 {
            "Success".to_string()
        } else {
            format!("Error: {} failed", request_type_name(&request_type))
        };
        self.log(&request_type, None, &result, started, false).await;

        Dispatched {
            response,
            must_close,
        }
    }

    fn handle_login(&self, session: &mut Session, user_name: &str, passwd: &str) -> (Response, bool) {
        if user_name == self.user_name && passwd == self.passwd {
            session.mark_authenticated();
            (Response::success(RequestType::Login), false)
        } else {
            (Response::fail(RequestType::Login), true)
        }
    }

    fn handle_declare(&self, queue_name: &str) -> Response {
        match self.store.declare(queue_name) {
            Ok(()) => Response::success(RequestType::DeclareQueue),
            Err(StoreError::QueueAlreadyExists(_)) => Response::fail(RequestType::DeclareQueue),
            Err(err) => {
                warn!(error = %err, "unexpected declare failure");
                Response::fail(RequestType::DeclareQueue)
            }
        }
    }

    async fn handle_send(&self, queue_name: &str, message_data: String) -> Response {
        match self.store.send(queue_name, message_data.clone()) {
            Ok(message_id) => {
                self.post_send_accepted(message_id, queue_name.to_string(), message_data)
                    .await;
                Response::success(RequestType::SendDataToQueue)
            }
            Err(_) => Response::fail(RequestType::SendDataToQueue),
        }
    }

    async fn handle_fetch(&self, queue_name: &str) -> Response {
        match self.store.fetch(queue_name) {
            Ok(message) => {
                self.post_delivery_issued(
                    message.message_id.clone(),
                    queue_name.to_string(),
                    message.message_data.clone(),
                )
                .await;
                self.post_delivered(message.message_id.clone()).await;
                Response::success_with(
                    RequestType::GetDataFromQueue,
                    json!({
                        "message_id": message.message_id,
                        "message_data": message.message_data,
                    }),
                )
            }
            Err(_) => Response::fail_with(RequestType::GetDataFromQueue, Value::Null),
        }
    }

    async fn handle_ack(&self, queue_name: &str, message_id: &str) -> Response {
        match self.store.ack(queue_name, message_id) {
            Ok(()) => {
                self.post_acked(message_id.to_string()).await;
                Response::success(RequestType::AckMessage)
            }
            Err(_) => Response::fail(RequestType::AckMessage),
        }
    }

    async fn handle_delete_queue(&self, queue_name: &str) -> Response {
        match self.store.delete(queue_name) {
            Ok(()) => {
                self.post_queue_deleted(queue_name.to_string()).await;
                Response::success(RequestType::DeleteQueue)
            }
            Err(_) => Response::fail(RequestType::DeleteQueue),
        }
    }

    fn handle_clear(&self, queue_name: &str) -> Response {
        match self.store.clear(queue_name) {
            Ok(()) => Response::success(RequestType::ClearQueue),
            Err(_) => Response::fail(RequestType::ClearQueue),
        }
    }

    fn handle_speed(&self, queue_name: &str) -> Response {
        match self.store.speed(queue_name) {
            Ok((send_rate, fetch_rate, ack_rate)) => Response::success_with(
                RequestType::GetSpeed,
                json!({
                    "send_rate": send_rate,
                    "get_rate": fetch_rate,
                    "ack_rate": ack_rate,
                }),
            ),
            Err(_) => Response::fail(RequestType::GetSpeed),
        }
    }

    fn handle_stat(&self) -> Response {
        let snapshot = self.store.snapshot();
        let mut queue_infor = serde_json::Map::new();
        let mut speed_infor = serde_json::Map::new();
        let mut task_ack_infor = serde_json::Map::new();

        for (queue_name, stats) in snapshot {
            queue_infor.insert(
                queue_name.clone(),
                json!([stats.depth, stats.depth_bytes]),
            );
            speed_infor.insert(format!("send_{queue_name}"), json!(stats.send_rate));
            speed_infor.insert(format!("get_{queue_name}"), json!(stats.fetch_rate));
            speed_infor.insert(format!("ack_{queue_name}"), json!(stats.ack_rate));
            task_ack_infor.insert(
                queue_name,
                json!([stats.inflight, stats.inflight_bytes]),
            );
        }

        Response::success_with(
            RequestType::GetStat,
            json!({
                "queue_infor": queue_infor,
                "speed_infor": speed_infor,
                "task_ack_infor": task_ack_infor,
            }),
        )
    }

    async fn handle_admin_drop(&self, queue_name: &str, message_id: &str) -> Response {
        match self.store.admin_drop(queue_name, message_id) {
            Ok(()) => {
                self.post_admin_dropped(message_id.to_string()).await;
                Response::success(RequestType::DeleteAckMessageId)
            }
            Err(_) => Response::fail(RequestType::DeleteAckMessageId),
        }
    }

    fn handle_restore_ack(&self, queue_name: &str, message_id: &str) -> Response {
        match self.store.restore_inflight(queue_name, message_id) {
            Ok(()) => Response::success(RequestType::RestoreAckMessageId),
            Err(_) => Response::fail(RequestType::RestoreAckMessageId),
        }
    }

    fn handle_restore_send(
        &self,
        queue_name: &str,
        message_id: &str,
        message_data: String,
    ) -> Response {
        match self
            .store
            .restore_send(queue_name, message_id, message_data)
        {
            Ok(()) => Response::success(RequestType::RestoreSendMessage),
            Err(_) => Response::fail(RequestType::RestoreSendMessage),
        }
    }

    async fn post_send_accepted(&self, message_id: String, queue_name: String, message_data: String) {
        let event = SendLogEvent::Accepted {
            message_id,
            queue_name,
            message_data,
            pub_date: now_nanos(),
        };
        if let Err(err) = self.send_log_tx.send(MessageEnvelope::new(event)).await {
            warn!(error = %err, "send-log mailbox rejected send-accepted event");
        }
    }

    async fn post_delivered(&self, message_id: String) {
        let event = SendLogEvent::Delivered { message_id };
        if let Err(err) = self.send_log_tx.send(MessageEnvelope::new(event)).await {
            warn!(error = %err, "send-log mailbox rejected delivered event");
        }
    }

    async fn post_delivery_issued(&self, message_id: String, queue_name: String, message_data: String) {
        let event = AckLogEvent::DeliveryIssued {
            message_id,
            queue_name,
            message_data,
            pub_date: now_nanos(),
        };
        if let Err(err) = self.ack_log_tx.send(MessageEnvelope::new(event)).await {
            warn!(error = %err, "ack-log mailbox rejected delivery-issued event");
        }
    }

    async fn post_acked(&self, message_id: String) {
        let event = AckLogEvent::Acked { message_id };
        if let Err(err) = self.ack_log_tx.send(MessageEnvelope::new(event)).await {
            warn!(error = %err, "ack-log mailbox rejected ack event");
        }
    }

    async fn post_admin_dropped(&self, message_id: String) {
        let event = AckLogEvent::AdminDropped { message_id };
        if let Err(err) = self.ack_log_tx.send(MessageEnvelope::new(event)).await {
            warn!(error = %err, "ack-log mailbox rejected admin-drop event");
        }
    }

    async fn post_queue_deleted(&self, queue_name: String) {
        let send_event = SendLogEvent::QueueDeleted {
            queue_name: queue_name.clone(),
        };
        let ack_event = AckLogEvent::QueueDeleted { queue_name };
        if let Err(err) = self.send_log_tx.send(MessageEnvelope::new(send_event)).await {
            warn!(error = %err, "send-log mailbox rejected delete-queue event");
        }
        if let Err(err) = self.ack_log_tx.send(MessageEnvelope::new(ack_event)).await {
            warn!(error = %err, "ack-log mailbox rejected delete-queue event");
        }
    }

    async fn log(
        &self,
        request_type: &RequestType,
        operation_id: Option<String>,
        result: &str,
        started: Instant,
        security_relevant: bool,
    ) {
        let duration_ms = started.elapsed().as_millis() as u64;
        let mut entry = ActivityLog::new(
            operation_id.unwrap_or_else(|| request_type_name(request_type).to_string()),
            request_type_name(request_type).to_string(),
            Some(self.user_name.clone()),
            result.to_string(),
            duration_ms,
        );
        if security_relevant {
            entry = entry.mark_security_relevant();
        }
        if let Err(err) = self.activity_logger.log_activity(entry).await {
            debug!(error = %err, "activity logger failed, dropping entry");
        }
    }
}

fn request_type_name(request_type: &RequestType) -> &'static str {
    match request_type {
        RequestType::Login => "login",
        RequestType::Logout => "logout",
        RequestType::DeclareQueue => "declare_queue",
        RequestType::SendDataToQueue => "send_data_to_queue",
        RequestType::GetDataFromQueue => "get_data_from_queue",
        RequestType::AckMessage => "ack_message",
        RequestType::NotFound => "not_found",
        RequestType::Forbidden => "forbidden",
        RequestType::DataWrong => "data_wrong",
        RequestType::DeleteQueue => "delete_queue",
        RequestType::ClearQueue => "clear_queue",
        RequestType::GetSpeed => "get_speed",
        RequestType::GetStat => "get_stat",
        RequestType::DeleteAckMessageId => "delete_ack_message_id",
        RequestType::RestoreAckMessageId => "restore_ack_message_id",
        RequestType::RestoreSendMessage => "restore_send_message",
        RequestType::Ping => "ping",
    }
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
