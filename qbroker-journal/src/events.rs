//! Events the broker posts to the send-log and ack-log workers.
//!
//! Delivery is non-blocking from the broker's side (spec §4.5): these
//! ride bounded `qbroker-rt` mailboxes sized generously enough that a
//! `send-accepted`/`delete-queue` event is never dropped in practice.

use qbroker_rt::Message;

/// Events consumed by the send-log worker.
#[derive(Debug, Clone)]
pub enum SendLogEvent {
    /// A producer message was accepted onto a queue's FIFO.
    Accepted {
        message_id: String,
        queue_name: String,
        message_data: String,
        pub_date: i64,
    },
    /// The message was fetched by a consumer; drop its send-journal row.
    Delivered { message_id: String },
    /// The queue was deleted; drop every row for it.
    QueueDeleted { queue_name: String },
}

impl Message for SendLogEvent {
    const MESSAGE_TYPE: &'static str = "send_log_event";
}

/// Events consumed by the ack-log worker.
#[derive(Debug, Clone)]
pub enum AckLogEvent {
    /// A message was delivered to a consumer and is now in-flight.
    DeliveryIssued {
        message_id: String,
        queue_name: String,
        message_data: String,
        pub_date: i64,
    },
    /// The consumer acknowledged the message.
    Acked { message_id: String },
    /// The redelivery worker (or an operator) dropped the in-flight
    /// entry administratively, without counting it as acknowledged.
    AdminDropped { message_id: String },
    /// The queue was deleted; drop every in-flight row for it.
    QueueDeleted { queue_name: String },
}

impl Message for AckLogEvent {
    const MESSAGE_TYPE: &'static str = "ack_log_event";
}
