//! # qbroker-rt — bounded message-passing substrate for the broker's workers
//!
//! The broker process and its three sidecar workers (send-log, ack-log,
//! redelivery) never share mutable state; they communicate exclusively by
//! posting events onto bounded channels. `qbroker-rt` is that substrate: a
//! generic [`mailbox`] abstraction (bounded/unbounded, with configurable
//! backpressure and metrics) plus a [`message`] envelope type and a
//! [`monitoring`] facility for observing mailbox/system events.
//!
//! There is deliberately no generic actor/supervision-tree machinery here:
//! the workspace's process topology is fixed (one broker, three named
//! workers), so only the mailbox, envelope, and monitoring primitives that
//! every worker actually uses are kept.
//!
//! # Example
//!
//! ```rust
//! use qbroker_rt::mailbox::{BoundedMailbox, MailboxReceiver, MailboxSender};
//! use qbroker_rt::message::{Message, MessageEnvelope};
//!
//! #[derive(Debug, Clone)]
//! struct SendAccepted {
//!     queue: String,
//! }
//!
//! impl Message for SendAccepted {
//!     const MESSAGE_TYPE: &'static str = "send_accepted";
//! }
//!
//! # async fn example() {
//! let (mut mailbox, sender) = BoundedMailbox::<SendAccepted>::new(1024);
//! sender
//!     .send(MessageEnvelope::new(SendAccepted { queue: "q1".into() }))
//!     .await
//!     .expect("mailbox accepts the event");
//! let envelope = mailbox.recv().await.expect("event observed");
//! assert_eq!(envelope.payload.queue, "q1");
//! # }
//! ```

pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod util;

pub use mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};
pub use message::{Message, MessageEnvelope, MessagePriority};
pub use monitoring::{
    EventSeverity, InMemoryMonitor, MailboxEvent, MailboxEventKind, Monitor, MonitoringConfig,
    MonitoringError, MonitoringEvent, MonitoringSnapshot, NoopMonitor, SystemEvent,
    SystemEventKind,
};
pub use util::{ActorAddress, ActorId, MessageId};
