//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! building worker loops that talk to each other over bounded mailboxes.
//! Import this module to get started quickly:
//!
//! ```rust
//! use qbroker_rt::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Messaging
//! - [`Message`] - Core trait for messages
//! - [`MessageEnvelope`] - Message wrapper with metadata
//! - [`MessagePriority`] - Priority levels (High, Normal, Low)
//!
//! ## Mailbox
//! - [`BoundedMailbox`] - Capacity-limited mailbox
//! - [`UnboundedMailbox`] - Unlimited capacity mailbox
//! - [`BackpressureStrategy`] - Flow control strategies
//! - [`MailboxReceiver`] - Trait for receiving messages
//! - [`MailboxSender`] - Trait for sending messages
//!
//! ## Monitoring
//! - [`Monitor`] - Core monitoring trait
//! - [`InMemoryMonitor`] - Production monitor
//! - [`NoopMonitor`] - Zero-overhead no-op monitor
//! - [`MonitoringEvent`] - Trait for events
//! - [`EventSeverity`] - Event severity levels
//! - [`MailboxEvent`] - Mailbox events
//!
//! ## Utilities
//! - [`ActorAddress`] - Worker address type
//! - [`ActorId`] - Worker identifier
//! - [`MessageId`] - Message identifier
//!
//! # Example
//!
//! ```rust
//! use qbroker_rt::prelude::*;
//!
//! #[derive(Debug, Clone)]
//! struct MyMessage {
//!     data: String,
//! }
//!
//! impl Message for MyMessage {
//!     const MESSAGE_TYPE: &'static str = "my_message";
//! }
//! ```

// Messaging
pub use crate::message::{Message, MessageEnvelope, MessagePriority};

// Mailbox
pub use crate::mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};

// Monitoring
pub use crate::monitoring::{
    EventSeverity, InMemoryMonitor, MailboxEvent, Monitor, MonitoringEvent, NoopMonitor,
};

// Utilities
pub use crate::util::{ActorAddress, ActorId, MessageId};
