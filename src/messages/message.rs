//! # Messages delivered through the bus.
//!
//! The [`MessageKind`] enum separates two categories:
//! - **Text messages**: free-form payload published by clients. Content is
//!   never parsed, validated, or transformed by the runtime.
//! - **Delivery notices**: reports emitted by the runtime itself when a
//!   subscriber drops, fails on, or panics on a message.
//!
//! The [`Message`] struct carries the text plus delivery metadata
//! (timestamp, sequence number, subscriber name for notices).
//!
//! ## Ordering guarantees
//! Each message has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore publish order when messages are
//! observed out of order.
//!
//! ## Example
//! ```rust
//! use buslog::{Message, MessageKind};
//!
//! let msg = Message::text("service started");
//!
//! assert_eq!(msg.kind, MessageKind::Text);
//! assert_eq!(msg.text.as_ref(), "service started");
//! assert!(msg.subscriber.is_none());
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for message ordering.
static MESSAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of bus messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Ordinary text payload published by a client.
    ///
    /// Sets:
    /// - `text`: the payload, verbatim
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Text,

    /// Subscriber dropped a message (queue full or worker closed).
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `text`: reason string (e.g. "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberOverflow,

    /// Subscriber panicked while handling a message.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `text`: panic info/message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,

    /// Subscriber handler returned an error.
    ///
    /// Sets:
    /// - `subscriber`: subscriber name
    /// - `text`: error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberFailed,
}

impl MessageKind {
    /// Returns `true` for ordinary text payloads.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, MessageKind::Text)
    }

    /// Returns `true` for runtime delivery notices.
    #[inline]
    pub fn is_notice(&self) -> bool {
        !self.is_text()
    }
}

/// Bus message with delivery metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `text`: the payload, untouched by the runtime
/// - `subscriber`: set only on delivery notices
#[derive(Clone, Debug)]
pub struct Message {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Message classification.
    pub kind: MessageKind,
    /// Free-form text content. Never parsed or modified by the runtime.
    pub text: Arc<str>,
    /// Name of the subscriber a notice refers to, if applicable.
    pub subscriber: Option<Arc<str>>,
}

impl Message {
    /// Creates a new message of the given kind with current timestamp and
    /// next sequence number.
    pub fn new(kind: MessageKind, text: impl Into<Arc<str>>) -> Self {
        Self {
            seq: MESSAGE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            text: text.into(),
            subscriber: None,
        }
    }

    /// Creates an ordinary text message.
    #[inline]
    pub fn text(text: impl Into<Arc<str>>) -> Self {
        Message::new(MessageKind::Text, text)
    }

    /// Attaches the subscriber name a notice refers to.
    #[inline]
    pub fn with_subscriber(mut self, name: impl Into<Arc<str>>) -> Self {
        self.subscriber = Some(name.into());
        self
    }

    /// Creates a subscriber overflow notice.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Message::new(
            MessageKind::SubscriberOverflow,
            format!("subscriber={subscriber} dropped a message: {reason}"),
        )
        .with_subscriber(subscriber)
    }

    /// Creates a subscriber panic notice.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Message::new(
            MessageKind::SubscriberPanicked,
            format!("subscriber={subscriber} panicked: {info}"),
        )
        .with_subscriber(subscriber)
    }

    /// Creates a subscriber failure notice.
    #[inline]
    pub fn subscriber_failed(subscriber: &'static str, reason: String) -> Self {
        Message::new(
            MessageKind::SubscriberFailed,
            format!("subscriber={subscriber} failed: {reason}"),
        )
        .with_subscriber(subscriber)
    }

    /// Returns `true` for runtime delivery notices.
    #[inline]
    pub fn is_notice(&self) -> bool {
        self.kind.is_notice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_fields() {
        let msg = Message::text("hello");
        assert_eq!(msg.kind, MessageKind::Text);
        assert_eq!(msg.text.as_ref(), "hello");
        assert!(msg.subscriber.is_none());
        assert!(!msg.is_notice());
    }

    #[test]
    fn test_seq_is_monotonic() {
        let a = Message::text("first");
        let b = Message::text("second");
        assert!(a.seq < b.seq, "seq {} should precede {}", a.seq, b.seq);
    }

    #[test]
    fn test_text_is_untouched() {
        for raw in ["", "line1\nline2", "tab\tand\u{7}bell", "  padded  "] {
            let msg = Message::text(raw);
            assert_eq!(msg.text.as_ref(), raw);
        }
    }

    #[test]
    fn test_overflow_notice() {
        let msg = Message::subscriber_overflow("output", "full");
        assert_eq!(msg.kind, MessageKind::SubscriberOverflow);
        assert_eq!(msg.subscriber.as_deref(), Some("output"));
        assert!(msg.is_notice());
        assert!(msg.text.contains("full"));
    }

    #[test]
    fn test_failed_notice() {
        let msg = Message::subscriber_failed("output", "sink write failed".to_string());
        assert_eq!(msg.kind, MessageKind::SubscriberFailed);
        assert_eq!(msg.subscriber.as_deref(), Some("output"));
        assert!(msg.is_notice());
    }
}
