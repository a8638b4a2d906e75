//! # Bus for broadcasting text messages.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking publishing from multiple sources (clients, subscriber workers).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                Receiver (one per subscribe()):
//!   client A ──┐
//!   client B ──┼──────► Bus ──────► listener ────► SubscriberSet
//!   workers  ──┘  (broadcast chan)  (in Dispatcher)
//! ```
//!
//! The dispatcher runs a single listener that fans messages out to the
//! registered subscribers via [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent messages for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **No persistence**: messages are lost if there are no active receivers at send time.

use tokio::sync::broadcast;

use super::message::Message;

/// Broadcast channel for bus messages.
///
/// Thin wrapper over [`tokio::sync::broadcast`] that provides a
/// `publish`/`subscribe` API. Multiple publishers can publish concurrently;
/// receivers get clones of each message.
///
/// ### Properties
/// - **Non-blocking**: `publish()` returns immediately.
/// - **Fire-and-forget**: no delivery or durability guarantees.
/// - **Cheap to clone**: internally holds an `Arc`-backed sender.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Message>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    ///
    /// ### Notes
    /// - Capacity is shared across all receivers (not per-subscriber).
    /// - When receivers lag, they observe `RecvError::Lagged`.
    /// - The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Message>(capacity);
        Self { tx }
    }

    /// Publishes a message to all active receivers.
    ///
    /// - Takes ownership of the message; the channel clones it per receiver.
    /// - If there are no receivers, the message is dropped silently.
    pub fn publish(&self, msg: Message) {
        let _ = self.tx.send(msg);
    }

    /// Publishes a borrowed message by cloning it.
    ///
    /// Shorthand for `publish(msg.clone())`, useful when you already have a reference.
    pub fn publish_ref(&self, msg: &Message) {
        let _ = self.tx.send(msg.clone());
    }

    /// Creates a new receiver that will observe subsequent messages.
    ///
    /// - Each call creates an **independent** receiver.
    /// - A receiver only gets messages **sent after** it subscribes.
    /// - Slow receivers get `RecvError::Lagged(n)` and skip over missed items.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageKind;

    #[tokio::test]
    async fn test_publish_reaches_receiver() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(Message::text("one"));
        bus.publish(Message::text("two"));

        assert_eq!(rx.recv().await.unwrap().text.as_ref(), "one");
        assert_eq!(rx.recv().await.unwrap().text.as_ref(), "two");
    }

    #[tokio::test]
    async fn test_publish_without_receivers_is_silent() {
        let bus = Bus::new(8);
        // No receiver exists; nothing to assert beyond "does not panic".
        bus.publish(Message::text("dropped"));
    }

    #[tokio::test]
    async fn test_receiver_misses_earlier_messages() {
        let bus = Bus::new(8);
        bus.publish(Message::text("before"));

        let mut rx = bus.subscribe();
        bus.publish(Message::text("after"));

        let got = rx.recv().await.unwrap();
        assert_eq!(got.text.as_ref(), "after");
        assert_eq!(got.kind, MessageKind::Text);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_clamped() {
        let bus = Bus::new(0);
        let mut rx = bus.subscribe();
        bus.publish(Message::text("still works"));
        assert_eq!(rx.recv().await.unwrap().text.as_ref(), "still works");
    }
}
