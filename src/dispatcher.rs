//! # Dispatcher: wires the bus to the subscriber fan-out.
//!
//! The [`Dispatcher`] owns the message [`Bus`] and runs the listener that
//! forwards every bus message into the [`SubscriberSet`]. It is the piece an
//! application holds on to: publish through it, shut it down when done.
//!
//! ## High-level architecture
//! ```text
//! Construction:
//!   Dispatcher::new(cfg, subscribers)
//!     ├─► Bus::new(cfg.bus_capacity)
//!     ├─► SubscriberSet::new(subscribers, bus)     (one queue + worker each)
//!     └─► listener task: Bus.subscribe() ─► SubscriberSet::emit_arc()
//!
//! Message flow:
//!   publish(text) ──► Bus ──► listener ──► [queue S1] [queue S2] ... [queue SN]
//!                                              │          │            │
//!                                          worker S1  worker S2 ... worker SN
//!                                              │          │            │
//!                                      sub.on_message(&Message) (per subscriber)
//!
//! Shutdown path:
//!   shutdown()
//!     ├─► cancel listener token
//!     ├─► drain messages already buffered on the bus into the set
//!     └─► SubscriberSet::shutdown(cfg.grace):
//!            ├─ Ok (all workers joined)  → Ok(())
//!            └─ grace exceeded          → Err(RuntimeError::GraceExceeded)
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no live listener the
//!   message is dropped (fire-and-forget).
//! - Delivery order is per-subscriber FIFO; there is no cross-subscriber
//!   ordering guarantee.
//! - Shutdown delivers what was already buffered before closing the queues.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::RuntimeError;
use crate::messages::{Bus, Message};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Coordinates the bus, the listener loop, and subscriber shutdown.
pub struct Dispatcher {
    /// Global runtime configuration.
    pub cfg: Config,
    /// Message bus shared with all publishers.
    pub bus: Bus,
    token: CancellationToken,
    listener: JoinHandle<Result<(), RuntimeError>>,
}

impl Dispatcher {
    /// Creates a dispatcher with the given config and subscribers.
    ///
    /// The listener task starts immediately; messages published after this
    /// call are delivered to every subscriber.
    #[must_use]
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let set = SubscriberSet::new(subscribers, bus.clone());
        let token = CancellationToken::new();
        let listener = Self::spawn_listener(bus.subscribe(), set, token.clone(), cfg.clone());

        Self {
            cfg,
            bus,
            token,
            listener,
        }
    }

    /// Publishes a text message to all subscribers.
    ///
    /// Non-blocking; returns immediately. The text is carried verbatim.
    pub fn publish(&self, text: impl Into<Arc<str>>) {
        self.bus.publish(Message::text(text));
    }

    /// Shuts down: stops the listener, drains buffered messages, and waits
    /// up to [`Config::grace`] for subscriber workers to finish.
    pub async fn shutdown(self) -> Result<(), RuntimeError> {
        self.token.cancel();
        match self.listener.await {
            Ok(res) => res,
            Err(err) => Err(RuntimeError::ListenerFailed {
                reason: err.to_string(),
            }),
        }
    }

    /// Spawns the bus listener.
    ///
    /// Forwards messages into the set until cancelled, then drains whatever
    /// is still buffered on the bus and shuts the set down.
    fn spawn_listener(
        mut rx: broadcast::Receiver<Message>,
        set: SubscriberSet,
        token: CancellationToken,
        cfg: Config,
    ) -> JoinHandle<Result<(), RuntimeError>> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    res = rx.recv() => match res {
                        Ok(msg) => set.emit_arc(Arc::new(msg)),
                        // A lagged listener skips the overwritten items and keeps going.
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }

            // Cancellation can win the race against messages already sitting in
            // the ring buffer; hand those to the set before closing the queues.
            loop {
                match rx.try_recv() {
                    Ok(msg) => set.emit_arc(Arc::new(msg)),
                    Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                    Err(_) => break,
                }
            }

            set.shutdown(cfg.grace).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::messages::MessageKind;
    use crate::sinks::MemorySink;
    use crate::subscribers::OutputWriter;
    use async_trait::async_trait;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_publish_reaches_output_writer() {
        let sink = Arc::new(MemorySink::new());
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(OutputWriter::new(sink.clone()))];
        let bus = Dispatcher::new(Config::default(), subs);

        bus.publish("Workspace started");
        bus.publish("");
        bus.publish("line1\nline2");
        bus.shutdown().await.unwrap();

        assert_eq!(
            sink.snapshot().await,
            vec!["Workspace started", "", "line1\nline2"]
        );
    }

    #[tokio::test]
    async fn test_messages_arrive_in_publish_order() {
        let sink = Arc::new(MemorySink::new());
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(OutputWriter::new(sink.clone()))];
        let bus = Dispatcher::new(Config::default(), subs);

        let expected: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        for line in &expected {
            bus.publish(line.clone());
        }
        bus.shutdown().await.unwrap();

        assert_eq!(sink.snapshot().await, expected);
    }

    #[tokio::test]
    async fn test_two_subscribers_both_receive() {
        let a = Arc::new(MemorySink::new());
        let b = Arc::new(MemorySink::new());
        let subs: Vec<Arc<dyn Subscribe>> = vec![
            Arc::new(OutputWriter::new(a.clone())),
            Arc::new(OutputWriter::new(b.clone())),
        ];
        let bus = Dispatcher::new(Config::default(), subs);

        bus.publish("to everyone");
        bus.shutdown().await.unwrap();

        assert_eq!(a.snapshot().await, vec!["to everyone"]);
        assert_eq!(b.snapshot().await, vec!["to everyone"]);
    }

    #[tokio::test]
    async fn test_failed_subscriber_notice_reaches_other_subscribers() {
        struct Broken;

        #[async_trait]
        impl Subscribe for Broken {
            async fn on_message(&self, _msg: &Message) -> Result<(), SinkError> {
                Err(SinkError::from(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "stream closed",
                )))
            }

            fn name(&self) -> &'static str {
                "broken"
            }
        }

        let sink = Arc::new(MemorySink::new());
        let subs: Vec<Arc<dyn Subscribe>> = vec![
            Arc::new(Broken),
            Arc::new(OutputWriter::new(sink.clone())),
        ];
        let bus = Dispatcher::new(Config::default(), subs);
        let mut rx = bus.bus.subscribe();

        bus.publish("will fail in one subscriber");

        // Wait for the worker to report the failure before shutting down.
        let notice = loop {
            let msg = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for notice")
                .expect("bus closed");
            if msg.kind == MessageKind::SubscriberFailed {
                break msg;
            }
        };
        assert_eq!(notice.subscriber.as_deref(), Some("broken"));

        bus.shutdown().await.unwrap();

        let lines = sink.snapshot().await;
        assert_eq!(lines[0], "will fail in one subscriber");
        assert!(
            lines.iter().any(|l| l.contains("subscriber=broken")),
            "failure notice should be written by the healthy subscriber: {lines:?}"
        );
    }

    #[tokio::test]
    async fn test_shutdown_with_no_subscribers() {
        let bus = Dispatcher::new(Config::default(), Vec::new());
        bus.publish("nobody listens");
        bus.shutdown().await.unwrap();
    }
}
