//! # Non-blocking message fan-out to multiple subscribers.
//!
//! Provides [`SubscriberSet`], which distributes messages to multiple
//! subscribers concurrently without blocking the publisher.
//!
//! ## Architecture
//! ```text
//! emit(msg)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► subscriber1.on_message()
//!     │    (bounded)         ├──────► Err → SubscriberFailed
//!     │                      └──────► panic → SubscriberPanicked
//!     ├──► [queue 2] ──► worker 2 ──► subscriber2.on_message()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► subscriberN.on_message()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-subscriber ordering**: subscriber A may process message N
//!   while B processes N+5
//! - **Overflow**: message dropped for that subscriber only, `SubscriberOverflow` published
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow, failing, or panicking subscriber doesn't affect others
//! - **Per-subscriber FIFO**: each subscriber sees messages in order
//!
//! ## Failure handling
//! Worker tasks report without dying:
//! - a handler `Err` becomes a `SubscriberFailed` notice
//! - a panic is caught via `catch_unwind` and becomes a `SubscriberPanicked` notice
//! - the worker continues with the next message either way
//!
//! Notices are only published for text messages. A subscriber that fails on a
//! notice stays silent, which breaks report-on-report feedback loops.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a subscriber panics while holding a lock.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::error::RuntimeError;
use crate::messages::{Bus, Message};
use crate::subscribers::Subscribe;

/// Per-subscriber channel metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Message>>,
}

/// Per-subscriber worker handle.
struct SubscriberWorker {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Fan-out coordinator for multiple message subscribers.
///
/// Manages per-subscriber queues and worker tasks, providing:
/// - **Concurrent delivery**: messages sent to all subscribers simultaneously
/// - **Isolation**: each subscriber has a dedicated queue and worker
/// - **Failure safety**: errors and panics are reported, never crash the runtime
/// - **Overflow handling**: dropped messages reported via `SubscriberOverflow`
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<SubscriberWorker>,
    bus: Bus,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker task per subscriber.
    ///
    /// ### Per-subscriber setup
    /// - Bounded mpsc queue (capacity from [`Subscribe::queue_capacity`], min 1)
    /// - Dedicated worker task (runs until its queue is closed and drained)
    /// - Panic isolation via `catch_unwind`
    ///
    /// The `bus` is used to publish delivery notices.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let cap = sub.queue_capacity().max(1);
            let name = sub.name();
            let (tx, rx) = mpsc::channel::<Arc<Message>>(cap);

            let handle = Self::spawn_worker(Arc::clone(&sub), rx, bus.clone());
            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(SubscriberWorker { name, handle });
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits a message to all subscribers (clones the message).
    ///
    /// - Clones the message, wraps it in `Arc`, calls [`emit_arc`](Self::emit_arc)
    /// - Returns immediately (non-blocking)
    ///
    /// ### Notes
    /// For hot paths, use [`emit_arc`](Self::emit_arc) to avoid cloning.
    pub fn emit(&self, msg: &Message) {
        self.emit_arc(Arc::new(msg.clone()));
    }

    /// Emits a pre-allocated `Arc<Message>` to all subscribers.
    ///
    /// - Uses `try_send` (non-blocking)
    /// - On queue full: drops the message, publishes `SubscriberOverflow`
    /// - On queue closed: publishes `SubscriberOverflow` with reason "closed"
    ///
    /// ### Overflow prevention
    /// Notices that themselves overflow are not re-published; dropping them
    /// silently prevents infinite report loops.
    pub fn emit_arc(&self, msg: Arc<Message>) {
        let is_notice = msg.is_notice();

        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&msg)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    if !is_notice {
                        self.bus
                            .publish(Message::subscriber_overflow(channel.name, "full"));
                    }
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    if !is_notice {
                        self.bus
                            .publish(Message::subscriber_overflow(channel.name, "closed"));
                    }
                }
            }
        }
    }

    /// Gracefully shuts down all subscriber workers.
    ///
    /// 1. Drops all channel senders (workers drain what is buffered, then exit)
    /// 2. Waits up to `grace` for workers to finish
    /// 3. Aborts workers still busy after the deadline and returns
    ///    [`RuntimeError::GraceExceeded`] with their names
    pub async fn shutdown(self, grace: Duration) -> Result<(), RuntimeError> {
        drop(self.channels);

        let deadline = tokio::time::Instant::now() + grace;
        let mut stuck = Vec::new();

        for worker in self.workers {
            let mut handle = worker.handle;
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(_) => {}
                Err(_) => {
                    handle.abort();
                    stuck.push(worker.name.to_string());
                }
            }
        }

        if stuck.is_empty() {
            Ok(())
        } else {
            Err(RuntimeError::GraceExceeded { grace, stuck })
        }
    }

    /// Spawns the worker loop for one subscriber.
    ///
    /// The worker processes its queue in FIFO order until the queue is closed,
    /// reporting handler errors and panics as notices on the bus.
    fn spawn_worker(
        sub: Arc<dyn Subscribe>,
        mut rx: mpsc::Receiver<Arc<Message>>,
        bus: Bus,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let fut = sub.on_message(msg.as_ref());

                match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        if msg.kind.is_text() {
                            bus.publish(Message::subscriber_failed(
                                sub.name(),
                                err.as_message(),
                            ));
                        }
                    }
                    Err(panic_err) => {
                        let info = {
                            let any = &*panic_err;
                            if let Some(text) = any.downcast_ref::<&'static str>() {
                                (*text).to_string()
                            } else if let Some(text) = any.downcast_ref::<String>() {
                                text.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        if msg.kind.is_text() {
                            bus.publish(Message::subscriber_panicked(sub.name(), info));
                        }
                    }
                }
            }
        })
    }
}
