//! # Message subscriber trait.
//!
//! Provides [`Subscribe`], the extension point for plugging custom message
//! handlers into the runtime.
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (panics are caught and reported as
//!   `MessageKind::SubscriberPanicked`)
//!
//! ## Architecture
//! ```text
//! SubscriberSet ──► [bounded queue] ──► worker task ──► subscriber.on_message()
//!                                    └─► panic caught → SubscriberPanicked
//! ```
//!
//! ## Rules
//! - A slow subscriber only affects its own queue.
//! - Queue overflow drops the message **for this subscriber only** and
//!   publishes `MessageKind::SubscriberOverflow`; other subscribers are unaffected.
//! - Messages are processed sequentially (FIFO) per subscriber.
//! - Subscribers do not block publishers or each other.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use async_trait::async_trait;
//! use buslog::{Message, SinkError, Subscribe};
//!
//! #[derive(Default)]
//! struct Counter {
//!     seen: AtomicUsize,
//! }
//!
//! #[async_trait]
//! impl Subscribe for Counter {
//!     async fn on_message(&self, _msg: &Message) -> Result<(), SinkError> {
//!         self.seen.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }     // prefer short, descriptive names
//!     fn queue_capacity(&self) -> usize { 2048 }       // larger buffer for bursty traffic
//! }
//! ```

use async_trait::async_trait;

use crate::error::SinkError;
use crate::messages::Message;

/// Message subscriber: receives a text message and handles it.
///
/// Each subscriber runs in isolation:
/// - **Bounded queue** buffers messages (capacity via [`Self::queue_capacity`]).
/// - **Dedicated worker task** processes messages sequentially (FIFO).
/// - **Panic isolation**: panics are caught and published as `SubscriberPanicked`.
///
/// ### Error propagation
/// `on_message` returns a `Result` so that a failing sink can propagate
/// unchanged to the dispatch worker. The worker does not retry; it publishes
/// a `SubscriberFailed` notice and moves on to the next message.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single message.
    ///
    /// Called from a dedicated worker task, not in the publisher context.
    /// Messages are delivered in FIFO order per subscriber.
    ///
    /// Errors and panics are reported by the worker; they never crash the
    /// runtime or affect other subscribers.
    async fn on_message(&self, message: &Message) -> Result<(), SinkError>;

    /// Returns the subscriber name used in notices.
    ///
    /// Prefer short, descriptive names (e.g. "output", "metrics", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose - override
    /// it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this subscriber.
    ///
    /// Overflow behavior:
    /// 1) the new message is dropped for this subscriber only,
    /// 2) a `MessageKind::SubscriberOverflow` notice is published,
    /// 3) other subscribers are unaffected.
    ///
    /// The runtime clamps capacity to a minimum of 1.
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
