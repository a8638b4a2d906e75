//! # buslog
//!
//! **buslog** is a lightweight in-process text message bus for Rust.
//!
//! Text messages are published onto a broadcast bus and fanned out to
//! registered subscribers. The built-in [`OutputWriter`] subscriber writes
//! every message, verbatim, to a console/log sink. The crate is designed as
//! a building block for tools that want their event stream on the console
//! without wiring a logging framework into every producer.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   client A   │   │   client B   │   │  worker task │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                  (capacity: Config::bus_capacity)                 │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │     bus listener       │
//!                       │    (in Dispatcher)     │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                             (per-sub queues)
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                      worker1   worker2   workerN
//!                         ▼         ▼         ▼
//!                   OutputWriter  custom    custom
//!                         │
//!                         ▼
//!                 LineSink (stdout / memory / ...)
//! ```
//!
//! ### Delivery contract
//! - [`OutputWriter`] writes message text unmodified, one sink write per
//!   message, followed by the sink's line terminator.
//! - Per-subscriber FIFO; no ordering guarantee across subscribers.
//! - A slow, failing, or panicking subscriber never affects the others:
//!   failures surface as `SubscriberFailed` / `SubscriberPanicked` /
//!   `SubscriberOverflow` notice messages on the bus.
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits             |
//! |-------------------|------------------------------------------------------------------|--------------------------------|
//! | **Subscriber API**| Hook into the message stream (console output, custom handlers).  | [`Subscribe`], [`OutputWriter`]|
//! | **Sinks**         | Inject the output destination instead of hardcoding stdout.      | [`LineSink`], [`StdoutSink`]   |
//! | **Bus**           | Non-blocking broadcast of text messages.                         | [`Bus`], [`Message`]           |
//! | **Dispatch**      | Fan-out, isolation, graceful shutdown.                           | [`Dispatcher`], [`SubscriberSet`] |
//! | **Errors**        | Typed errors for sinks and the runtime.                          | [`SinkError`], [`RuntimeError`]|
//! | **Configuration** | Centralize runtime settings.                                     | [`Config`]                     |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use buslog::{Config, Dispatcher, OutputWriter, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(OutputWriter::stdout())];
//!     let bus = Dispatcher::new(Config::default(), subs);
//!
//!     bus.publish("service started");
//!     bus.publish("ready to accept connections");
//!
//!     bus.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod dispatcher;
mod error;
mod messages;
mod sinks;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{RuntimeError, SinkError};
pub use messages::{Bus, Message, MessageKind};
pub use sinks::{LineSink, MemorySink, StdoutSink};
pub use subscribers::{OutputWriter, Subscribe, SubscriberSet};
