//! # Message subscribers.
//!
//! This module provides the [`Subscribe`] trait, the built-in
//! [`OutputWriter`], and the [`SubscriberSet`] fan-out that delivers bus
//! messages to registered subscribers.
//!
//! ## Architecture
//! ```text
//! Message flow:
//!   publish(text) ──► Bus ──► listener (in Dispatcher)
//!                                │
//!                                └──► SubscriberSet::emit(&Message)
//!                                          │
//!                                     ┌────┴────┬─────────┐
//!                                     ▼         ▼         ▼
//!                               OutputWriter  Metrics   Custom ...
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** observe and react to messages (console output,
//!   metrics, alerts)
//! - [`OutputWriter`] is the built-in console subscriber: it forwards message
//!   text verbatim to an injected [`LineSink`](crate::LineSink)

mod output;
mod set;
mod subscriber;

pub use output::OutputWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
