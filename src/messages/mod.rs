//! Bus messages: types and broadcast bus.
//!
//! This module groups the message **data model** and the **bus** used to
//! publish/subscribe to text messages flowing through the runtime.
//!
//! ## Contents
//! - [`MessageKind`], [`Message`] message classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: clients via [`Dispatcher::publish`](crate::Dispatcher::publish),
//!   `SubscriberSet` workers (overflow/panic/failure notices).
//! - **Consumers**: the dispatcher listener, which fans out to `SubscriberSet`.

mod bus;
mod message;

pub use bus::Bus;
pub use message::{Message, MessageKind};
