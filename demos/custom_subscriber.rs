//! # Demo: custom_subscriber
//!
//! Demonstrates how to build and attach a custom message subscriber next to
//! the built-in console output.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Message`] / [`MessageKind`] for delivery notices.
//! - Wire several subscribers into one [`Dispatcher`].
//!
//! ## Flow
//! ```text
//! publish(text) ──► Bus ──► listener ──► SubscriberSet
//!                                        ├──► OutputWriter.on_message()  (stdout)
//!                                        └──► WordCount.on_message()     (stats)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use buslog::{Config, Dispatcher, Message, OutputWriter, SinkError, Subscribe};

/// Counts messages and words as they flow by.
/// In real life, you could export metrics, ship logs, or trigger alerts.
#[derive(Default)]
struct WordCount {
    messages: AtomicUsize,
    words: AtomicUsize,
}

#[async_trait::async_trait]
impl Subscribe for WordCount {
    async fn on_message(&self, message: &Message) -> Result<(), SinkError> {
        if message.is_notice() {
            return Ok(());
        }
        self.messages.fetch_add(1, Ordering::Relaxed);
        self.words
            .fetch_add(message.text.split_whitespace().count(), Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "word-count"
    }

    fn queue_capacity(&self) -> usize {
        256
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let stats = Arc::new(WordCount::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![
        Arc::new(OutputWriter::stdout()),
        stats.clone(),
    ];
    let bus = Dispatcher::new(Config::default(), subs);

    bus.publish("the quick brown fox");
    bus.publish("jumps over the lazy dog");
    bus.publish("done");

    bus.shutdown().await?;

    println!(
        "\nword-count saw {} messages, {} words",
        stats.messages.load(Ordering::Relaxed),
        stats.words.load(Ordering::Relaxed)
    );
    Ok(())
}
