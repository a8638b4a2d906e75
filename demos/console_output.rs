//! # Demo: console_output
//!
//! Publishes a handful of text messages and lets the built-in
//! [`OutputWriter`] print them to stdout.
//!
//! Shows how to:
//! - Wire [`OutputWriter::stdout`] into a [`Dispatcher`].
//! - Publish free-form text, including empty lines and embedded newlines.
//! - Shut down and drain before exiting.
//!
//! ## Flow
//! ```text
//! publish(text) ──► Bus ──► listener ──► [queue] ──► worker ──► OutputWriter
//!                                                                   │
//!                                                               StdoutSink
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example console_output
//! ```

use std::sync::Arc;

use buslog::{Config, Dispatcher, OutputWriter, Subscribe};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(OutputWriter::stdout())];
    let bus = Dispatcher::new(Config::default(), subs);

    bus.publish("Workspace agent booting");
    bus.publish("Workspace started");
    bus.publish("");
    bus.publish("multi-line payload:\n  step 1 done\n  step 2 done");
    bus.publish("Workspace stopped");

    bus.shutdown().await?;
    Ok(())
}
