//! # Output subscriber: message text, verbatim, to a log sink.
//!
//! [`OutputWriter`] is the built-in console subscriber. It forwards every
//! message's text to the [`LineSink`] it was built with, one sink write per
//! message, and nothing else: no parsing, no filtering, no coloring, no
//! retries. It keeps no state, so every invocation is independent and
//! repeated identical messages produce repeated identical log lines.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use buslog::{Config, Dispatcher, OutputWriter, Subscribe};
//!
//! # async fn demo() -> Result<(), buslog::RuntimeError> {
//! let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(OutputWriter::stdout())];
//! let bus = Dispatcher::new(Config::default(), subs);
//!
//! bus.publish("service started");
//! bus.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SinkError;
use crate::messages::Message;
use crate::sinks::{LineSink, StdoutSink};
use crate::subscribers::Subscribe;

/// Writes message text to a sink, one line per message.
///
/// The sink handle is injected at construction; use [`OutputWriter::stdout`]
/// for the common console case or [`OutputWriter::new`] to redirect output
/// (tests, demos, alternate streams).
pub struct OutputWriter {
    sink: Arc<dyn LineSink>,
}

impl OutputWriter {
    /// Creates a writer backed by the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }

    /// Creates a writer backed by process stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutSink::new()))
    }
}

#[async_trait]
impl Subscribe for OutputWriter {
    /// One sink write per message; the text goes through unmodified.
    ///
    /// Sink failures are not caught, wrapped, or retried here; the dispatch
    /// worker that invoked the handler decides what to do with them.
    async fn on_message(&self, message: &Message) -> Result<(), SinkError> {
        self.sink.write_line(message.text.as_ref()).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "output"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageKind;
    use crate::sinks::MemorySink;

    fn writer_with_memory() -> (OutputWriter, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (OutputWriter::new(sink.clone()), sink)
    }

    #[tokio::test]
    async fn test_writes_text_verbatim() {
        let (writer, sink) = writer_with_memory();
        writer
            .on_message(&Message::text("Workspace started"))
            .await
            .unwrap();
        assert_eq!(sink.snapshot().await, vec!["Workspace started"]);
    }

    #[tokio::test]
    async fn test_empty_message_yields_one_empty_line() {
        let (writer, sink) = writer_with_memory();
        writer.on_message(&Message::text("")).await.unwrap();
        assert_eq!(sink.snapshot().await, vec![""]);
    }

    #[tokio::test]
    async fn test_embedded_newline_is_one_write() {
        let (writer, sink) = writer_with_memory();
        writer
            .on_message(&Message::text("line1\nline2"))
            .await
            .unwrap();

        let lines = sink.snapshot().await;
        assert_eq!(lines.len(), 1, "one message must be exactly one write");
        assert_eq!(lines[0], "line1\nline2");
    }

    #[tokio::test]
    async fn test_non_printable_content_is_untouched() {
        let (writer, sink) = writer_with_memory();
        let raw = "bell\u{7} and tab\t and nul\u{0}";
        writer.on_message(&Message::text(raw)).await.unwrap();
        assert_eq!(sink.snapshot().await, vec![raw]);
    }

    #[tokio::test]
    async fn test_sequential_calls_preserve_order() {
        let (writer, sink) = writer_with_memory();
        for text in ["first", "second", "third", "fourth"] {
            writer.on_message(&Message::text(text)).await.unwrap();
        }
        assert_eq!(
            sink.snapshot().await,
            vec!["first", "second", "third", "fourth"]
        );
    }

    #[tokio::test]
    async fn test_repeated_message_produces_two_lines() {
        let (writer, sink) = writer_with_memory();
        writer.on_message(&Message::text("again")).await.unwrap();
        writer.on_message(&Message::text("again")).await.unwrap();
        assert_eq!(sink.snapshot().await, vec!["again", "again"]);
    }

    #[tokio::test]
    async fn test_notices_are_written_like_any_text() {
        // The writer does not filter by kind; a notice is just more text.
        let (writer, sink) = writer_with_memory();
        let notice = Message::subscriber_overflow("metrics", "full");
        assert_eq!(notice.kind, MessageKind::SubscriberOverflow);

        writer.on_message(&notice).await.unwrap();
        assert_eq!(sink.snapshot().await, vec![notice.text.to_string()]);
    }

    #[tokio::test]
    async fn test_sink_error_propagates() {
        struct BrokenSink;

        #[async_trait]
        impl LineSink for BrokenSink {
            async fn write_line(&self, _text: &str) -> std::io::Result<()> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "stream closed",
                ))
            }
        }

        let writer = OutputWriter::new(Arc::new(BrokenSink));
        let err = writer
            .on_message(&Message::text("lost"))
            .await
            .expect_err("broken sink must surface as an error");
        assert_eq!(err.as_label(), "sink_io");
    }
}
