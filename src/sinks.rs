//! # Log sinks.
//!
//! [`LineSink`] is the seam between subscribers and the destination stream.
//! The sink handle is injected into subscribers at construction time, so
//! output can be redirected in tests and demos instead of being hardwired
//! to a process-wide global.
//!
//! Implementations:
//! - [`StdoutSink`]: process-wide standard output.
//! - [`MemorySink`]: in-memory capture for tests and demos.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Destination stream for subscriber output.
///
/// One `write_line` call issues exactly one write of `text` followed by the
/// sink's line terminator. Content is taken as-is: empty strings, embedded
/// newlines, and non-printable characters are written unmodified.
#[async_trait]
pub trait LineSink: Send + Sync + 'static {
    /// Writes one line. Errors are returned to the caller untouched.
    async fn write_line(&self, text: &str) -> std::io::Result<()>;
}

/// Standard-output sink.
///
/// Concurrent writers are serialized behind an async mutex, so lines from
/// different workers never interleave mid-line. Each line is flushed before
/// the lock is released.
pub struct StdoutSink {
    inner: Mutex<Stdout>,
}

impl StdoutSink {
    /// Creates a sink over the process stdout handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineSink for StdoutSink {
    async fn write_line(&self, text: &str) -> std::io::Result<()> {
        // Single buffer, single write: the text plus terminator go out together.
        let mut line = Vec::with_capacity(text.len() + 1);
        line.extend_from_slice(text.as_bytes());
        line.push(b'\n');

        let mut out = self.inner.lock().await;
        out.write_all(&line).await?;
        out.flush().await
    }
}

/// In-memory sink that records each write as one entry.
///
/// Useful for asserting on subscriber output without touching stdout.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything written so far, in write order.
    pub async fn snapshot(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }
}

#[async_trait]
impl LineSink for MemorySink {
    async fn write_line(&self, text: &str) -> std::io::Result<()> {
        self.lines.lock().await.push(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records_writes_in_order() {
        let sink = MemorySink::new();
        sink.write_line("one").await.unwrap();
        sink.write_line("two").await.unwrap();
        sink.write_line("three").await.unwrap();
        assert_eq!(sink.snapshot().await, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_memory_sink_keeps_content_verbatim() {
        let sink = MemorySink::new();
        sink.write_line("").await.unwrap();
        sink.write_line("line1\nline2").await.unwrap();
        sink.write_line("tab\there").await.unwrap();

        let lines = sink.snapshot().await;
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "line1\nline2");
        assert_eq!(lines[2], "tab\there");
    }

    #[tokio::test]
    async fn test_stdout_sink_accepts_writes() {
        let sink = StdoutSink::new();
        sink.write_line("stdout sink smoke line").await.unwrap();
    }
}
