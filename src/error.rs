//! Error types used by the buslog runtime and sinks.
//!
//! This module defines two main error enums:
//!
//! - [`SinkError`]: errors raised by a log sink write.
//! - [`RuntimeError`]: errors raised by the dispatch runtime itself.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by log sinks.
///
/// A subscriber that writes to a sink does not catch, wrap, or retry these;
/// they propagate unchanged to the dispatch worker that invoked the handler.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// Underlying stream write failed (e.g. broken pipe, closed stream).
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use buslog::SinkError;
    ///
    /// let err = SinkError::from(std::io::Error::other("pipe closed"));
    /// assert_eq!(err.as_label(), "sink_io");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Io(_) => "sink_io",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SinkError::Io(err) => format!("io: {err}"),
        }
    }
}

/// # Errors produced by the dispatch runtime.
///
/// These represent failures of the delivery machinery itself,
/// such as a shutdown sequence exceeding its grace period.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some subscriber workers were still
    /// busy and had to be aborted.
    #[error("shutdown grace {grace:?} exceeded; stuck: {stuck:?}; aborting workers")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Names of subscribers whose workers did not finish in time.
        stuck: Vec<String>,
    },

    /// The bus listener task terminated abnormally.
    #[error("bus listener failed: {reason}")]
    ListenerFailed {
        /// Join error description from the listener task.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use buslog::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
            RuntimeError::ListenerFailed { .. } => "runtime_listener_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck subscribers={stuck:?}")
            }
            RuntimeError::ListenerFailed { reason } => {
                format!("listener failed: {reason}")
            }
        }
    }
}
