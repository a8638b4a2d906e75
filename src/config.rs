//! # Global runtime configuration.
//!
//! Provides [`Config`], centralized settings for the dispatch runtime.
//!
//! ## Sentinel values
//! - `bus_capacity` is clamped to a minimum of 1 by the bus
//! - `grace = 0s` means "do not wait for workers at shutdown"

use std::time::Duration;

/// Global configuration for the dispatch runtime.
///
/// ## Field semantics
/// - `bus_capacity`: broadcast ring buffer size (min 1; clamped by the bus)
/// - `grace`: maximum wait for subscriber workers to drain their queues
///   during shutdown; workers still busy after `grace` are aborted
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the bus broadcast channel ring buffer.
    ///
    /// A listener that lags behind more than `bus_capacity` messages will
    /// observe `Lagged` and skip older items. Minimum value is 1.
    pub bus_capacity: usize,

    /// Maximum time to wait for subscriber workers during shutdown.
    ///
    /// When shutdown is requested:
    /// - queues are closed, workers finish what is already buffered
    /// - the dispatcher waits up to `grace` for workers to exit
    /// - if exceeded, returns `RuntimeError::GraceExceeded`
    pub grace: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    ///
    /// The bus should use this value to avoid constructing an invalid channel.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024` (good baseline)
    /// - `grace = 5s` (enough to flush pending log lines)
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
        }
    }
}
