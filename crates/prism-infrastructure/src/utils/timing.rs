//! Timing instrumentation helpers
//!
//! Built on the tokio clock so measurements follow paused test time.

use std::time::Duration;
use tokio::time::Instant;

/// Stopwatch for adapter attempts and health probes
///
/// Feeds both the latency fields of log events and the attempt histogram.
///
/// ```ignore
/// use prism_infrastructure::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// adapter.ping(deadline).await?;
/// let latency = timer.elapsed_ms();
/// ```
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get elapsed time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Get elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
