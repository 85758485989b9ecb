//! Bounded waits for scene existence guards.
//!
//! Arriving at a scene with an `exists_when` guard blocks until the guard
//! element becomes observable or the budget expires. The wait is a plain
//! poll-sleep loop on the single test-execution thread; it cannot be
//! cancelled early, and expiry is a soft failure (traversal continues).

use std::time::{Duration, Instant};

use crate::action::ElementRef;
use crate::driver::UiDriver;

/// Default budget for a scene guard (3 seconds)
pub const DEFAULT_GUARD_TIMEOUT_MS: u64 = 3_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Options for guard waits
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_GUARD_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Outcome of a guard wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Whether the guard became observable in time
    pub success: bool,
    /// Time spent waiting
    pub elapsed: Duration,
    /// Element that was waited on
    pub waited_for: ElementRef,
}

/// Poll the driver until `element` is observable or the budget expires.
///
/// The element is probed at least once even with a zero timeout.
pub fn wait_for_element(
    driver: &mut dyn UiDriver,
    element: &ElementRef,
    options: &WaitOptions,
) -> WaitResult {
    let start = Instant::now();
    loop {
        if driver.exists(element) {
            return WaitResult {
                success: true,
                elapsed: start.elapsed(),
                waited_for: element.clone(),
            };
        }
        if start.elapsed() >= options.timeout() {
            return WaitResult {
                success: false,
                elapsed: start.elapsed(),
                waited_for: element.clone(),
            };
        }
        std::thread::sleep(options.poll_interval());
    }
}
