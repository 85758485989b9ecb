//! Failure reporting for navigation runs.
//!
//! Navigation failures are recorded, not thrown: the reporter is the
//! test-framework collaborator, and recording a failure must hand control
//! back to the caller so traversal can continue where the contract says it
//! does (guard timeouts) or stop cleanly where it does not (unknown
//! destination, no route).
//!
//! Every failure carries the call site it is attributed to, so a failed
//! `goto` points at the test line that requested it and a guard timeout
//! points at the scene declaration.

use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// Source position a failure is attributed to.
///
/// Captured implicitly via `#[track_caller]`; thread a value through
/// explicitly where attribution should stick to an earlier declaration
/// rather than the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallSite {
    /// Source file
    pub file: &'static str,
    /// 1-based line number
    pub line: u32,
}

impl CallSite {
    /// Capture the caller's source position
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Receiver for recorded navigation failures.
///
/// Implementations must not halt execution when recording; aborting (or not)
/// is the engine's decision per failure condition.
pub trait FailureReporter {
    /// Record one failure.
    ///
    /// `expected` mirrors the host framework's expected-failure flag and is
    /// always `false` for conditions raised by this engine.
    fn record(&mut self, message: &str, site: CallSite, expected: bool);
}

/// One recorded failure
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    /// Failure message
    pub message: String,
    /// Source file the failure is attributed to
    pub file: &'static str,
    /// Line the failure is attributed to
    pub line: u32,
    /// Whether the failure was expected
    pub expected: bool,
}

/// Default reporter: collects entries and logs each through `tracing`.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    failures: Vec<FailureEntry>,
}

impl CollectingReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded failures, in order
    #[must_use]
    pub fn failures(&self) -> &[FailureEntry] {
        &self.failures
    }

    /// Number of recorded failures
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Drop all recorded failures
    pub fn clear(&mut self) {
        self.failures.clear();
    }
}

impl FailureReporter for CollectingReporter {
    fn record(&mut self, message: &str, site: CallSite, expected: bool) {
        tracing::error!(site = %site, expected, "{message}");
        self.failures.push(FailureEntry {
            message: message.to_string(),
            file: site.file,
            line: site.line,
            expected,
        });
    }
}
