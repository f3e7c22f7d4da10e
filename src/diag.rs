//! Diagnostic sinks.
//!
//! The stub logs the raw identities of every call's parameters so caller
//! integration (pointer marshalling, byref vs. array decay) can be debugged.
//! Diagnostics are best-effort: a sink must never fail the operation, and
//! the line format is not a stable contract.
//!
//! The sink is injectable so tests can assert on call sites without
//! capturing standard error.

use std::io::Write;
use std::sync::Mutex;

/// Destination for human-readable diagnostic lines.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, line: &str);
}

/// Writes to standard error, matching the original shared-library stub.
///
/// Write errors are swallowed; diagnostics never fail a grab.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn record(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

/// Routes lines through the `log` facade at debug level.
///
/// Hosts that initialize `env_logger` see stub diagnostics interleaved with
/// their own output.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, line: &str) {
        log::debug!(target: "qhy_stub", "{line}");
    }
}

/// Records lines in memory for test assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, line: &str) {
        // A sink must never fail the operation, even after a panicking
        // thread poisoned the lock.
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}
