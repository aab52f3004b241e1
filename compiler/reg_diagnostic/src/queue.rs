//! Diagnostic queue for collecting, deduplicating, and ordering diagnostics.
//!
//! Per-declaration pipelines run independently (possibly in parallel) and
//! produce diagnostics in whatever order they finish; the queue is where
//! they converge. Flushing sorts by (origin, code, message) so a run's
//! report is deterministic regardless of scheduling.

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode, Severity};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped
    /// (0 = unlimited). Warnings and notes are never limited.
    pub error_limit: usize,
    /// Drop repeats of the same (code, origin) pair.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// A config with no limits and no dedup (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating, and ordering diagnostics.
#[derive(Debug, Default)]
pub struct DiagnosticQueue {
    config: DiagnosticConfig,
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(ErrorCode, Option<String>)>,
    error_count: usize,
    warning_count: usize,
    /// Errors dropped after the limit was hit.
    truncated: usize,
}

impl DiagnosticQueue {
    /// Create a queue with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a queue with an explicit configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            warning_count: 0,
            truncated: 0,
        }
    }

    /// Add one diagnostic, applying dedup and the error limit.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if self.config.deduplicate {
            let key = (diagnostic.code, diagnostic.origin.clone());
            if !self.seen.insert(key) {
                return;
            }
        }

        match diagnostic.severity {
            Severity::Error => {
                if self.config.error_limit != 0 && self.error_count >= self.config.error_limit {
                    self.truncated += 1;
                    return;
                }
                self.error_count += 1;
            }
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        self.diagnostics.push(diagnostic);
    }

    /// Add every diagnostic from an iterator.
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.add(diagnostic);
        }
    }

    /// Number of errors accepted so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warnings accepted so far.
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Number of errors dropped by the limit.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Whether any error was accepted.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Drain the queue in deterministic order: by origin, then code, then
    /// message. The insertion order (parallel completion order) never leaks
    /// into the report.
    pub fn flush(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| {
            (a.origin.as_deref(), a.code, a.message.as_str()).cmp(&(
                b.origin.as_deref(),
                b.code,
                b.message.as_str(),
            ))
        });
        self.diagnostics
    }
}

#[cfg(test)]
mod tests;
