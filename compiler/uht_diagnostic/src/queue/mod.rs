//! Diagnostic queue for collecting, counting, and ordering diagnostics.
//!
//! Headers are parsed in parallel, so diagnostics arrive in no useful
//! order. The queue keeps running error / warning counts for the phase
//! barriers and hands back a stable (file, line) ordering on flush.

use crate::{Diagnostic, Severity};

/// Collects diagnostics for one run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    warnings_as_errors: bool,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count warnings toward failure.
    #[must_use]
    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Errors, plus warnings when they are promoted.
    pub fn failure_count(&self) -> usize {
        if self.warnings_as_errors {
            self.error_count + self.warning_count
        } else {
            self.error_count
        }
    }

    /// Whether the run must stop at the next phase barrier.
    pub fn has_errors(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Take every diagnostic, ordered by file then line.
    ///
    /// The sort is stable so diagnostics on the same line keep their
    /// report order. Exact duplicates (same file, line, code and message)
    /// are collapsed. Counts are kept.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by(|a, b| (&a.file, a.line).cmp(&(&b.file, b.line)));
        diagnostics.dedup_by(|a, b| {
            a.file == b.file && a.line == b.line && a.code == b.code && a.message == b.message
        });
        diagnostics
    }
}
