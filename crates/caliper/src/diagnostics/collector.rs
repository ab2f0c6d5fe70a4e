//! Collector for accumulating diagnostics during a resolution pass.
//!
//! The [`DiagnosticCollector`] allows one bad entry to be reported without
//! losing the rest of a multi-entry selection.

use log::{error, info, warn};

use crate::diagnostics::{Diagnostic, Severity};

/// A collector for accumulating diagnostics during a resolution pass.
///
/// Every emitted diagnostic is also forwarded to the log at the matching
/// level, so resolution leaves a trace even when the caller discards the
/// returned diagnostics.
///
/// # Example
///
/// ```
/// # use caliper::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticCode};
/// # use caliper_core::identifier::Id;
/// let mut collector = DiagnosticCollector::new();
///
/// collector.emit(
///     Diagnostic::warning("Wire001 has been removed from the document")
///         .with_code(DiagnosticCode::StaleReference)
///         .with_object(Id::new("Wire001")),
/// );
///
/// assert!(!collector.has_errors());
/// assert_eq!(collector.into_diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector and to the log.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => {
                self.has_errors = true;
                error!(code:? = diagnostic.code(); "{}", diagnostic.message());
            }
            Severity::Warning => warn!(code:? = diagnostic.code(); "{}", diagnostic.message()),
            Severity::Info => info!(code:? = diagnostic.code(); "{}", diagnostic.message()),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` if any emitted diagnostic was an error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns the number of collected diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if no diagnostics were collected.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection, returning the accumulated diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
