//! Error adapter for converting engine diagnostics to miette diagnostics.
//!
//! This module provides the bridge between the library's diagnostic and
//! error types and miette's rich formatting used in the CLI. Engine
//! diagnostics carry an offending object rather than a source span, so no
//! source-code snippets are rendered; severity, code, and the code's
//! description come through.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use caliper::diagnostics::{Diagnostic, Severity};

use crate::error::CliError;

/// Adapter for a single engine diagnostic.
///
/// Wraps a [`Diagnostic`] and implements [`MietteDiagnostic`] to enable
/// rich formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|code| Box::new(code.description()) as Box<dyn fmt::Display>)
    }
}

/// Adapter for fatal [`CliError`]s.
///
/// These have no rich diagnostic information beyond their message: I/O
/// failures, document description problems, and the engine's aggregate
/// depth error.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use caliper::diagnostics::DiagnosticCode;

    use super::*;

    #[test]
    fn test_diagnostic_adapter_maps_severity_and_code() {
        let diag = Diagnostic::warning("shared base").with_code(DiagnosticCode::SharedBase);
        let adapter = DiagnosticAdapter::new(&diag);

        assert_eq!(adapter.severity(), Some(miette::Severity::Warning));
        assert_eq!(adapter.code().unwrap().to_string(), "S003");
        assert_eq!(adapter.to_string(), "shared base");
    }

    #[test]
    fn test_info_maps_to_advice() {
        let diag = Diagnostic::info("fyi");
        let adapter = DiagnosticAdapter::new(&diag);
        assert_eq!(adapter.severity(), Some(miette::Severity::Advice));
    }
}
