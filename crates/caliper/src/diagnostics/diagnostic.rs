//! The core diagnostic type for the selection diagnostic system.
//!
//! A [`Diagnostic`] represents a single recoverable condition with a
//! severity, an optional stable code, and optionally the name of the
//! offending object.

use std::fmt;

use caliper_core::identifier::Id;

use crate::diagnostics::{DiagnosticCode, Severity};

/// A diagnostic message produced during selection resolution.
///
/// Diagnostics carry:
/// - A severity level
/// - An optional [`DiagnosticCode`] for branching and documentation
/// - A primary message describing the condition
/// - Optionally, the name of the offending object
///
/// # Example
///
/// ```
/// # use caliper::diagnostics::{Diagnostic, DiagnosticCode, Severity};
/// # use caliper_core::identifier::Id;
/// let diag = Diagnostic::warning("Pad001 shares a base with 2 other objects.")
///     .with_code(DiagnosticCode::SharedBase)
///     .with_object(Id::new("Pad001"));
///
/// assert_eq!(diag.severity(), Severity::Warning);
/// assert_eq!(diag.object(), Some(Id::new("Pad001")));
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<DiagnosticCode>,
    message: String,
    object: Option<Id>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an info diagnostic.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the stable code, if any.
    pub fn code(&self) -> Option<DiagnosticCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the offending object, if one is attached.
    pub fn object(&self) -> Option<Id> {
        self.object
    }

    /// Set the stable code.
    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the offending object.
    pub fn with_object(mut self, object: Id) -> Self {
        self.object = Some(object);
        self
    }

    /// Create a new diagnostic with the given severity and message.
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            object: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}[{}]: {}", self.severity, code, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        assert_eq!(Diagnostic::error("boom").severity(), Severity::Error);
        assert_eq!(Diagnostic::warning("hm").severity(), Severity::Warning);
        assert_eq!(Diagnostic::info("fyi").severity(), Severity::Info);
    }

    #[test]
    fn test_builder_attaches_code_and_object() {
        let diag = Diagnostic::error("readonly")
            .with_code(DiagnosticCode::ReadOnlyPlacement)
            .with_object(Id::new("Wire001"));

        assert_eq!(diag.code(), Some(DiagnosticCode::ReadOnlyPlacement));
        assert_eq!(diag.object(), Some(Id::new("Wire001")));
        assert_eq!(diag.message(), "readonly");
    }

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::warning("shared base").with_code(DiagnosticCode::SharedBase);
        assert_eq!(diag.to_string(), "warning[S003]: shared base");
    }

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::error("readonly placement");
        assert_eq!(diag.to_string(), "error: readonly placement");
    }
}
