//! Severity levels for diagnostics.
//!
//! This module defines the severity of diagnostic messages,
//! distinguishing fatal conditions from advisory ones.

use std::fmt;

/// The severity level of a diagnostic.
///
/// Severity determines how the diagnostic should be handled:
/// - [`Severity::Error`] indicates a condition that dropped an object or
///   branch from the resolution
/// - [`Severity::Warning`] indicates an advisory issue; the affected
///   object stays in the resolution
/// - [`Severity::Info`] is purely informational
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A condition that removed an object or branch from the result.
    ///
    /// The rest of the batch is still processed; errors never abort a
    /// resolution call on their own.
    Error,

    /// An advisory issue the caller should surface to the user.
    ///
    /// The affected object remains in the result.
    Warning,

    /// Informational output with no effect on the result.
    Info,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if this is an info severity.
    pub fn is_info(&self) -> bool {
        matches!(self, Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
