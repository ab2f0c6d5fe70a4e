//! Stable codes for the selection diagnostic system.
//!
//! Codes identify the condition independently of the message wording, so
//! callers can branch on them and documentation can reference them.

use std::fmt;

/// Stable identifier for a diagnostic condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// A clone chain, movable-children tree, or nested group structure
    /// revisited an object already on the current traversal path. The
    /// affected branch was abandoned.
    StructuralCycle,

    /// An object was dropped from the resolution because its placement is
    /// marked read-only.
    ReadOnlyPlacement,

    /// An object's base is shared by other shape-bearing parents;
    /// modifying it affects them all. Advisory only.
    SharedBase,

    /// A sub-element path could not be parsed or resolved; the single
    /// sub-element was skipped.
    MalformedSubElement,

    /// A selection entry referenced an object that is no longer attached
    /// to the document; the entry was skipped.
    StaleReference,
}

impl DiagnosticCode {
    /// Returns the stable code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::StructuralCycle => "S001",
            DiagnosticCode::ReadOnlyPlacement => "S002",
            DiagnosticCode::SharedBase => "S003",
            DiagnosticCode::MalformedSubElement => "S004",
            DiagnosticCode::StaleReference => "S005",
        }
    }

    /// Returns a short description of the condition.
    pub fn description(&self) -> &'static str {
        match self {
            DiagnosticCode::StructuralCycle => "cycle detected during graph traversal",
            DiagnosticCode::ReadOnlyPlacement => "object placement is read-only",
            DiagnosticCode::SharedBase => "base object is shared by other parents",
            DiagnosticCode::MalformedSubElement => "sub-element path is malformed",
            DiagnosticCode::StaleReference => "object is no longer in the document",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
