//! Diagnostic system for selection resolution.
//!
//! Resolution degrades gracefully: a bad entry in a multi-entry selection
//! must not lose the rest of the batch. Recoverable conditions are
//! therefore reported as diagnostics through a collector instead of being
//! raised as control-flow interruptions, and returned alongside the
//! resolution results.
//!
//! # Overview
//!
//! The system is built around the [`Diagnostic`] type, which represents a
//! single message with a severity, an optional stable code, and optionally
//! the name of the offending object. Diagnostics are accumulated in a
//! [`DiagnosticCollector`] during a resolution pass.
//!
//! # Example
//!
//! ```
//! # use caliper::diagnostics::{Diagnostic, DiagnosticCode};
//! # use caliper_core::identifier::Id;
//! let diag = Diagnostic::error("Wire001 cannot be modified because its placement is readonly")
//!     .with_code(DiagnosticCode::ReadOnlyPlacement)
//!     .with_object(Id::new("Wire001"));
//! ```

mod code;
mod collector;
mod diagnostic;
mod severity;

pub use code::DiagnosticCode;
pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use severity::Severity;
