//! Error types for selection resolution.
//!
//! This module provides [`ResolveError`], the only error that escapes a
//! resolution call. Recoverable conditions travel through the
//! [`diagnostics`](crate::diagnostics) channel instead.

use thiserror::Error;

use caliper_core::identifier::Id;

/// A traversal failure during selection resolution.
///
/// Cycle detection is branch-local: the selection processor converts a
/// [`ResolveError::StructuralCycle`] from one entry into a diagnostic and
/// keeps processing the rest of the batch. Only
/// [`ResolveError::DepthExceeded`] aborts a whole call, as a single
/// aggregate error naming the object the runaway traversal started from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A clone chain, movable-children tree, or nested group structure
    /// revisited an object already on the current traversal path.
    #[error("structural cycle detected while resolving `{object}`")]
    StructuralCycle {
        /// The object that was reached a second time.
        object: Id,
    },

    /// A traversal exceeded the safety bound without revisiting any
    /// object; the document structure is deeper than the engine is
    /// willing to walk.
    #[error("traversal starting at `{start}` exceeded the depth bound of {limit}")]
    DepthExceeded {
        /// The object the traversal started from.
        start: Id,
        /// The depth bound that was hit.
        limit: usize,
    },
}

impl ResolveError {
    /// Create a cycle error for the given object.
    pub fn cycle(object: Id) -> Self {
        Self::StructuralCycle { object }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_object() {
        let err = ResolveError::cycle(Id::new("Clone007"));
        assert_eq!(
            err.to_string(),
            "structural cycle detected while resolving `Clone007`"
        );
    }

    #[test]
    fn test_depth_display_names_start_and_limit() {
        let err = ResolveError::DepthExceeded {
            start: Id::new("Site"),
            limit: 256,
        };
        assert!(err.to_string().contains("Site"));
        assert!(err.to_string().contains("256"));
    }
}
