//! Group expansion.
//!
//! Expands a container object into its transitive member list, preserving
//! the stored member order and never reporting the same object twice even
//! when it is reachable through several containers. Nested containers are
//! walked under a cycle guard.

use indexmap::IndexSet;

use caliper_core::{classification::Classification, document::Document, identifier::Id};

use crate::{classify::classify, error::ResolveError, resolve::TraversalGuard};

/// Configuration flags for group expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupExpansion {
    /// Include the containers themselves in the result, not only their
    /// contents.
    pub include_groups: bool,

    /// Include spacer placeholders even when containers themselves are
    /// excluded, so downstream consumers keep their spacing conventions.
    pub include_spacers: bool,

    /// Do not descend into [`Classification::Assembly`] containers; their
    /// children are positioned by the assembly solver and must not be
    /// transformed independently.
    pub skip_assembly_children: bool,
}

impl GroupExpansion {
    /// The configuration the selection processor uses: containers and
    /// spacers included, assembly children left alone.
    pub fn for_modifiers() -> Self {
        Self {
            include_groups: true,
            include_spacers: true,
            skip_assembly_children: true,
        }
    }
}

/// Expands `object` into an ordered sequence of members.
///
/// A non-container object expands to itself. Containers expand to their
/// members in stored order, recursing into nested containers; whether the
/// containers themselves appear in the result is controlled by
/// [`GroupExpansion`]. Objects reachable through several paths are
/// reported once, at their first position.
///
/// # Errors
///
/// Fails with [`ResolveError::StructuralCycle`] if a container contains
/// itself, directly or transitively, and with
/// [`ResolveError::DepthExceeded`] past the safety bound.
pub fn expand_group(
    doc: &Document,
    object: Id,
    options: GroupExpansion,
) -> Result<Vec<Id>, ResolveError> {
    let mut out = IndexSet::new();
    let mut guard = TraversalGuard::new(object);
    expand_inner(doc, object, options, &mut guard, &mut out)?;
    Ok(out.into_iter().collect())
}

fn expand_inner(
    doc: &Document,
    object: Id,
    options: GroupExpansion,
    guard: &mut TraversalGuard,
    out: &mut IndexSet<Id>,
) -> Result<(), ResolveError> {
    let Some(obj) = doc.object(object) else {
        // A dangling member reference; the stale entry has nothing to
        // contribute.
        return Ok(());
    };

    if !obj.is_group() {
        out.insert(object);
        return Ok(());
    }

    let class = classify(Some(obj));
    if options.include_groups || (options.include_spacers && class == Classification::Spacer) {
        out.insert(object);
    }
    if options.skip_assembly_children && class == Classification::Assembly {
        return Ok(());
    }

    guard.enter(object)?;
    for member in obj.members() {
        expand_inner(doc, *member, options, guard, out)?;
    }
    guard.exit(object);
    Ok(())
}
