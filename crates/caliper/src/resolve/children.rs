//! Movable-children discovery.
//!
//! Some object kinds declare dependents that must translate and rotate
//! together with them, through the
//! [`MovableChildren`](caliper_core::document::MovableChildren) capability.
//! This module builds the transitive closure of those dependents for one
//! object: direct children first, then each child's own descendants, in a
//! pre-order walk. The walk runs under a cycle guard; a child list that
//! leads back to an object on the current path fails with
//! [`ResolveError::StructuralCycle`].

use caliper_core::{document::Document, identifier::Id};

use crate::{error::ResolveError, resolve::TraversalGuard};

/// Returns the transitive closure of `object`'s movable children.
///
/// Objects without the capability (including `object` itself) contribute
/// nothing. Visitation order is preserved: an object's direct children
/// come before their own descendants.
///
/// # Errors
///
/// Fails with [`ResolveError::StructuralCycle`] if a child list reaches
/// back to an object on the current path, and with
/// [`ResolveError::DepthExceeded`] past the safety bound.
pub fn movable_children(doc: &Document, object: Id) -> Result<Vec<Id>, ResolveError> {
    let mut out = Vec::new();
    let mut guard = TraversalGuard::new(object);
    collect(doc, object, &mut guard, &mut out)?;
    Ok(out)
}

fn collect(
    doc: &Document,
    object: Id,
    guard: &mut TraversalGuard,
    out: &mut Vec<Id>,
) -> Result<(), ResolveError> {
    let Some(obj) = doc.object(object) else {
        return Ok(());
    };
    let Some(hook) = obj.movable() else {
        return Ok(());
    };

    guard.enter(object)?;
    let children = hook.movable_children(doc);
    out.extend(children.iter().copied());
    for child in children {
        collect(doc, child, guard, out)?;
    }
    guard.exit(object);
    Ok(())
}

#[cfg(test)]
mod tests {
    use caliper_core::document::{DocumentObject, StaticChildren};

    use super::*;

    fn with_children(name: &str, children: Vec<Id>) -> DocumentObject {
        DocumentObject::new(name, "Wire").with_movable(Box::new(StaticChildren::new(children)))
    }

    #[test]
    fn test_object_without_capability_has_no_children() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire"));

        assert_eq!(movable_children(&doc, wire), Ok(vec![]));
    }

    #[test]
    fn test_direct_children() {
        let mut doc = Document::new();
        let a = doc.add(DocumentObject::new("A", "Wire"));
        let b = doc.add(DocumentObject::new("B", "Wire"));
        let host = doc.add(with_children("Host", vec![a, b]));

        assert_eq!(movable_children(&doc, host), Ok(vec![a, b]));
    }

    #[test]
    fn test_preorder_transitive_closure() {
        let mut doc = Document::new();
        let leaf1 = doc.add(DocumentObject::new("Leaf1", "Wire"));
        let leaf2 = doc.add(DocumentObject::new("Leaf2", "Wire"));
        let mid1 = doc.add(with_children("Mid1", vec![leaf1]));
        let mid2 = doc.add(with_children("Mid2", vec![leaf2]));
        let host = doc.add(with_children("Host", vec![mid1, mid2]));

        // Both direct children come first, then each child's descendants.
        assert_eq!(
            movable_children(&doc, host),
            Ok(vec![mid1, mid2, leaf1, leaf2])
        );
    }

    #[test]
    fn test_dangling_child_contributes_nothing_further() {
        let mut doc = Document::new();
        let gone = doc.add(DocumentObject::new("Gone", "Wire"));
        let host = doc.add(with_children("Host", vec![gone]));
        doc.remove(gone);

        // The stale reference itself is still reported; only its own
        // children are unreachable.
        assert_eq!(movable_children(&doc, host), Ok(vec![gone]));
    }

    #[test]
    fn test_self_referential_hook_is_a_cycle() {
        let mut doc = Document::new();
        let hook = Id::new("Hooked");
        doc.add(with_children("Hooked", vec![hook]));

        assert_eq!(
            movable_children(&doc, hook),
            Err(ResolveError::cycle(hook))
        );
    }

    #[test]
    fn test_mutual_hooks_are_a_cycle() {
        let mut doc = Document::new();
        let a = Id::new("HookA");
        let b = Id::new("HookB");
        doc.add(with_children("HookA", vec![b]));
        doc.add(with_children("HookB", vec![a]));

        assert_eq!(movable_children(&doc, a), Err(ResolveError::cycle(a)));
    }

    #[test]
    fn test_shared_child_across_branches_is_not_a_cycle() {
        let mut doc = Document::new();
        let shared = doc.add(DocumentObject::new("Shared", "Wire"));
        let left = doc.add(with_children("Left", vec![shared]));
        let right = doc.add(with_children("Right", vec![shared]));
        let host = doc.add(with_children("Host", vec![left, right]));

        // The shared leaf is reported once per branch, as each branch
        // genuinely depends on it; only path revisits are cycles.
        assert_eq!(
            movable_children(&doc, host),
            Ok(vec![left, right, shared, shared])
        );
    }
}
