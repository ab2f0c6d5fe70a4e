//! Clone resolution.
//!
//! A clone takes its geometry from exactly one other object, referenced in
//! one of two forms:
//!
//! - the **container form**: the object is classified
//!   [`Classification::Clone`] and carries the base in its link list;
//! - the **back-reference form**: the object exposes a single-hop
//!   `cloned_of` reference, whatever its classification.
//!
//! Chains of clones are resolved transitively on request. Chains are
//! walked under a cycle guard; a self-referential or circular chain fails
//! with [`ResolveError::StructuralCycle`] instead of recursing without
//! bound.

use caliper_core::{classification::Classification, document::Document, identifier::Id};

use crate::{classify::classify, error::ResolveError, resolve::TraversalGuard};

/// Checks whether `object` is a clone, optionally of an expected kind.
///
/// For the container form the object must hold exactly one base link; an
/// unconstrained query (empty `expected`) then answers `true` outright.
/// Constrained queries compare the base's classification against
/// `expected` (any element may match); with `recursive` the comparison
/// walks down a chain of clone containers until a non-clone base is
/// reached.
///
/// The back-reference form is checked directly against `expected`,
/// ignoring `recursive`.
///
/// Anything else answers `false`, including containers with zero or more
/// than one base link.
///
/// # Errors
///
/// Fails with [`ResolveError::StructuralCycle`] if the chain revisits an
/// object.
pub fn is_clone(
    doc: &Document,
    object: Id,
    expected: &[Classification],
    recursive: bool,
) -> Result<bool, ResolveError> {
    let mut guard = TraversalGuard::new(object);
    is_clone_inner(doc, object, expected, recursive, &mut guard)
}

fn is_clone_inner(
    doc: &Document,
    object: Id,
    expected: &[Classification],
    recursive: bool,
    guard: &mut TraversalGuard,
) -> Result<bool, ResolveError> {
    guard.enter(object)?;
    let Some(obj) = doc.object(object) else {
        return Ok(false);
    };

    if classify(Some(obj)) == Classification::Clone {
        let [base] = obj.links() else {
            // Zero or several base links: no single original to speak of.
            return Ok(false);
        };
        if expected.is_empty() {
            return Ok(true);
        }
        let base_class = classify(doc.object(*base));
        if expected.contains(&base_class) {
            return Ok(true);
        }
        if recursive && base_class == Classification::Clone {
            return is_clone_inner(doc, *base, expected, recursive, guard);
        }
        return Ok(false);
    }

    if let Some(target) = obj.clone_of() {
        if expected.is_empty() {
            return Ok(true);
        }
        return Ok(expected.contains(&classify(doc.object(target))));
    }

    Ok(false)
}

/// Returns the object cloned by `object`, if any.
///
/// The back-reference form is preferred; the container form is consulted
/// next (taking the first base link of a non-empty container). With
/// `recursive` the resolution is applied transitively until a non-clone
/// is reached; otherwise a single hop is taken.
///
/// For an object that is a clone of neither form the result depends on
/// `strict`: `None` when strict, the object itself otherwise (identity
/// fallback).
///
/// # Errors
///
/// Fails with [`ResolveError::StructuralCycle`] if the chain revisits an
/// object.
pub fn clone_base(
    doc: &Document,
    object: Id,
    strict: bool,
    recursive: bool,
) -> Result<Option<Id>, ResolveError> {
    let mut guard = TraversalGuard::new(object);
    clone_base_inner(doc, object, strict, recursive, &mut guard)
}

fn clone_base_inner(
    doc: &Document,
    object: Id,
    strict: bool,
    recursive: bool,
    guard: &mut TraversalGuard,
) -> Result<Option<Id>, ResolveError> {
    guard.enter(object)?;
    let not_a_clone = || if strict { None } else { Some(object) };

    let Some(obj) = doc.object(object) else {
        return Ok(not_a_clone());
    };

    if let Some(target) = obj.clone_of() {
        if recursive {
            return clone_base_inner(doc, target, false, true, guard);
        }
        return Ok(Some(target));
    }

    if classify(Some(obj)) == Classification::Clone {
        if let Some(base) = obj.links().first() {
            if recursive {
                return clone_base_inner(doc, *base, false, true, guard);
            }
            return Ok(Some(*base));
        }
    }

    Ok(not_a_clone())
}

#[cfg(test)]
mod tests {
    use caliper_core::document::DocumentObject;

    use super::*;

    fn clone_container(name: &str, base: Id) -> DocumentObject {
        DocumentObject::new(name, "Clone")
            .with_class(Classification::Clone)
            .with_links(vec![base])
    }

    #[test]
    fn test_plain_object_is_not_a_clone() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());

        assert_eq!(is_clone(&doc, wire, &[], false), Ok(false));
        assert_eq!(is_clone(&doc, wire, &[Classification::Wire], true), Ok(false));
        assert_eq!(clone_base(&doc, wire, true, true), Ok(None));
        assert_eq!(clone_base(&doc, wire, false, true), Ok(Some(wire)));
    }

    #[test]
    fn test_container_form_unconstrained() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
        let clone = doc.add(clone_container("CloneA", wire));

        assert_eq!(is_clone(&doc, clone, &[], false), Ok(true));
        assert_eq!(clone_base(&doc, clone, false, false), Ok(Some(wire)));
        assert_eq!(clone_base(&doc, clone, true, false), Ok(Some(wire)));
    }

    #[test]
    fn test_container_form_expected_kind() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
        let clone = doc.add(clone_container("CloneA", wire));

        assert_eq!(is_clone(&doc, clone, &[Classification::Wire], false), Ok(true));
        assert_eq!(
            is_clone(&doc, clone, &[Classification::Group], false),
            Ok(false)
        );
        // A list matches if any element matches.
        assert_eq!(
            is_clone(
                &doc,
                clone,
                &[Classification::Group, Classification::Wire],
                false
            ),
            Ok(true)
        );
    }

    #[test]
    fn test_container_with_multiple_links_is_not_a_clone() {
        let mut doc = Document::new();
        let a = doc.add(DocumentObject::new("A", "Wire"));
        let b = doc.add(DocumentObject::new("B", "Wire"));
        let multi = doc.add(
            DocumentObject::new("Multi", "Clone")
                .with_class(Classification::Clone)
                .with_links(vec![a, b]),
        );
        let empty = doc.add(
            DocumentObject::new("Empty", "Clone").with_class(Classification::Clone),
        );

        assert_eq!(is_clone(&doc, multi, &[], false), Ok(false));
        assert_eq!(is_clone(&doc, empty, &[], false), Ok(false));
        // clone_base still follows the first link of a non-empty container.
        assert_eq!(clone_base(&doc, multi, false, false), Ok(Some(a)));
        assert_eq!(clone_base(&doc, empty, true, false), Ok(None));
    }

    #[test]
    fn test_chain_resolution() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
        let inner = doc.add(clone_container("Inner", wire));
        let outer = doc.add(clone_container("Outer", inner));

        // One hop versus the full chain.
        assert_eq!(clone_base(&doc, outer, false, false), Ok(Some(inner)));
        assert_eq!(clone_base(&doc, outer, false, true), Ok(Some(wire)));

        // The kind check only reaches the ultimate base recursively.
        assert_eq!(
            is_clone(&doc, outer, &[Classification::Wire], false),
            Ok(false)
        );
        assert_eq!(
            is_clone(&doc, outer, &[Classification::Wire], true),
            Ok(true)
        );
    }

    #[test]
    fn test_back_reference_form() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
        let mirror = doc.add(DocumentObject::new("Mirror", "Mirror").with_clone_of(wire));

        assert_eq!(is_clone(&doc, mirror, &[], false), Ok(true));
        assert_eq!(
            is_clone(&doc, mirror, &[Classification::Wire], false),
            Ok(true)
        );
        assert_eq!(
            is_clone(&doc, mirror, &[Classification::Group], true),
            Ok(false)
        );
        assert_eq!(clone_base(&doc, mirror, false, false), Ok(Some(wire)));
    }

    #[test]
    fn test_back_reference_chain() {
        let mut doc = Document::new();
        let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
        let first = doc.add(DocumentObject::new("First", "Mirror").with_clone_of(wire));
        let second = doc.add(DocumentObject::new("Second", "Mirror").with_clone_of(first));

        assert_eq!(clone_base(&doc, second, false, true), Ok(Some(wire)));
        assert_eq!(clone_base(&doc, second, false, false), Ok(Some(first)));
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let mut doc = Document::new();
        let narcissus = Id::new("Narcissus");
        doc.add(DocumentObject::new("Narcissus", "Mirror").with_clone_of(narcissus));

        assert_eq!(
            clone_base(&doc, narcissus, false, true),
            Err(ResolveError::cycle(narcissus))
        );
        // Non-recursive resolution takes one hop and never meets the cycle.
        assert_eq!(clone_base(&doc, narcissus, false, false), Ok(Some(narcissus)));
    }

    #[test]
    fn test_two_object_cycle() {
        let mut doc = Document::new();
        let a = Id::new("CycA");
        let b = Id::new("CycB");
        doc.add(DocumentObject::new("CycA", "Mirror").with_clone_of(b));
        doc.add(DocumentObject::new("CycB", "Mirror").with_clone_of(a));

        assert_eq!(
            clone_base(&doc, a, false, true),
            Err(ResolveError::cycle(a))
        );
    }

    #[test]
    fn test_container_cycle_in_is_clone() {
        let mut doc = Document::new();
        let a = Id::new("LoopA");
        let b = Id::new("LoopB");
        doc.add(
            DocumentObject::new("LoopA", "Clone")
                .with_class(Classification::Clone)
                .with_links(vec![b]),
        );
        doc.add(
            DocumentObject::new("LoopB", "Clone")
                .with_class(Classification::Clone)
                .with_links(vec![a]),
        );

        assert_eq!(
            is_clone(&doc, a, &[Classification::Wire], true),
            Err(ResolveError::cycle(a))
        );
    }
}
