//! Modifiability filtering.
//!
//! The last step before a candidate list reaches an editing command:
//! redirect objects that declare a move-base to their base, reject objects
//! whose placement is read-only, and drop objects a scale operation could
//! not transform. Order is preserved; substitutions keep their position.

use caliper_core::{
    classification::Classification,
    document::{Document, DocumentObject},
    identifier::Id,
};

use crate::{
    classify::classify,
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector},
};

/// Checks whether a scale operation can transform the object.
///
/// Shape-bearing objects with a placement scale through their geometry;
/// containers, annotations, and image planes scale through their members
/// or display size.
fn is_scalable(obj: &DocumentObject) -> bool {
    if obj.placement().is_some() && obj.has_shape() {
        return true;
    }
    if obj.is_group() {
        return true;
    }
    matches!(
        classify(Some(obj)),
        Classification::Annotation | Classification::ImagePlane
    )
}

/// Filters candidate objects for a modification.
///
/// For each candidate, in order:
///
/// 1. When not copying, an object declaring a move-base is redirected to
///    its base object. If the base is shared by more than one
///    shape-bearing parent, a [`DiagnosticCode::SharedBase`] warning names
///    the object and the number of other sharers (the redirect still
///    happens). Under a scale request the redirect only happens for wire
///    bases; other aliased objects are dropped.
/// 2. When not copying, an object whose placement is read-only is dropped
///    with a [`DiagnosticCode::ReadOnlyPlacement`] error.
/// 3. Otherwise the object is kept, unless a scale was requested and the
///    object is not scalable, in which case it is silently dropped.
///
/// The result preserves input order minus dropped entries.
pub fn filter_for_modification(
    doc: &Document,
    objects: &[Id],
    copying: bool,
    scaling: bool,
    collector: &mut DiagnosticCollector,
) -> Vec<Id> {
    let mut result = Vec::new();
    for &id in objects {
        let Some(obj) = doc.object(id) else {
            continue;
        };

        let aliased_base = if !copying && obj.move_base() {
            obj.base()
        } else {
            None
        };
        if let Some(base) = aliased_base {
            let sharers = doc
                .in_list(base)
                .into_iter()
                .filter(|parent| doc.object(*parent).is_some_and(DocumentObject::has_shape))
                .count();
            if sharers > 1 {
                collector.emit(
                    Diagnostic::warning(format!(
                        "{id} shares a base with {} other objects. Please check if you want to modify this.",
                        sharers - 1
                    ))
                    .with_code(DiagnosticCode::SharedBase)
                    .with_object(id),
                );
            }
            if !scaling || classify(doc.object(base)) == Classification::Wire {
                result.push(base);
            }
        } else if !copying && obj.placement().is_some() && obj.placement_read_only() {
            collector.emit(
                Diagnostic::error(format!(
                    "{id} cannot be modified because its placement is readonly"
                ))
                .with_code(DiagnosticCode::ReadOnlyPlacement)
                .with_object(id),
            );
        } else if !scaling || is_scalable(obj) {
            result.push(id);
        }
    }
    result
}
