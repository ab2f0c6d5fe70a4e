//! Classification facade over document objects.
//!
//! A thin shim between the engine and the classification the store
//! declares: it only adds null-safety, so traversal code can classify
//! lookup results without unwrapping them first.

use caliper_core::{
    classification::Classification,
    document::{Document, DocumentObject},
    identifier::Id,
};

/// Returns the classification of the given object.
///
/// `None` (a missing or deleted object) classifies as
/// [`Classification::Unknown`]; otherwise the object's own classification
/// is reported — its declared extension tag if present, the tag derived
/// from its generic type identifier otherwise. Never panics.
pub fn classify(object: Option<&DocumentObject>) -> Classification {
    match object {
        None => Classification::Unknown,
        Some(obj) => obj.classification(),
    }
}

/// Returns only the objects of the given kind, preserving input order.
pub fn objects_of_kind(doc: &Document, objects: &[Id], kind: &Classification) -> Vec<Id> {
    objects
        .iter()
        .copied()
        .filter(|id| classify(doc.object(*id)) == *kind)
        .collect()
}
