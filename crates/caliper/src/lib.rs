//! Caliper - selection resolution for parametric document graphs.
//!
//! Caliper turns a raw user selection (document objects plus optional
//! sub-element paths) into the concrete, filtered set of transformable
//! entities a geometric editing command (move, copy, scale, array)
//! should actually operate on. That involves recursive group expansion,
//! clone-chain resolution, movable-children discovery through a
//! capability hook, placement composition relative to the sub-element
//! context, and exclusion rules protecting shared or read-only geometry.
//!
//! The engine holds no state of its own: everything is resolved per call
//! against a borrowed [`document::Document`], and recoverable problems
//! are reported as [`diagnostics::Diagnostic`]s alongside the result
//! instead of failing the batch.
//!
//! # Examples
//!
//! ```
//! use caliper::{ModifierOptions, SelectionEntry, SelectionResolver};
//! use caliper_core::document::{Document, DocumentObject};
//!
//! let mut doc = Document::new();
//! let x = doc.add(DocumentObject::new("X", "Wire").with_shape());
//! let y = doc.add(DocumentObject::new("Y", "Wire").with_shape());
//! let group = doc.add(DocumentObject::new("G", "Group").with_members(vec![x, y]));
//!
//! let resolver = SelectionResolver::new(&doc);
//! let resolution = resolver
//!     .process_selection(&[SelectionEntry::new(group)], ModifierOptions::default())
//!     .expect("document nesting is shallow");
//!
//! // The group expands to itself and its members, each paired with the
//! // identity placement of a top-level selection.
//! assert!(resolution.objects().contains(&x));
//! assert!(resolution.objects().contains(&y));
//! ```

pub mod classify;
pub mod diagnostics;
pub mod resolve;

mod error;

pub use caliper_core::{classification, document, identifier, placement};

pub use error::ResolveError;
pub use resolve::{
    children::movable_children,
    clone::{clone_base, is_clone},
    filter::filter_for_modification,
    group::{GroupExpansion, expand_group},
};
pub use resolve::selection::{
    ModifierOptions, Provenance, Resolution, SelectionEntry, SelectionResolver, SubElementKind,
    SubElementPath, SubElementTarget, SubResolution,
};
