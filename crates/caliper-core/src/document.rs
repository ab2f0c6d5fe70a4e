//! The in-process document object store.
//!
//! This module models the externally-owned store the selection engine
//! resolves against: named objects with capability flags, group membership,
//! clone references, and placements.
//!
//! # Architecture
//!
//! The module provides:
//! - [`DocumentObject`]: One object with its capability data
//! - [`MovableChildren`]: Opt-in capability for objects that declare
//!   dependents which must move together with them
//! - [`Document`]: Insertion-ordered store with name/label lookup, inbound
//!   reference enumeration, and sub-object path resolution
//!
//! The engine never owns objects; it holds [`Id`]s and resolves them
//! against a `&Document` for the duration of one call. The store preserves
//! insertion order, which is also the order group expansion reports
//! members in.
//!
//! # Sub-object paths
//!
//! A sub-object path is a `.`-separated chain of member names, optionally
//! terminated by a geometric element reference (`Vertex<n>`, `Edge<n>`,
//! `Face<n>`): `"Level.Frame.Edge3"` addresses `Frame` inside `Level`,
//! narrowed to its third edge. The empty path addresses the root object
//! itself.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::{
    classification::Classification,
    identifier::{Id, real_name},
    placement::Placement,
};

/// Error produced while resolving a sub-object path against the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The object the path starts from is no longer in the document.
    #[error("object `{0}` is not attached to the document")]
    StaleObject(Id),

    /// A path segment names neither a member of its parent nor a
    /// trailing geometric element reference.
    #[error("path segment `{segment}` does not resolve under `{parent}`")]
    Unresolved { parent: Id, segment: String },
}

/// Capability for objects that declare dependents which must translate and
/// rotate together with them.
///
/// Concrete object kinds opt in by installing an implementation on their
/// [`DocumentObject`]; the discoverer queries the capability instead of
/// probing methods reflectively. Implementations report direct children
/// only; transitive discovery is the engine's job.
pub trait MovableChildren: fmt::Debug {
    /// Returns the direct dependents of this object.
    fn movable_children(&self, doc: &Document) -> Vec<Id>;
}

/// A [`MovableChildren`] implementation backed by a fixed list.
///
/// Object kinds whose dependents do not vary with document state declare
/// them statically with this.
#[derive(Debug, Clone, Default)]
pub struct StaticChildren(Vec<Id>);

impl StaticChildren {
    /// Creates a static child list.
    pub fn new(children: Vec<Id>) -> Self {
        Self(children)
    }
}

impl MovableChildren for StaticChildren {
    fn movable_children(&self, _doc: &Document) -> Vec<Id> {
        self.0.clone()
    }
}

/// A single document object with its capability data.
///
/// Objects are built with the `with_*` methods and handed to
/// [`Document::add`], which owns them from then on:
///
/// ```
/// use caliper_core::document::{Document, DocumentObject};
///
/// let mut doc = Document::new();
/// let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
/// assert!(doc.contains(wire));
/// ```
#[derive(Debug)]
pub struct DocumentObject {
    name: Id,
    label: String,
    declared_class: Option<Classification>,
    type_id: String,
    placement: Option<Placement>,
    placement_read_only: bool,
    has_shape: bool,
    is_group: bool,
    members: Vec<Id>,
    links: Vec<Id>,
    clone_of: Option<Id>,
    move_base: bool,
    base: Option<Id>,
    movable: Option<Box<dyn MovableChildren>>,
}

impl DocumentObject {
    /// Creates a new object with the given name and generic type
    /// identifier. The name may be adjusted by [`Document::add`] to keep
    /// names unique.
    pub fn new(name: &str, type_id: &str) -> Self {
        Self {
            name: Id::new(name),
            label: name.to_string(),
            declared_class: None,
            type_id: type_id.to_string(),
            placement: None,
            placement_read_only: false,
            has_shape: false,
            is_group: false,
            members: Vec::new(),
            links: Vec::new(),
            clone_of: None,
            move_base: false,
            base: None,
            movable: None,
        }
    }

    /// Sets the user-visible label. Labels are not guaranteed unique.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Declares a classification through the object's extension mechanism,
    /// overriding the tag derived from the type identifier.
    pub fn with_class(mut self, class: Classification) -> Self {
        self.declared_class = Some(class);
        self
    }

    /// Attaches a placement to the object.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Marks the object's placement as read-only.
    pub fn with_read_only_placement(mut self) -> Self {
        self.placement_read_only = true;
        self
    }

    /// Marks the object as carrying topological shape data.
    pub fn with_shape(mut self) -> Self {
        self.has_shape = true;
        self
    }

    /// Marks the object as a container and sets its ordered member list.
    pub fn with_members(mut self, members: Vec<Id>) -> Self {
        self.is_group = true;
        self.members = members;
        self
    }

    /// Sets the clone-container base reference list.
    pub fn with_links(mut self, links: Vec<Id>) -> Self {
        self.links = links;
        self
    }

    /// Sets the single-hop cloned-of back-reference.
    pub fn with_clone_of(mut self, target: Id) -> Self {
        self.clone_of = Some(target);
        self
    }

    /// Declares that modifying this object should redirect to its base.
    pub fn with_move_base(mut self, base: Id) -> Self {
        self.move_base = true;
        self.base = Some(base);
        self
    }

    /// Installs the [`MovableChildren`] capability.
    pub fn with_movable(mut self, movable: Box<dyn MovableChildren>) -> Self {
        self.movable = Some(movable);
        self
    }

    /// Returns the unique object name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// Returns the user-visible label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the generic type identifier.
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// Returns this object's classification: the declared extension tag if
    /// present, otherwise the tag derived from the type identifier.
    pub fn classification(&self) -> Classification {
        self.declared_class
            .clone()
            .unwrap_or_else(|| Classification::from_tag(&self.type_id))
    }

    /// Returns the placement, if the object exposes one.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Returns the placement, falling back to the identity.
    pub fn placement_or_identity(&self) -> Placement {
        self.placement.unwrap_or_default()
    }

    /// Checks whether the placement is marked read-only.
    pub fn placement_read_only(&self) -> bool {
        self.placement_read_only
    }

    /// Checks whether the object carries topological shape data.
    pub fn has_shape(&self) -> bool {
        self.has_shape
    }

    /// Checks whether the object is a container of member objects.
    pub fn is_group(&self) -> bool {
        self.is_group
    }

    /// Returns the ordered member list (empty for non-containers).
    pub fn members(&self) -> &[Id] {
        &self.members
    }

    /// Returns the clone-container base reference list.
    pub fn links(&self) -> &[Id] {
        &self.links
    }

    /// Returns the cloned-of back-reference, if any.
    pub fn clone_of(&self) -> Option<Id> {
        self.clone_of
    }

    /// Checks whether modifications should redirect to the base object.
    pub fn move_base(&self) -> bool {
        self.move_base
    }

    /// Returns the base reference, if any.
    pub fn base(&self) -> Option<Id> {
        self.base
    }

    /// Returns the movable-children capability, if the object opts in.
    pub fn movable(&self) -> Option<&dyn MovableChildren> {
        self.movable.as_deref()
    }
}

/// The document object store.
///
/// Holds objects in insertion order and answers the queries the selection
/// engine needs: lookup by name and label, membership polling, inbound
/// reference enumeration, and sub-object path resolution.
#[derive(Debug, Default)]
pub struct Document {
    objects: IndexMap<Id, DocumentObject>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of objects in the document.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks whether the document holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the object with the given name, if it exists.
    pub fn object(&self, id: Id) -> Option<&DocumentObject> {
        self.objects.get(&id)
    }

    /// Checks whether an object with the given name exists.
    pub fn contains(&self, id: Id) -> bool {
        self.objects.contains_key(&id)
    }

    /// Checks whether the object has been removed from the document.
    ///
    /// Selections are captured before resolution runs, so an entry may
    /// reference an object deleted in between; the engine polls with this
    /// instead of relying on mutation notifications.
    pub fn is_deleted(&self, id: Id) -> bool {
        !self.contains(id)
    }

    /// Returns an iterator over all objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &DocumentObject> {
        self.objects.values()
    }

    /// Returns the first object with the given label, in insertion order.
    ///
    /// Labels are not guaranteed unique; the first match wins.
    pub fn find_by_label(&self, label: &str) -> Option<&DocumentObject> {
        self.objects.values().find(|obj| obj.label == label)
    }

    /// Adds an object to the document and returns its assigned name.
    ///
    /// If the requested name is taken, a numeric suffix is appended to its
    /// stem until the name is free (`"Wire"`, `"Wire001"`, `"Wire002"`,
    /// ...).
    pub fn add(&mut self, mut object: DocumentObject) -> Id {
        if self.objects.contains_key(&object.name) {
            let requested = object.name.to_string();
            let stem = real_name(&requested).to_string();
            let mut n = 1;
            let assigned = loop {
                let candidate = Id::new(&format!("{stem}{n:03}"));
                if !self.objects.contains_key(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            debug!(requested, assigned:% = assigned; "Renamed object to keep names unique");
            object.name = assigned;
        }
        let name = object.name;
        self.objects.insert(name, object);
        name
    }

    /// Removes an object from the document, returning it if it existed.
    ///
    /// References other objects hold to the removed name are left in
    /// place; they dangle until their owners are updated, exactly as a
    /// concurrent deletion would leave them.
    pub fn remove(&mut self, id: Id) -> Option<DocumentObject> {
        let removed = self.objects.shift_remove(&id);
        if removed.is_some() {
            debug!(object:% = id; "Removed object from document");
        }
        removed
    }

    /// Returns the names of all objects referencing `id` through their
    /// member list, base links, cloned-of back-reference, or base
    /// reference, in insertion order.
    pub fn in_list(&self, id: Id) -> Vec<Id> {
        self.objects
            .values()
            .filter(|obj| {
                obj.members.contains(&id)
                    || obj.links.contains(&id)
                    || obj.clone_of == Some(id)
                    || obj.base == Some(id)
            })
            .map(|obj| obj.name)
            .collect()
    }

    /// Resolves a sub-object path to the addressed object.
    ///
    /// The empty path (and a path consisting only of a geometric element
    /// reference) addresses `root` itself.
    pub fn resolve_sub_object(&self, root: Id, path: &str) -> Result<Id, PathError> {
        let chain = self.object_chain(root, path)?;
        Ok(*chain.last().expect("chain always contains the root"))
    }

    /// Returns the composed placement of the addressed sub-object: the
    /// root's placement followed by every container down to and including
    /// the addressed object.
    pub fn sub_object_placement(&self, root: Id, path: &str) -> Result<Placement, PathError> {
        let chain = self.object_chain(root, path)?;
        Ok(self.compose_chain(&chain))
    }

    /// Returns the composed placement of everything between the document
    /// root and the immediate parent of the addressed sub-object: as
    /// [`Document::sub_object_placement`], but excluding the addressed
    /// object's own placement.
    pub fn parent_chain_placement(&self, root: Id, path: &str) -> Result<Placement, PathError> {
        let chain = self.object_chain(root, path)?;
        Ok(self.compose_chain(&chain[..chain.len() - 1]))
    }

    fn compose_chain(&self, chain: &[Id]) -> Placement {
        chain.iter().fold(Placement::identity(), |acc, id| {
            let placement = self
                .object(*id)
                .map(|obj| obj.placement_or_identity())
                .unwrap_or_default();
            acc.compose(&placement)
        })
    }

    /// Walks a path from `root`, returning the chain of objects it passes
    /// through (starting with `root` itself).
    fn object_chain(&self, root: Id, path: &str) -> Result<Vec<Id>, PathError> {
        if !self.contains(root) {
            return Err(PathError::StaleObject(root));
        }

        let mut chain = vec![root];
        let mut cur = root;
        let mut segments = path.split('.').filter(|seg| !seg.is_empty()).peekable();

        while let Some(segment) = segments.next() {
            let member = Id::new(segment);
            let parent = self.object(cur).ok_or(PathError::StaleObject(cur))?;
            if parent.members.contains(&member) && self.contains(member) {
                chain.push(member);
                cur = member;
            } else if is_element_reference(segment) && segments.peek().is_none() {
                // Geometric element references narrow the addressed object
                // without descending further; they carry no placement.
                break;
            } else {
                return Err(PathError::Unresolved {
                    parent: cur,
                    segment: segment.to_string(),
                });
            }
        }

        Ok(chain)
    }
}

/// Checks whether a path segment is a geometric element reference:
/// `Vertex`, `Edge`, or `Face` followed by a decimal index.
fn is_element_reference(segment: &str) -> bool {
    ["Vertex", "Edge", "Face"].iter().any(|prefix| {
        segment
            .strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    })
}
