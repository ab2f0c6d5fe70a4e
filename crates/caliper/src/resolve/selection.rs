//! Selection processing.
//!
//! The orchestrator of the engine: consumes a raw selection list (objects
//! plus optional sub-element paths) and produces the concrete, filtered
//! set of entities an editing command operates on.
//!
//! Two operating modes are provided:
//!
//! - **Whole-object mode** ([`SelectionResolver::process_selection`]):
//!   each addressed sub-object is expanded through the group expander,
//!   optionally extended with movable children, and run through the
//!   modifiability filter. The result pairs each object with the composed
//!   placement of its selection context.
//! - **Sub-element mode** ([`SelectionResolver::process_sub_selection`]):
//!   restricted to vertex/edge sub-elements, for commands that transform
//!   individual points and edges rather than whole objects.
//!
//! Both modes degrade gracefully: stale entries and malformed paths are
//! skipped with a diagnostic, never failing the batch. The one exception
//! is a traversal that exceeds the engine's depth bound, which surfaces
//! as a single [`ResolveError::DepthExceeded`] for the whole call.

use log::debug;

use caliper_core::{
    document::{Document, PathError},
    identifier::Id,
    placement::Placement,
};

use crate::{
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticCollector},
    error::ResolveError,
    resolve::{
        children::movable_children,
        filter::filter_for_modification,
        group::{GroupExpansion, expand_group},
    },
};

/// The kind of geometric element a sub-element path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubElementKind {
    /// A single point of the shape.
    Vertex,
    /// A single edge of the shape.
    Edge,
}

/// A parsed sub-element path.
///
/// The textual form encodes a 1-based element index
/// (`"Edge3"` is the third edge); parsed indices are 0-based.
///
/// ```
/// # use caliper::resolve::selection::{SubElementKind, SubElementPath};
/// let path = SubElementPath::parse("Level.Frame.Edge3").unwrap();
/// assert_eq!(path.kind(), Some(SubElementKind::Edge));
/// assert_eq!(path.edge_index(), 2);
/// assert_eq!(path.vertex_index(), -1);
/// assert_eq!(path.parent_prefix(), "Level.Frame");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubElementPath {
    kind: Option<SubElementKind>,
    index: Option<usize>,
    parent_prefix: String,
}

impl SubElementPath {
    /// Parses a textual sub-element path.
    ///
    /// Paths without a vertex/edge marker parse with
    /// [`SubElementPath::kind`] `None` (they address a whole object).
    /// Returns `None` for a malformed path: one that carries a marker but
    /// no usable 1-based index after it.
    pub fn parse(sub: &str) -> Option<Self> {
        if let Some(pos) = sub.rfind("Vertex") {
            let index = parse_element_index(&sub[pos + "Vertex".len()..])?;
            return Some(Self {
                kind: Some(SubElementKind::Vertex),
                index: Some(index),
                parent_prefix: prefix_before(sub, pos),
            });
        }
        if let Some(pos) = sub.rfind("Edge") {
            let index = parse_element_index(&sub[pos + "Edge".len()..])?;
            return Some(Self {
                kind: Some(SubElementKind::Edge),
                index: Some(index),
                parent_prefix: prefix_before(sub, pos),
            });
        }
        Some(Self {
            kind: None,
            index: None,
            parent_prefix: sub.trim_end_matches('.').to_string(),
        })
    }

    /// Returns the addressed element kind, or `None` for a whole-object
    /// path.
    pub fn kind(&self) -> Option<SubElementKind> {
        self.kind
    }

    /// Returns the 0-based element index, if an element is addressed.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns the 0-based vertex index, or `-1` if no vertex is
    /// addressed.
    pub fn vertex_index(&self) -> i32 {
        match (self.kind, self.index) {
            (Some(SubElementKind::Vertex), Some(index)) => index as i32,
            _ => -1,
        }
    }

    /// Returns the 0-based edge index, or `-1` if no edge is addressed.
    pub fn edge_index(&self) -> i32 {
        match (self.kind, self.index) {
            (Some(SubElementKind::Edge), Some(index)) => index as i32,
            _ => -1,
        }
    }

    /// Returns the `.`-separated parent prefix preceding the element
    /// reference, without a trailing dot.
    pub fn parent_prefix(&self) -> &str {
        &self.parent_prefix
    }
}

/// Parses the 1-based index trailing an element marker into 0-based form.
fn parse_element_index(suffix: &str) -> Option<usize> {
    suffix.parse::<usize>().ok().filter(|n| *n >= 1).map(|n| n - 1)
}

fn prefix_before(sub: &str, pos: usize) -> String {
    sub[..pos].trim_end_matches('.').to_string()
}

/// One raw unit of selection input: an object plus the sub-element paths
/// selected under it (possibly none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    object: Id,
    sub_elements: Vec<String>,
}

impl SelectionEntry {
    /// Creates an entry selecting a whole object.
    pub fn new(object: Id) -> Self {
        Self {
            object,
            sub_elements: Vec::new(),
        }
    }

    /// Adds a sub-element path to the entry.
    pub fn with_sub_element(mut self, sub: impl Into<String>) -> Self {
        self.sub_elements.push(sub.into());
        self
    }

    /// Returns the selected object.
    pub fn object(&self) -> Id {
        self.object
    }

    /// Returns the selected sub-element paths.
    pub fn sub_elements(&self) -> &[String] {
        &self.sub_elements
    }

    /// The paths to iterate during processing: the stored sub-elements,
    /// or a single implicit empty path when none exist.
    fn sub_paths(&self) -> Vec<&str> {
        if self.sub_elements.is_empty() {
            vec![""]
        } else {
            self.sub_elements.iter().map(String::as_str).collect()
        }
    }
}

/// The three per-call switches of the selection processor.
///
/// No other configuration state belongs to the engine; everything is
/// passed explicitly per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierOptions {
    /// The command duplicates the selection instead of modifying it in
    /// place.
    pub copying: bool,

    /// The command scales; non-scalable objects are filtered out.
    pub scaling: bool,

    /// Extend the resolution with each object's movable children. Only
    /// honored when `copying` is false: a copy must not relocate the
    /// original's dependents.
    pub include_movable_children: bool,
}

/// Where a resolved result traces back to: the originating selection
/// entry and sub-element. Carried for diagnostics and undo labeling,
/// never consulted by resolution logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    group_path: String,
    origin: Id,
    sub_element: String,
}

impl Provenance {
    fn new(origin: Id, sub_element: impl Into<String>) -> Self {
        Self {
            group_path: String::new(),
            origin,
            sub_element: sub_element.into(),
        }
    }

    /// Returns the group path prefix (currently always empty).
    pub fn group_path(&self) -> &str {
        &self.group_path
    }

    /// Returns the name of the originally selected object.
    pub fn origin(&self) -> Id {
        self.origin
    }

    /// Returns the originating sub-element, normalized for whole-object
    /// mode: a trailing-dot prefix marks "inside this container", the
    /// empty string a bare element reference.
    pub fn sub_element(&self) -> &str {
        &self.sub_element
    }
}

/// The output of whole-object processing: three parallel sequences plus
/// the diagnostics the pass produced.
///
/// `objects` and `placements` are zipped 1:1 by callers applying their
/// transform; `provenance` holds one record per original selection
/// entry/sub-element, not per expanded result.
#[derive(Debug, Default)]
pub struct Resolution {
    objects: Vec<Id>,
    placements: Vec<Placement>,
    provenance: Vec<Provenance>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Returns the resolved objects.
    pub fn objects(&self) -> &[Id] {
        &self.objects
    }

    /// Returns the composed placements, parallel to
    /// [`Resolution::objects`].
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns the provenance records, one per original selection
    /// entry/sub-element.
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Returns the diagnostics produced during the pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the number of resolved objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Checks whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over `(object, placement)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Id, Placement)> + '_ {
        self.objects
            .iter()
            .copied()
            .zip(self.placements.iter().copied())
    }
}

/// One resolved vertex/edge target in sub-element mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SubElementTarget {
    object: Id,
    vertex_index: i32,
    edge_index: i32,
    placement: Placement,
}

impl SubElementTarget {
    /// Returns the object owning the addressed element.
    pub fn object(&self) -> Id {
        self.object
    }

    /// Returns the 0-based vertex index, or `-1` for an edge target.
    pub fn vertex_index(&self) -> i32 {
        self.vertex_index
    }

    /// Returns the 0-based edge index, or `-1` for a vertex target.
    pub fn edge_index(&self) -> i32 {
        self.edge_index
    }

    /// Returns the composed placement of the owning object.
    pub fn placement(&self) -> Placement {
        self.placement
    }
}

/// The output of sub-element processing.
#[derive(Debug, Default)]
pub struct SubResolution {
    targets: Vec<SubElementTarget>,
    provenance: Vec<Provenance>,
    diagnostics: Vec<Diagnostic>,
}

impl SubResolution {
    /// Returns the resolved vertex/edge targets.
    pub fn targets(&self) -> &[SubElementTarget] {
        &self.targets
    }

    /// Returns the provenance records, parallel to
    /// [`SubResolution::targets`].
    pub fn provenance(&self) -> &[Provenance] {
        &self.provenance
    }

    /// Returns the diagnostics produced during the pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Checks whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The selection processor.
///
/// Borrows the document for the duration of one call; nothing is cached
/// across calls, so a resolver may be rebuilt for every command
/// invocation.
///
/// # Examples
///
/// ```
/// use caliper::resolve::selection::{ModifierOptions, SelectionEntry, SelectionResolver};
/// use caliper_core::document::{Document, DocumentObject};
///
/// let mut doc = Document::new();
/// let wire = doc.add(DocumentObject::new("Wire", "Wire").with_shape());
///
/// let resolver = SelectionResolver::new(&doc);
/// let resolution = resolver
///     .process_selection(&[SelectionEntry::new(wire)], ModifierOptions::default())
///     .expect("depth bound not reached");
///
/// assert_eq!(resolution.objects(), &[wire]);
/// ```
#[derive(Debug)]
pub struct SelectionResolver<'doc> {
    doc: &'doc Document,
}

impl<'doc> SelectionResolver<'doc> {
    /// Creates a resolver over the given document.
    pub fn new(doc: &'doc Document) -> Self {
        Self { doc }
    }

    /// Resolves a selection into whole objects ready for modification.
    ///
    /// For each entry and each of its sub-element paths (or the implicit
    /// empty path), the addressed sub-object is resolved and expanded:
    /// group contents, optionally movable children, then the
    /// modifiability filter. Every kept object is paired with the
    /// composed placement of the selection context — the identity for a
    /// top-level object, otherwise the chain from the root down to the
    /// addressed object's parent.
    ///
    /// # Errors
    ///
    /// Only [`ResolveError::DepthExceeded`] fails the batch; every other
    /// condition is reported in [`Resolution::diagnostics`] and skips the
    /// affected entry, sub-element, or branch.
    pub fn process_selection(
        &self,
        entries: &[SelectionEntry],
        options: ModifierOptions,
    ) -> Result<Resolution, ResolveError> {
        debug!(
            entries = entries.len(),
            copying = options.copying,
            scaling = options.scaling;
            "Processing selection"
        );

        let mut collector = DiagnosticCollector::new();
        let mut resolution = Resolution::default();
        let include_children = options.include_movable_children && !options.copying;

        for entry in entries {
            if self.skip_if_stale(entry.object(), &mut collector) {
                continue;
            }
            for sub in entry.sub_paths() {
                let Some(addressed) = self.resolve_addressed(entry.object(), sub, &mut collector)
                else {
                    continue;
                };
                let placement = if addressed == entry.object() {
                    Placement::identity()
                } else {
                    match self.doc.parent_chain_placement(entry.object(), sub) {
                        Ok(placement) => placement,
                        Err(err) => {
                            emit_path_error(&mut collector, &err);
                            continue;
                        }
                    }
                };

                let mut candidates =
                    match expand_group(self.doc, addressed, GroupExpansion::for_modifiers()) {
                        Ok(candidates) => candidates,
                        Err(err) => {
                            report_branch(err, &mut collector)?;
                            continue;
                        }
                    };

                if include_children {
                    let mut dependents = Vec::new();
                    for &candidate in &candidates {
                        match movable_children(self.doc, candidate) {
                            Ok(found) => dependents.extend(found),
                            Err(err) => report_branch(err, &mut collector)?,
                        }
                    }
                    candidates.extend(dependents);
                }

                let kept = filter_for_modification(
                    self.doc,
                    &candidates,
                    options.copying,
                    options.scaling,
                    &mut collector,
                );
                resolution
                    .placements
                    .extend(std::iter::repeat_n(placement, kept.len()));
                resolution.objects.extend(kept);
                resolution
                    .provenance
                    .push(Provenance::new(entry.object(), whole_object_sub(sub)));
            }
        }

        debug!(resolved = resolution.len(); "Selection processed");
        resolution.diagnostics = collector.into_diagnostics();
        Ok(resolution)
    }

    /// Resolves a selection into individual vertex/edge targets.
    ///
    /// Only vertex and edge sub-element paths participate; every other
    /// path is skipped. When `copying` is true, vertex targets are
    /// skipped as well — a copy must not carry a single-point anchor
    /// forward ambiguously.
    pub fn process_sub_selection(&self, entries: &[SelectionEntry], copying: bool) -> SubResolution {
        debug!(entries = entries.len(), copying; "Processing sub-element selection");

        let mut collector = DiagnosticCollector::new();
        let mut resolution = SubResolution::default();

        for entry in entries {
            if self.skip_if_stale(entry.object(), &mut collector) {
                continue;
            }
            for sub in entry.sub_paths() {
                if !(sub.contains("Vertex") || sub.contains("Edge")) {
                    continue;
                }
                if copying && sub.contains("Vertex") {
                    continue;
                }
                let Some(parsed) = SubElementPath::parse(sub) else {
                    collector.emit(
                        Diagnostic::warning(format!(
                            "sub-element path `{sub}` is malformed; skipping"
                        ))
                        .with_code(DiagnosticCode::MalformedSubElement)
                        .with_object(entry.object()),
                    );
                    continue;
                };
                let Some(addressed) = self.resolve_addressed(entry.object(), sub, &mut collector)
                else {
                    continue;
                };
                let placement = match self.doc.sub_object_placement(entry.object(), sub) {
                    Ok(placement) => placement,
                    Err(err) => {
                        emit_path_error(&mut collector, &err);
                        continue;
                    }
                };

                resolution.targets.push(SubElementTarget {
                    object: addressed,
                    vertex_index: parsed.vertex_index(),
                    edge_index: parsed.edge_index(),
                    placement,
                });
                resolution.provenance.push(Provenance::new(entry.object(), sub));
            }
        }

        debug!(resolved = resolution.targets.len(); "Sub-element selection processed");
        resolution.diagnostics = collector.into_diagnostics();
        resolution
    }

    /// Emits a stale-reference warning and answers `true` if the object
    /// has been deleted since the selection was captured.
    fn skip_if_stale(&self, object: Id, collector: &mut DiagnosticCollector) -> bool {
        if self.doc.is_deleted(object) {
            collector.emit(
                Diagnostic::warning(format!(
                    "{object} has been removed from the document; skipping"
                ))
                .with_code(DiagnosticCode::StaleReference)
                .with_object(object),
            );
            return true;
        }
        false
    }

    fn resolve_addressed(
        &self,
        root: Id,
        sub: &str,
        collector: &mut DiagnosticCollector,
    ) -> Option<Id> {
        match self.doc.resolve_sub_object(root, sub) {
            Ok(addressed) => Some(addressed),
            Err(err) => {
                emit_path_error(collector, &err);
                None
            }
        }
    }
}

/// Converts a branch-local cycle into a diagnostic; anything else fails
/// the batch.
fn report_branch(err: ResolveError, collector: &mut DiagnosticCollector) -> Result<(), ResolveError> {
    match err {
        ResolveError::StructuralCycle { object } => {
            collector.emit(
                Diagnostic::error(err.to_string())
                    .with_code(DiagnosticCode::StructuralCycle)
                    .with_object(object),
            );
            Ok(())
        }
        depth @ ResolveError::DepthExceeded { .. } => Err(depth),
    }
}

fn emit_path_error(collector: &mut DiagnosticCollector, err: &PathError) {
    let diagnostic = match err {
        PathError::StaleObject(object) => Diagnostic::warning(format!(
            "{object} has been removed from the document; skipping"
        ))
        .with_code(DiagnosticCode::StaleReference)
        .with_object(*object),
        PathError::Unresolved { parent, .. } => Diagnostic::warning(err.to_string())
            .with_code(DiagnosticCode::MalformedSubElement)
            .with_object(*parent),
    };
    collector.emit(diagnostic);
}

/// Normalizes a sub-element path for whole-object provenance: a compound
/// path keeps its container prefix with a trailing dot, a bare element
/// reference collapses to the empty string, anything else passes through.
fn whole_object_sub(sub: &str) -> String {
    if let Some(pos) = sub.rfind('.') {
        sub[..=pos].to_string()
    } else if ["Face", "Edge", "Vertex"].iter().any(|marker| sub.contains(marker)) {
        String::new()
    } else {
        sub.to_string()
    }
}
