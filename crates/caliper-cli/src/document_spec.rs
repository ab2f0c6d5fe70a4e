//! Document descriptions loaded from TOML.
//!
//! The CLI has no live application to take a document from, so it loads
//! one from a declarative TOML description: a list of `[[object]]` tables
//! naming each object's kind, capabilities, and references.
//!
//! # Example
//!
//! ```toml
//! [[object]]
//! name = "Base"
//! type = "Wire"
//! has_shape = true
//! placement = { translation = [1.0, 0.0, 0.0] }
//!
//! [[object]]
//! name = "G"
//! type = "Group"
//! members = ["Base"]
//! ```

use serde::Deserialize;

use caliper_core::{
    classification::Classification,
    document::{Document, DocumentObject, StaticChildren},
    identifier::Id,
    placement::{Placement, Rotation, Vector3},
};

use crate::error::CliError;

/// A whole document description.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentSpec {
    /// The objects of the document, in insertion order.
    #[serde(default, rename = "object")]
    objects: Vec<ObjectSpec>,
}

/// One object description.
#[derive(Debug, Deserialize)]
pub struct ObjectSpec {
    /// Unique object name.
    name: String,

    /// Generic type identifier; classification is derived from it unless
    /// `class` is given.
    #[serde(default, rename = "type")]
    type_id: String,

    /// User-visible label (defaults to the name).
    #[serde(default)]
    label: Option<String>,

    /// Declared classification tag, overriding the type identifier.
    #[serde(default)]
    class: Option<Classification>,

    /// Placement of the object, if it exposes one.
    #[serde(default)]
    placement: Option<PlacementSpec>,

    /// Mark the placement as read-only.
    #[serde(default)]
    placement_read_only: bool,

    /// The object carries topological shape data.
    #[serde(default)]
    has_shape: bool,

    /// Ordered member list; presence (even empty) makes the object a
    /// container.
    #[serde(default)]
    members: Option<Vec<String>>,

    /// Clone-container base reference list.
    #[serde(default)]
    links: Vec<String>,

    /// Single-hop cloned-of back-reference.
    #[serde(default)]
    clone_of: Option<String>,

    /// Redirect modifications to this base object.
    #[serde(default)]
    base: Option<String>,

    /// Whether the redirect is active.
    #[serde(default)]
    move_base: bool,

    /// Static movable-children list; presence opts the object into the
    /// capability.
    #[serde(default)]
    movable_children: Option<Vec<String>>,
}

/// A placement description: a translation plus an optional axis-angle
/// rotation, with the angle in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementSpec {
    #[serde(default)]
    translation: [f64; 3],

    #[serde(default)]
    rotation: Option<RotationSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotationSpec {
    axis: [f64; 3],
    angle_deg: f64,
}

impl PlacementSpec {
    fn to_placement(&self) -> Placement {
        let [x, y, z] = self.translation;
        let rotation = match &self.rotation {
            Some(spec) => {
                let [ax, ay, az] = spec.axis;
                Rotation::from_axis_angle(Vector3::new(ax, ay, az), spec.angle_deg.to_radians())
            }
            None => Rotation::identity(),
        };
        Placement::new(Vector3::new(x, y, z), rotation)
    }
}

impl DocumentSpec {
    /// Parses a document description from TOML source.
    pub fn parse(source: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(source)?)
    }

    /// Builds the document the description declares.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Spec`] for duplicate object names or a
    /// `move_base` flag without a base reference.
    pub fn into_document(self) -> Result<Document, CliError> {
        let mut doc = Document::new();
        for spec in self.objects {
            let name = spec.name.clone();
            if doc.contains(Id::new(&name)) {
                return Err(CliError::Spec(format!("duplicate object name `{name}`")));
            }
            doc.add(spec.into_object()?);
        }
        Ok(doc)
    }
}

impl ObjectSpec {
    fn into_object(self) -> Result<DocumentObject, CliError> {
        let mut object = DocumentObject::new(&self.name, &self.type_id);
        if let Some(label) = self.label {
            object = object.with_label(&label);
        }
        if let Some(class) = self.class {
            object = object.with_class(class);
        }
        if let Some(placement) = &self.placement {
            object = object.with_placement(placement.to_placement());
        }
        if self.placement_read_only {
            object = object.with_read_only_placement();
        }
        if self.has_shape {
            object = object.with_shape();
        }
        if let Some(members) = self.members {
            object = object.with_members(members.iter().map(|name| Id::new(name)).collect());
        }
        if !self.links.is_empty() {
            object = object.with_links(self.links.iter().map(|name| Id::new(name)).collect());
        }
        if let Some(target) = self.clone_of {
            object = object.with_clone_of(Id::new(&target));
        }
        if self.move_base {
            let base = self.base.as_deref().ok_or_else(|| {
                CliError::Spec(format!("`{}` sets move_base without a base", self.name))
            })?;
            object = object.with_move_base(Id::new(base));
        }
        if let Some(children) = self.movable_children {
            let children = children.iter().map(|name| Id::new(name)).collect();
            object = object.with_movable(Box::new(StaticChildren::new(children)));
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use caliper_core::placement::Placement;

    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "Base"
            type = "Wire"
            has_shape = true
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();

        assert_eq!(doc.len(), 1);
        let base = doc.object(Id::new("Base")).unwrap();
        assert!(base.has_shape());
        assert_eq!(base.classification(), Classification::Wire);
        assert!(base.placement().is_none());
    }

    #[test]
    fn test_parse_group_and_references() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "X"
            type = "Wire"
            has_shape = true

            [[object]]
            name = "Y"
            type = "Wire"
            has_shape = true

            [[object]]
            name = "G"
            type = "Group"
            members = ["X", "Y"]

            [[object]]
            name = "C"
            class = "Clone"
            links = ["X"]
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();

        let group = doc.object(Id::new("G")).unwrap();
        assert!(group.is_group());
        assert_eq!(group.members(), &[Id::new("X"), Id::new("Y")]);

        let clone = doc.object(Id::new("C")).unwrap();
        assert_eq!(clone.classification(), Classification::Clone);
        assert_eq!(clone.links(), &[Id::new("X")]);
    }

    #[test]
    fn test_parse_placement_with_rotation() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "Frame"
            type = "Wire"
            has_shape = true
            placement = { translation = [1.0, 2.0, 3.0], rotation = { axis = [0.0, 0.0, 1.0], angle_deg = 90.0 } }
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();

        let placement = doc.object(Id::new("Frame")).unwrap().placement().unwrap();
        assert_eq!(placement.translation(), Vector3::new(1.0, 2.0, 3.0));
        let rotated = placement.rotation().rotate(Vector3::new(1.0, 0.0, 0.0));
        assert!((rotated.y() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_movable_children_and_move_base() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "Window"
            type = "Wire"
            has_shape = true

            [[object]]
            name = "Wall"
            type = "Wire"
            has_shape = true
            movable_children = ["Window"]

            [[object]]
            name = "Pad"
            type = "Pad"
            has_shape = true
            move_base = true
            base = "Wall"
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();

        let wall = doc.object(Id::new("Wall")).unwrap();
        let children = wall.movable().unwrap().movable_children(&doc);
        assert_eq!(children, vec![Id::new("Window")]);

        let pad = doc.object(Id::new("Pad")).unwrap();
        assert!(pad.move_base());
        assert_eq!(pad.base(), Some(Id::new("Wall")));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "X"

            [[object]]
            name = "X"
            "#,
        )
        .unwrap();

        assert!(matches!(spec.into_document(), Err(CliError::Spec(_))));
    }

    #[test]
    fn test_move_base_without_base_rejected() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "X"
            move_base = true
            "#,
        )
        .unwrap();

        assert!(matches!(spec.into_document(), Err(CliError::Spec(_))));
    }

    #[test]
    fn test_empty_members_still_makes_a_container() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "G"
            type = "Group"
            members = []
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();
        assert!(doc.object(Id::new("G")).unwrap().is_group());
    }

    #[test]
    fn test_default_placement_spec_is_identity() {
        let spec = DocumentSpec::parse(
            r#"
            [[object]]
            name = "X"
            placement = { }
            "#,
        )
        .unwrap();
        let doc = spec.into_document().unwrap();
        assert_eq!(
            doc.object(Id::new("X")).unwrap().placement(),
            Some(Placement::identity())
        );
    }
}
