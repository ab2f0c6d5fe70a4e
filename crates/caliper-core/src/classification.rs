//! Object classification tags.
//!
//! Every document object carries a classification, either declared through
//! its extension mechanism or derived from its generic type identifier.
//! The selection engine branches on a handful of these (clones, groups,
//! wires, the scalable annotation kinds); everything else is preserved
//! as-is in the [`Classification::Other`] catch-all so that object kinds
//! the engine does not special-case still round-trip through it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a document object.
///
/// This is a closed enumeration of the kinds the selection engine treats
/// specially, plus [`Classification::Other`] for every tag it merely
/// carries and [`Classification::Unknown`] for objects that declare
/// nothing recognizable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    /// An object whose geometry is defined by referencing exactly one
    /// other object, directly or via a container of base references.
    Clone,

    /// An object whose primary role is to hold an ordered collection of
    /// member objects, with no geometry of its own.
    Group,

    /// A polyline/wire object. Wires remain independently scalable even
    /// when they alias a shared base.
    Wire,

    /// A text or dimension annotation.
    Annotation,

    /// A reference image placed in the document.
    ImagePlane,

    /// A zero-geometry placeholder used to keep spacing conventions
    /// inside expanded containers.
    Spacer,

    /// A container whose children are positioned by a solver; group
    /// expansion can be told not to descend into these.
    Assembly,

    /// A bare geometric shape that is not wrapped in a document object.
    Shape,

    /// Any other declared tag, preserved verbatim.
    Other(String),

    /// No recognizable classification.
    Unknown,
}

impl Classification {
    /// Parses a raw tag string into a classification.
    ///
    /// Unrecognized non-empty tags become [`Classification::Other`]; the
    /// empty string maps to [`Classification::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Clone" => Classification::Clone,
            "Group" => Classification::Group,
            "Wire" => Classification::Wire,
            "Annotation" => Classification::Annotation,
            "ImagePlane" => Classification::ImagePlane,
            "Spacer" => Classification::Spacer,
            "Assembly" => Classification::Assembly,
            "Shape" => Classification::Shape,
            "Unknown" => Classification::Unknown,
            "" => Classification::Unknown,
            other => Classification::Other(other.to_string()),
        }
    }

    /// Returns the tag string for this classification.
    pub fn as_tag(&self) -> &str {
        match self {
            Classification::Clone => "Clone",
            Classification::Group => "Group",
            Classification::Wire => "Wire",
            Classification::Annotation => "Annotation",
            Classification::ImagePlane => "ImagePlane",
            Classification::Spacer => "Spacer",
            Classification::Assembly => "Assembly",
            Classification::Shape => "Shape",
            Classification::Other(tag) => tag,
            Classification::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl From<String> for Classification {
    fn from(tag: String) -> Self {
        Classification::from_tag(&tag)
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.as_tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known_kinds() {
        assert_eq!(Classification::from_tag("Clone"), Classification::Clone);
        assert_eq!(Classification::from_tag("Group"), Classification::Group);
        assert_eq!(Classification::from_tag("Wire"), Classification::Wire);
        assert_eq!(
            Classification::from_tag("ImagePlane"),
            Classification::ImagePlane
        );
    }

    #[test]
    fn test_from_tag_preserves_unrecognized() {
        let tag = Classification::from_tag("BezCurve");
        assert_eq!(tag, Classification::Other("BezCurve".to_string()));
        assert_eq!(tag.as_tag(), "BezCurve");
    }

    #[test]
    fn test_from_tag_empty_is_unknown() {
        assert_eq!(Classification::from_tag(""), Classification::Unknown);
    }

    #[test]
    fn test_tag_roundtrip() {
        for tag in [
            "Clone",
            "Group",
            "Wire",
            "Annotation",
            "ImagePlane",
            "Spacer",
            "Assembly",
            "Shape",
            "Unknown",
            "Sketch",
        ] {
            assert_eq!(Classification::from_tag(tag).as_tag(), tag);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Classification::Clone.to_string(), "Clone");
        assert_eq!(
            Classification::Other("Dimension".to_string()).to_string(),
            "Dimension"
        );
    }
}
