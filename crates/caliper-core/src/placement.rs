//! Rigid-transform primitives for document objects and sub-elements.
//!
//! This module provides the geometric types used when composing coordinate
//! frames along a selection path.
//!
//! # Overview
//!
//! - [`Vector3`] - A 3D vector / translation in document space
//! - [`Rotation`] - A unit quaternion rotation
//! - [`Placement`] - A rigid transform (translation + rotation) with
//!   right-multiplicative composition
//!
//! # Composition Convention
//!
//! `a.compose(&b)` applies `b` inside the coordinate frame established by
//! `a`: first rotate/translate by `a`, then by `b` relative to `a`. A chain
//! of nested containers composes left to right from the document root, so
//! the placement of a deeply nested sub-element is
//! `root.compose(&child).compose(&grandchild)`. Composition is append-only:
//! callers compose each frame exactly once along a path.

/// A 3D vector representing a position or translation in document space.
///
/// Vectors use `f64` coordinates and provide the small set of operations
/// placement composition needs.
///
/// # Examples
///
/// ```
/// # use caliper_core::placement::Vector3;
/// let v1 = Vector3::new(1.0, 2.0, 3.0);
/// let v2 = Vector3::new(0.5, 0.5, 0.5);
///
/// let sum = v1.add(v2);
/// assert_eq!(sum.x(), 1.5);
/// assert_eq!(sum.y(), 2.5);
/// assert_eq!(sum.z(), 3.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// Creates a new vector with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the zero vector
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the x-coordinate of the vector
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the vector
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the vector
    pub fn z(self) -> f64 {
        self.z
    }

    /// Checks if all three coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Adds another vector to this vector, returning a new vector
    pub fn add(self, other: Vector3) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Subtracts another vector from this vector, returning a new vector
    pub fn sub(self, other: Vector3) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Multiplies all coordinates by the given factor
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Calculates the dot product with another vector
    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Calculates the cross product with another vector
    pub fn cross(self, other: Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Calculates the Euclidean length of the vector
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Returns the vector scaled to unit length, or `None` for the zero vector
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len == 0.0 {
            None
        } else {
            Some(self.scale(1.0 / len))
        }
    }
}

/// A rotation in 3D space, stored as a unit quaternion.
///
/// Rotations compose with [`Rotation::multiply`]; `a.multiply(b)` rotates
/// first by `b`, then by `a`, matching the usual quaternion product.
///
/// # Examples
///
/// ```
/// # use caliper_core::placement::{Rotation, Vector3};
/// let quarter = Rotation::from_axis_angle(Vector3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
/// let rotated = quarter.rotate(Vector3::new(1.0, 0.0, 0.0));
///
/// assert!((rotated.x() - 0.0).abs() < 1e-12);
/// assert!((rotated.y() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    w: f64,
    x: f64,
    y: f64,
    z: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    /// Returns the identity rotation
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a rotation of `angle` radians around `axis`.
    ///
    /// The axis does not need to be normalized. A zero axis yields the
    /// identity rotation, since no rotation plane is defined.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let Some(axis) = axis.normalized() else {
            return Self::identity();
        };
        let half = angle / 2.0;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: axis.x() * s,
            y: axis.y() * s,
            z: axis.z() * s,
        }
    }

    /// Checks whether this rotation is (approximately) the identity
    pub fn is_identity(self) -> bool {
        // w may be -1 for the same orientation; compare the rotation effect,
        // not the raw components.
        self.w.abs() >= 1.0 - 1e-12
    }

    /// Composes two rotations: the result rotates by `other` first, then `self`
    pub fn multiply(self, other: Rotation) -> Self {
        Self {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Returns the inverse rotation
    pub fn inverse(self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Applies the rotation to a vector
    pub fn rotate(self, v: Vector3) -> Vector3 {
        // v' = v + 2 * q_v x (q_v x v + w * v), the standard
        // quaternion-vector sandwich without building a matrix.
        let q_v = Vector3::new(self.x, self.y, self.z);
        let t = q_v.cross(v).scale(2.0);
        v.add(t.scale(self.w)).add(q_v.cross(t))
    }
}

/// A rigid transform associating a coordinate frame with an object or
/// sub-element: a rotation followed by a translation.
///
/// The identity placement is the default; selection processing uses it for
/// top-level objects, which are transformed in their own frame.
///
/// # Examples
///
/// ```
/// # use caliper_core::placement::{Placement, Rotation, Vector3};
/// let outer = Placement::from_translation(Vector3::new(10.0, 0.0, 0.0));
/// let inner = Placement::from_translation(Vector3::new(0.0, 5.0, 0.0));
///
/// let composed = outer.compose(&inner);
/// assert_eq!(composed.translation(), Vector3::new(10.0, 5.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    translation: Vector3,
    rotation: Rotation,
}

impl Placement {
    /// Creates a new placement from a translation and a rotation
    pub fn new(translation: Vector3, rotation: Rotation) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Returns the identity placement
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a placement that only translates
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            translation,
            rotation: Rotation::identity(),
        }
    }

    /// Creates a placement that only rotates
    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            translation: Vector3::zero(),
            rotation,
        }
    }

    /// Returns the translation component
    pub fn translation(self) -> Vector3 {
        self.translation
    }

    /// Returns the rotation component
    pub fn rotation(self) -> Rotation {
        self.rotation
    }

    /// Checks whether this placement is (approximately) the identity
    pub fn is_identity(self) -> bool {
        self.translation.is_zero() && self.rotation.is_identity()
    }

    /// Composes this placement with another, applying `other` inside this
    /// placement's coordinate frame (right-multiplication).
    pub fn compose(&self, other: &Placement) -> Self {
        Self {
            translation: self.translation.add(self.rotation.rotate(other.translation)),
            rotation: self.rotation.multiply(other.rotation),
        }
    }

    /// Returns the inverse placement, such that
    /// `p.compose(&p.inverse())` is the identity.
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            translation: inv_rotation.rotate(self.translation).scale(-1.0),
            rotation: inv_rotation,
        }
    }

    /// Transforms a point from this placement's local frame into the parent
    /// frame.
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.rotate(point).add(self.translation)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn vector_strategy() -> impl Strategy<Value = Vector3> {
        (
            -100.0f64..100.0,
            -100.0f64..100.0,
            -100.0f64..100.0,
        )
            .prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    fn axis_strategy() -> impl Strategy<Value = Vector3> {
        // Keep axes away from zero so the rotation plane is well defined.
        (
            0.1f64..1.0,
            -1.0f64..1.0,
            -1.0f64..1.0,
        )
            .prop_map(|(x, y, z)| Vector3::new(x, y, z))
    }

    fn rotation_strategy() -> impl Strategy<Value = Rotation> {
        (axis_strategy(), -3.0f64..3.0).prop_map(|(axis, angle)| Rotation::from_axis_angle(axis, angle))
    }

    fn placement_strategy() -> impl Strategy<Value = Placement> {
        (vector_strategy(), rotation_strategy())
            .prop_map(|(translation, rotation)| Placement::new(translation, rotation))
    }

    // ===================
    // Property Test Functions
    // ===================

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        approx_eq!(f64, a.x(), b.x(), epsilon = 1e-6)
            && approx_eq!(f64, a.y(), b.y(), epsilon = 1e-6)
            && approx_eq!(f64, a.z(), b.z(), epsilon = 1e-6)
    }

    /// Rotation preserves vector length.
    fn check_rotation_preserves_length(r: Rotation, v: Vector3) -> Result<(), TestCaseError> {
        prop_assert!(approx_eq!(
            f64,
            r.rotate(v).length(),
            v.length(),
            epsilon = 1e-6
        ));
        Ok(())
    }

    /// Rotating and then applying the inverse rotation returns the original.
    fn check_rotation_inverse_roundtrip(r: Rotation, v: Vector3) -> Result<(), TestCaseError> {
        prop_assert!(vec_approx_eq(r.inverse().rotate(r.rotate(v)), v));
        Ok(())
    }

    /// Placement composition is associative: (a∘b)∘c == a∘(b∘c).
    fn check_compose_is_associative(
        a: Placement,
        b: Placement,
        c: Placement,
    ) -> Result<(), TestCaseError> {
        let left = a.compose(&b).compose(&c);
        let right = a.compose(&b.compose(&c));

        prop_assert!(vec_approx_eq(left.translation(), right.translation()));
        // Compare the rotation by its effect on a probe vector; the raw
        // quaternions may differ by sign.
        let probe = Vector3::new(1.0, 2.0, 3.0);
        prop_assert!(vec_approx_eq(
            left.rotation().rotate(probe),
            right.rotation().rotate(probe)
        ));
        Ok(())
    }

    /// The identity placement is neutral on both sides.
    fn check_identity_is_neutral(p: Placement) -> Result<(), TestCaseError> {
        let id = Placement::identity();
        let right = p.compose(&id);
        let left = id.compose(&p);

        prop_assert!(vec_approx_eq(right.translation(), p.translation()));
        prop_assert!(vec_approx_eq(left.translation(), p.translation()));
        Ok(())
    }

    /// Composing a placement with its inverse yields the identity.
    fn check_inverse_cancels(p: Placement) -> Result<(), TestCaseError> {
        let roundtrip = p.compose(&p.inverse());
        prop_assert!(vec_approx_eq(roundtrip.translation(), Vector3::zero()));

        let probe = Vector3::new(1.0, -2.0, 0.5);
        prop_assert!(vec_approx_eq(roundtrip.rotation().rotate(probe), probe));
        Ok(())
    }

    /// Composition matches point transformation:
    /// (a∘b).transform_point(v) == a.transform_point(b.transform_point(v)).
    fn check_compose_matches_point_transform(
        a: Placement,
        b: Placement,
        v: Vector3,
    ) -> Result<(), TestCaseError> {
        prop_assert!(vec_approx_eq(
            a.compose(&b).transform_point(v),
            a.transform_point(b.transform_point(v))
        ));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn rotation_preserves_length(r in rotation_strategy(), v in vector_strategy()) {
            check_rotation_preserves_length(r, v)?;
        }

        #[test]
        fn rotation_inverse_roundtrip(r in rotation_strategy(), v in vector_strategy()) {
            check_rotation_inverse_roundtrip(r, v)?;
        }

        #[test]
        fn compose_is_associative(a in placement_strategy(), b in placement_strategy(), c in placement_strategy()) {
            check_compose_is_associative(a, b, c)?;
        }

        #[test]
        fn identity_is_neutral(p in placement_strategy()) {
            check_identity_is_neutral(p)?;
        }

        #[test]
        fn inverse_cancels(p in placement_strategy()) {
            check_inverse_cancels(p)?;
        }

        #[test]
        fn compose_matches_point_transform(a in placement_strategy(), b in placement_strategy(), v in vector_strategy()) {
            check_compose_matches_point_transform(a, b, v)?;
        }
    }
}
