// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared transform utilities for solid construction
//!
//! Every primitive is modelled along local +Z; these helpers orient and
//! place it in world space.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Rotation taking local +Z onto `direction`
///
/// A zero or non-finite direction yields the identity rotation. The
/// antiparallel case, where `rotation_between` has no unique answer, is a
/// half turn about X.
pub fn align_z(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    let norm = direction.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return UnitQuaternion::identity();
    }
    let dir = direction / norm;
    UnitQuaternion::rotation_between(&Vector3::z(), &dir).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
    })
}

/// Scale raw file coordinates into meters.
#[inline]
pub fn scale_point(raw: [f64; 3], scale: f64) -> Point3<f64> {
    Point3::new(raw[0] * scale, raw[1] * scale, raw[2] * scale)
}

/// Project a direction onto the horizontal plane
///
/// Purely vertical input returns +Z rather than a zero vector.
pub fn horizontal_direction(direction: &Vector3<f64>) -> Vector3<f64> {
    let flat = Vector3::new(direction.x, direction.y, 0.0);
    if flat.norm_squared() == 0.0 {
        Vector3::z()
    } else {
        flat.normalize()
    }
}

/// World placement of a primitive: local origin and local axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Placement {
    pub fn new(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    pub fn identity() -> Self {
        Self::at(Point3::origin())
    }

    /// Translation only.
    pub fn at(position: Point3<f64>) -> Self {
        Self::new(position, UnitQuaternion::identity())
    }

    /// Origin at `position`, local +Z along `direction`.
    pub fn aligned(position: Point3<f64>, direction: &Vector3<f64>) -> Self {
        Self::new(position, align_z(direction))
    }

    /// World direction of local +Z.
    #[inline]
    pub fn axis(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    #[inline]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.position + self.rotation * point.coords
    }

    #[inline]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * vector
    }

    /// Express this (local) placement inside `outer`.
    pub fn then(&self, outer: &Placement) -> Placement {
        Placement {
            position: outer.transform_point(&self.position),
            rotation: outer.rotation * self.rotation,
        }
    }

    pub fn is_finite(&self) -> bool {
        let q = self.rotation.quaternion();
        self.position.iter().all(|c| c.is_finite()) && q.coords.iter().all(|c| c.is_finite())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn align_z_maps_axis_onto_direction() {
        for dir in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -3.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(0.0, 0.0, -1.0),
        ] {
            let mapped = align_z(&dir) * Vector3::z();
            assert_relative_eq!(mapped, dir.normalize(), epsilon = 1e-12);
        }
    }

    #[test]
    fn align_z_of_zero_is_identity() {
        assert_eq!(align_z(&Vector3::zeros()), UnitQuaternion::identity());
    }

    #[test]
    fn horizontal_direction_flattens_or_falls_back() {
        assert_relative_eq!(
            horizontal_direction(&Vector3::new(3.0, 4.0, 10.0)),
            Vector3::new(0.6, 0.8, 0.0)
        );
        assert_eq!(horizontal_direction(&Vector3::new(0.0, 0.0, -5.0)), Vector3::z());
    }

    #[test]
    fn composed_placement_applies_inner_then_outer() {
        let inner = Placement::at(Point3::new(1.0, 0.0, 0.0));
        let outer = Placement::new(
            Point3::new(10.0, 0.0, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2),
        );
        let world = inner.then(&outer);
        assert_relative_eq!(world.position, Point3::new(10.0, 1.0, 0.0), epsilon = 1e-12);
    }
}
