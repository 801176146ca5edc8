// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Renderer-agnostic solid descriptions
//!
//! A [`Solid`] is a list of placed [`Primitive`]s. Surface primitives
//! are defined in a local frame whose +Z axis is the primitive's axis;
//! the [`Placement`] of each part puts that frame into world space
//! (meters). Tessellation into triangles happens later, see
//! [`crate::tessellate`].

use nalgebra::{Point3, Vector3};

pub use crate::transform::Placement;

/// Geometric building block of a solid, in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Frustum from z = 0 (bottom) to z = height (top). A zero top
    /// radius gives a cone; height may be zero.
    Cylinder {
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
    },
    /// Sphere centered on the local origin
    Sphere { radius: f64 },
    /// Flat disc in the local XY plane, facing +Z
    Disc { radius: f64 },
    /// Circular tube swept along a quadratic Bezier curve
    SweptTube {
        start: Point3<f64>,
        control: Point3<f64>,
        end: Point3<f64>,
        radius: f64,
    },
    /// Straight line segment
    Segment { from: Point3<f64>, to: Point3<f64> },
    /// Circle outline in the local XY plane
    Ring { radius: f64 },
}

impl Primitive {
    /// Whether this primitive tessellates to triangles.
    pub fn is_surface(&self) -> bool {
        !matches!(self, Primitive::Segment { .. } | Primitive::Ring { .. })
    }

    fn scalars(&self) -> impl Iterator<Item = f64> {
        let values: smallvec::SmallVec<[f64; 10]> = match *self {
            Primitive::Cylinder {
                radius_bottom,
                radius_top,
                height,
            } => smallvec::smallvec![radius_bottom, radius_top, height],
            Primitive::Sphere { radius }
            | Primitive::Disc { radius }
            | Primitive::Ring { radius } => {
                smallvec::smallvec![radius]
            }
            Primitive::SweptTube {
                start,
                control,
                end,
                radius,
            } => smallvec::smallvec![
                start.x, start.y, start.z, control.x, control.y, control.z, end.x, end.y, end.z,
                radius
            ],
            Primitive::Segment { from, to } => {
                smallvec::smallvec![from.x, from.y, from.z, to.x, to.y, to.z]
            }
        };
        values.into_iter()
    }
}

/// What a part is for; pick volumes are never rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    /// Main body of the component
    Body,
    /// End cap closing an open tube
    Cap,
    /// Schematic symbol (weld cross, support axes and arrows)
    Symbol,
    /// Invisible volume that only exists to make symbols selectable
    PickVolume,
}

/// A primitive with its world placement
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub primitive: Primitive,
    pub placement: Placement,
    pub role: PartRole,
}

impl Part {
    pub fn new(primitive: Primitive, placement: Placement, role: PartRole) -> Self {
        Self {
            primitive,
            placement,
            role,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.role != PartRole::PickVolume
    }

    pub fn is_finite(&self) -> bool {
        self.placement.is_finite() && self.primitive.scalars().all(f64::is_finite)
    }

    /// Conservative world-space bounds of this part.
    pub fn bounds(&self) -> Aabb {
        let p = &self.placement;
        let mut aabb = Aabb::empty();
        match self.primitive {
            Primitive::Cylinder {
                radius_bottom,
                radius_top,
                height,
            } => {
                let r = radius_bottom.max(radius_top);
                aabb.expand_sphere(&p.position, r);
                aabb.expand_sphere(&p.transform_point(&Point3::new(0.0, 0.0, height)), r);
            }
            Primitive::Sphere { radius }
            | Primitive::Disc { radius }
            | Primitive::Ring { radius } => {
                aabb.expand_sphere(&p.position, radius);
            }
            Primitive::SweptTube {
                start,
                control,
                end,
                radius,
            } => {
                // Control polygon hull contains the curve.
                for point in [start, control, end] {
                    aabb.expand_sphere(&p.transform_point(&point), radius);
                }
            }
            Primitive::Segment { from, to } => {
                aabb.expand_point(&p.transform_point(&from));
                aabb.expand_point(&p.transform_point(&to));
            }
        }
        aabb
    }
}

/// How the parts of a solid relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidForm {
    /// Exactly one part
    Single,
    /// Several surface parts forming one closed body
    Merged,
    /// Visually distinct parts kept separate (symbols, valve halves)
    Group,
}

/// Solid description for one component
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Builder display name ("Pipe", "Bend", ...)
    pub name: &'static str,
    pub form: SolidForm,
    pub parts: Vec<Part>,
}

impl Solid {
    pub fn single(name: &'static str, part: Part) -> Self {
        Self {
            name,
            form: SolidForm::Single,
            parts: vec![part],
        }
    }

    pub fn merged(name: &'static str, parts: Vec<Part>) -> Self {
        Self {
            name,
            form: SolidForm::Merged,
            parts,
        }
    }

    pub fn group(name: &'static str, parts: Vec<Part>) -> Self {
        Self {
            name,
            form: SolidForm::Group,
            parts,
        }
    }

    /// Parts that a renderer should draw
    pub fn visible_parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|part| part.is_visible())
    }

    pub fn is_finite(&self) -> bool {
        self.parts.iter().all(Part::is_finite)
    }

    /// World-space bounds over all parts, pick volumes included
    pub fn bounds(&self) -> Option<Aabb> {
        self.parts
            .iter()
            .map(Part::bounds)
            .reduce(|mut acc, next| {
                acc.merge(&next);
                acc
            })
            .filter(|aabb| !aabb.is_empty())
    }
}

/// Axis-aligned bounding box in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    pub fn expand_point(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn expand_sphere(&mut self, center: &Point3<f64>, radius: f64) {
        let r = Vector3::repeat(radius.abs());
        self.expand_point(&(center - r));
        self.expand_point(&(center + r));
    }

    pub fn merge(&mut self, other: &Aabb) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cylinder_bounds_follow_placement() {
        let part = Part::new(
            Primitive::Cylinder {
                radius_bottom: 0.5,
                radius_top: 0.5,
                height: 2.0,
            },
            Placement::aligned(Point3::new(1.0, 0.0, 0.0), &Vector3::x()),
            PartRole::Body,
        );
        let aabb = part.bounds();
        assert_relative_eq!(aabb.min, Point3::new(0.5, -0.5, -0.5), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Point3::new(3.5, 0.5, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn pick_volumes_are_hidden() {
        let solid = Solid::group(
            "Weld",
            vec![
                Part::new(
                    Primitive::Ring { radius: 1.0 },
                    Placement::identity(),
                    PartRole::Symbol,
                ),
                Part::new(
                    Primitive::Disc { radius: 1.0 },
                    Placement::identity(),
                    PartRole::PickVolume,
                ),
            ],
        );
        assert_eq!(solid.visible_parts().count(), 1);
    }

    #[test]
    fn non_finite_radius_is_detected() {
        let solid = Solid::single(
            "Cap",
            Part::new(
                Primitive::Sphere { radius: f64::NAN },
                Placement::identity(),
                PartRole::Body,
            ),
        );
        assert!(!solid.is_finite());
    }

    #[test]
    fn empty_solid_has_no_bounds() {
        assert!(Solid::group("Nothing", Vec::new()).bounds().is_none());
    }
}
