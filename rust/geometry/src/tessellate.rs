// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangulation of solid descriptions
//!
//! Converts the placed primitives of a [`Solid`] into a [`Mesh`] for
//! surfaces and a [`LineSet`] for symbolic outlines. Invisible parts are
//! skipped.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::config::BuildConfig;
use crate::mesh::{LineSet, Mesh};
use crate::solid::{Part, Placement, Primitive, Solid};

impl Solid {
    /// Triangulate all visible surface parts into one mesh.
    pub fn to_mesh(&self, config: &BuildConfig) -> Mesh {
        let mut mesh = Mesh::new();
        for part in self.visible_parts() {
            tessellate_part(part, config, &mut mesh);
        }
        mesh
    }

    /// Collect all visible outline parts as line segments.
    pub fn line_segments(&self, config: &BuildConfig) -> LineSet {
        let mut lines = LineSet::new();
        for part in self.visible_parts() {
            outline_part(part, config, &mut lines);
        }
        lines
    }
}

/// Append the triangles of one part to `mesh`.
pub fn tessellate_part(part: &Part, config: &BuildConfig, mesh: &mut Mesh) {
    let segments = config.radial_segments.max(3);
    let placement = &part.placement;
    match part.primitive {
        Primitive::Cylinder {
            radius_bottom,
            radius_top,
            height,
        } => frustum(mesh, placement, radius_bottom, radius_top, height, segments),
        Primitive::Sphere { radius } => sphere(mesh, placement, radius, segments),
        Primitive::Disc { radius } => disc(mesh, placement, radius, 0.0, 1.0, segments),
        Primitive::SweptTube {
            start,
            control,
            end,
            radius,
        } => tube(
            mesh,
            placement,
            [start, control, end],
            radius,
            config.tube_segments.max(1),
            segments,
        ),
        Primitive::Segment { .. } | Primitive::Ring { .. } => {}
    }
}

/// Append the outline segments of one part to `lines`.
pub fn outline_part(part: &Part, config: &BuildConfig, lines: &mut LineSet) {
    let placement = &part.placement;
    match part.primitive {
        Primitive::Segment { from, to } => {
            lines.add_segment(placement.transform_point(&from), placement.transform_point(&to));
        }
        Primitive::Ring { radius } => {
            let segments = config.radial_segments.max(3);
            let point = |j: usize| {
                let angle = TAU * j as f64 / segments as f64;
                placement.transform_point(&Point3::new(
                    radius * angle.cos(),
                    radius * angle.sin(),
                    0.0,
                ))
            };
            for j in 0..segments {
                lines.add_segment(point(j), point(j + 1));
            }
        }
        _ => {}
    }
}

#[inline]
fn unit_circle(j: usize, segments: usize) -> (f64, f64) {
    let angle = TAU * j as f64 / segments as f64;
    (angle.cos(), angle.sin())
}

fn frustum(
    mesh: &mut Mesh,
    placement: &Placement,
    radius_bottom: f64,
    radius_top: f64,
    height: f64,
    segments: usize,
) {
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    let base = mesh.vertex_count() as u32;
    for (radius, z) in [(radius_bottom, 0.0), (radius_top, height)] {
        for j in 0..segments {
            let (c, s) = unit_circle(j, segments);
            let normal = Vector3::new(c, s, slope).normalize();
            mesh.add_vertex(
                placement.transform_point(&Point3::new(radius * c, radius * s, z)),
                placement.transform_vector(&normal),
            );
        }
    }

    let n = segments as u32;
    for j in 0..n {
        let j_next = (j + 1) % n;
        let (a, b) = (base + j, base + j_next);
        let (c, d) = (base + n + j, base + n + j_next);
        mesh.add_triangle(a, b, d);
        mesh.add_triangle(a, d, c);
    }

    if radius_bottom > 0.0 {
        disc(mesh, placement, radius_bottom, 0.0, -1.0, segments);
    }
    if radius_top > 0.0 {
        disc(mesh, placement, radius_top, height, 1.0, segments);
    }
}

/// Fan-triangulated disc at local height `z`, facing `facing` (+1 or -1) along Z.
fn disc(mesh: &mut Mesh, placement: &Placement, radius: f64, z: f64, facing: f64, segments: usize) {
    let normal = placement.transform_vector(&Vector3::new(0.0, 0.0, facing));
    let center = mesh.add_vertex(placement.transform_point(&Point3::new(0.0, 0.0, z)), normal);
    for j in 0..segments {
        let (c, s) = unit_circle(j, segments);
        mesh.add_vertex(
            placement.transform_point(&Point3::new(radius * c, radius * s, z)),
            normal,
        );
    }

    let n = segments as u32;
    for j in 0..n {
        let (a, b) = (center + 1 + j, center + 1 + (j + 1) % n);
        if facing > 0.0 {
            mesh.add_triangle(center, a, b);
        } else {
            mesh.add_triangle(center, b, a);
        }
    }
}

fn sphere(mesh: &mut Mesh, placement: &Placement, radius: f64, segments: usize) {
    let stacks = (segments / 2).max(2);
    let base = mesh.vertex_count() as u32;

    for i in 0..=stacks {
        let polar = std::f64::consts::PI * i as f64 / stacks as f64;
        let (sin_p, cos_p) = polar.sin_cos();
        for j in 0..=segments {
            let (c, s) = unit_circle(j, segments);
            let normal = Vector3::new(sin_p * c, sin_p * s, cos_p);
            mesh.add_vertex(
                placement.transform_point(&Point3::from(normal * radius)),
                placement.transform_vector(&normal),
            );
        }
    }

    let row = segments as u32 + 1;
    for i in 0..stacks as u32 {
        for j in 0..segments as u32 {
            let a = base + i * row + j;
            let b = a + row;
            mesh.add_triangle(a, b, b + 1);
            mesh.add_triangle(a, b + 1, a + 1);
        }
    }
}

/// Evaluate a quadratic Bezier curve and its derivative at `t`.
fn bezier(points: &[Point3<f64>; 3], t: f64) -> (Point3<f64>, Vector3<f64>) {
    let [p0, p1, p2] = points;
    let u = 1.0 - t;
    let position =
        Point3::from(p0.coords * (u * u) + p1.coords * (2.0 * u * t) + p2.coords * (t * t));
    let tangent = (p1 - p0) * (2.0 * u) + (p2 - p1) * (2.0 * t);
    (position, tangent)
}

/// Open tube of circular section along a quadratic Bezier centerline.
fn tube(
    mesh: &mut Mesh,
    placement: &Placement,
    points: [Point3<f64>; 3],
    radius: f64,
    tube_segments: usize,
    segments: usize,
) {
    let chord = points[2] - points[0];
    let base = mesh.vertex_count() as u32;

    // A quadratic Bezier is planar, so the plane normal is perpendicular to
    // every tangent and keeps the ring frames from flipping along the curve.
    let incoming = points[1] - points[0];
    let outgoing = points[2] - points[1];
    let plane_normal = incoming.cross(&outgoing);
    let bend_normal = (plane_normal.norm() > 1e-9 * incoming.norm() * outgoing.norm())
        .then(|| plane_normal.normalize());
    // Straight curve: one fixed seed vector not parallel to the axis.
    let axis = [chord, incoming, outgoing]
        .into_iter()
        .find(|v| v.norm_squared() > f64::EPSILON)
        .map(|v| v.normalize())
        .unwrap_or_else(Vector3::z);
    let up = if axis.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };

    for i in 0..=tube_segments {
        let (p, derivative) = bezier(&points, i as f64 / tube_segments as f64);
        let tangent = [derivative, chord, Vector3::z()]
            .into_iter()
            .find(|v| v.norm_squared() > f64::EPSILON)
            .map(|v| v.normalize())
            .unwrap_or_else(Vector3::z);

        let perp1 = bend_normal.unwrap_or_else(|| tangent.cross(&up).normalize());
        let perp2 = tangent.cross(&perp1).normalize();

        for j in 0..segments {
            let (c, s) = unit_circle(j, segments);
            let offset = perp1 * c + perp2 * s;
            mesh.add_vertex(
                placement.transform_point(&(p + offset * radius)),
                placement.transform_vector(&offset),
            );
        }
    }

    let n = segments as u32;
    for i in 0..tube_segments as u32 {
        let ring = base + i * n;
        let next = ring + n;
        for j in 0..n {
            let j_next = (j + 1) % n;
            mesh.add_triangle(ring + j, next + j, next + j_next);
            mesh.add_triangle(ring + j, next + j_next, ring + j_next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::PartRole;
    use approx::assert_relative_eq;

    fn config() -> BuildConfig {
        BuildConfig::default().with_radial_segments(8)
    }

    #[test]
    fn cylinder_has_side_and_caps() {
        let solid = Solid::single(
            "Pipe",
            Part::new(
                Primitive::Cylinder {
                    radius_bottom: 1.0,
                    radius_top: 1.0,
                    height: 2.0,
                },
                Placement::identity(),
                PartRole::Body,
            ),
        );
        let mesh = solid.to_mesh(&config());
        // 16 side vertices, 2 x (1 + 8) cap vertices
        assert_eq!(mesh.vertex_count(), 34);
        assert_eq!(mesh.triangle_count(), 16 + 8 + 8);
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 2.0);
    }

    #[test]
    fn cone_has_no_top_cap() {
        let mut mesh = Mesh::new();
        frustum(&mut mesh, &Placement::identity(), 1.0, 0.0, 1.0, 8);
        assert_eq!(mesh.triangle_count(), 16 + 8);
    }

    #[test]
    fn tube_follows_curve_endpoints() {
        let mut mesh = Mesh::new();
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        tube(&mut mesh, &Placement::identity(), points, 0.1, 4, 8);
        assert_eq!(mesh.vertex_count(), 5 * 8);
        assert_eq!(mesh.triangle_count(), 4 * 8 * 2);

        let (min, max) = mesh.bounds().unwrap();
        assert!(min.x > -0.11 && max.y < 1.11);
    }

    fn vertex(mesh: &Mesh, index: usize) -> Point3<f32> {
        Point3::new(
            mesh.positions[index * 3],
            mesh.positions[index * 3 + 1],
            mesh.positions[index * 3 + 2],
        )
    }

    #[test]
    fn tube_rings_do_not_twist_around_a_bend() {
        let mut mesh = Mesh::new();
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let (radius, stations, sides) = (0.1, 20, 8);
        tube(&mut mesh, &Placement::identity(), points, radius, stations, sides);

        for ring in 0..stations {
            for j in 0..sides {
                let here = vertex(&mesh, ring * sides + j);
                let next = vertex(&mesh, (ring + 1) * sides + j);
                // A flipped frame jumps about one diameter.
                assert!(
                    (next - here).norm() < 0.15,
                    "ring {ring} vertex {j} jumped {}",
                    (next - here).norm()
                );
            }
            // First vertex of every ring sits on the bend-plane normal side.
            let first = vertex(&mesh, ring * sides);
            assert_relative_eq!(first.z.abs(), radius as f32, epsilon = 1e-5);
            assert_eq!(first.z.signum(), vertex(&mesh, 0).z.signum());
        }
    }

    #[test]
    fn straight_tube_rings_are_translated_copies() {
        let mut mesh = Mesh::new();
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        tube(&mut mesh, &Placement::identity(), points, 0.1, 4, 8);

        for ring in 1..=4 {
            let shift = vertex(&mesh, ring * 8) - vertex(&mesh, 0);
            for j in 1..8 {
                let moved = vertex(&mesh, ring * 8 + j) - vertex(&mesh, j);
                assert_relative_eq!(moved, shift, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn hidden_parts_are_not_tessellated() {
        let solid = Solid::group(
            "Weld",
            vec![
                Part::new(
                    Primitive::Segment {
                        from: Point3::origin(),
                        to: Point3::new(1.0, 0.0, 0.0),
                    },
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
        assert!(solid.to_mesh(&config()).is_empty());
        assert_eq!(solid.line_segments(&config()).segment_count(), 1);
    }

    #[test]
    fn ring_outline_is_closed() {
        let part = Part::new(
            Primitive::Ring { radius: 2.0 },
            Placement::identity(),
            PartRole::Symbol,
        );
        let mut lines = LineSet::new();
        outline_part(&part, &config(), &mut lines);
        assert_eq!(lines.segment_count(), 8);
        assert_relative_eq!(lines.positions[0], 2.0);
        let last = &lines.positions[lines.positions.len() - 3..];
        assert_relative_eq!(last[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(last[1], 0.0, epsilon = 1e-5);
    }
}
