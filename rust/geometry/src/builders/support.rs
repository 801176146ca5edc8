// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support: a three-axis cross with inward arrowheads, sized from the
//! pipe it sits on and turned about +Z to follow that pipe.
//!
//! Only anchors, guides, skids, springs and hangers get the symbol; any
//! other `SKEY` is drawn as a placeholder.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use pcf_lite_core::{Component, KeypointKind};
use tracing::debug;

use super::helpers::{keypoints, raw_point};
use super::placeholder::PlaceholderBuilder;
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{Part, PartRole, Placement, Primitive, Solid};
use crate::transform::scale_point;

/// Support builder
pub struct SupportBuilder;

impl SolidBuilder for SupportBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::CoOrds;
        let coords = keypoints(component, &kind, 1)?;
        let raw = raw_point(&coords[0], &kind)?;

        if !component.support_kind().is_some_and(|s| s.has_symbol()) {
            return PlaceholderBuilder.build(component, ctx);
        }

        let tolerance = ctx.config.topology_tolerance;
        let radius = ctx.resolver.pipe_radius_at(raw, ctx.units, tolerance);
        let direction = ctx
            .resolver
            .pipe_direction_at(raw, tolerance)
            .unwrap_or_else(|| {
                debug!(pipeline = ctx.pipeline_reference, ?raw, "No pipe at support, using +X");
                Vector3::x()
            });

        let frame = Placement::new(
            scale_point(raw, ctx.units.coord_scale),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), direction.y.atan2(direction.x)),
        );
        let parts = symbol(radius * ctx.config.support_symbol_scale)
            .into_iter()
            .map(|part| Part {
                placement: part.placement.then(&frame),
                ..part
            })
            .collect();

        Ok(Solid::group("Support", parts))
    }
}

/// Symbol parts in the support's local frame, half-extent `extent`.
fn symbol(extent: f64) -> Vec<Part> {
    let arrow_length = 0.2 * extent;
    let arrow_base = 0.5 * arrow_length;
    let inset = 1.5 * arrow_length;
    // Arrow centre sits `inset` in from the tip of the axis line; the cone
    // base is half an arrow length further out.
    let base_offset = extent - inset + arrow_length / 2.0;

    let mut parts = Vec::with_capacity(10);
    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        parts.push(Part::new(
            Primitive::Segment {
                from: Point3::from(-axis * extent),
                to: Point3::from(axis * extent),
            },
            Placement::identity(),
            PartRole::Symbol,
        ));
        for sign in [1.0, -1.0] {
            let outward = axis * sign;
            parts.push(Part::new(
                Primitive::Cylinder {
                    radius_bottom: arrow_base,
                    radius_top: 0.0,
                    height: arrow_length,
                },
                Placement::aligned(Point3::from(outward * base_offset), &-outward),
                PartRole::Symbol,
            ));
        }
    }
    parts.push(Part::new(
        Primitive::Disc { radius: extent },
        Placement::identity(),
        PartRole::PickVolume,
    ));
    parts
}
