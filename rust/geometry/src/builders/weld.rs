// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weld: a flat cross-and-ring marker perpendicular to the pipe axis.
//!
//! The axis comes from the weld's own two end points when they differ.
//! A weld given as a single point borrows the direction of the straight
//! run it touches, falling back to +X.

use nalgebra::{Point3, Vector3};
use pcf_lite_core::{Component, KeypointKind};
use tracing::debug;

use super::helpers::{bore_radius, keypoints, raw_point, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{Part, PartRole, Placement, Primitive, Solid};

/// Weld builder
pub struct WeldBuilder;

impl SolidBuilder for WeldBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 1)?;
        let first_raw = raw_point(&ends[0], &kind)?;
        let first = scaled_point(&ends[0], &kind, ctx.units)?;
        let radius = bore_radius(&ends[0], &kind, ctx.units)?;
        let second = match ends.get(1) {
            Some(keypoint) => Some(scaled_point(keypoint, &kind, ctx.units)?),
            None => None,
        };

        let (centre, axis) = match second {
            Some(second) if second != first => {
                (nalgebra::center(&first, &second), second - first)
            }
            Some(second) => (nalgebra::center(&first, &second), inferred_axis(first_raw, ctx)),
            None => (first, inferred_axis(first_raw, ctx)),
        };

        let frame = Placement::aligned(centre, &axis);
        let config = ctx.config;
        let arm = radius * config.weld_arm_ratio;
        let thickness = radius * config.weld_pick_thickness;

        let mut parts: Vec<Part> = [Vector3::x(), -Vector3::x(), Vector3::y(), -Vector3::y()]
            .into_iter()
            .map(|dir| {
                Part::new(
                    Primitive::Segment {
                        from: Point3::origin(),
                        to: Point3::from(dir * arm),
                    },
                    frame,
                    PartRole::Symbol,
                )
            })
            .collect();
        parts.push(Part::new(
            Primitive::Ring {
                radius: radius * config.weld_ring_ratio,
            },
            frame,
            PartRole::Symbol,
        ));
        parts.push(Part::new(
            Primitive::Cylinder {
                radius_bottom: arm,
                radius_top: arm,
                height: thickness,
            },
            Placement::at(Point3::new(0.0, 0.0, -thickness / 2.0)).then(&frame),
            PartRole::PickVolume,
        ));

        Ok(Solid::group("Weld", parts))
    }
}

fn inferred_axis(raw: [f64; 3], ctx: &BuildContext<'_, '_>) -> Vector3<f64> {
    ctx.resolver
        .direction_at_shared_keypoint(raw, Some(ctx.id))
        .unwrap_or_else(|| {
            debug!(
                pipeline = ctx.pipeline_reference,
                ?raw,
                "No straight run at weld, using +X"
            );
            Vector3::x()
        })
}
