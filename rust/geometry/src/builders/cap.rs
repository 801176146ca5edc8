// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cap: a cylinder between its end points, or a sphere when it only
//! marks a point.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{Part, PartRole, Placement, Primitive, Solid};

/// Cap builder
pub struct CapBuilder;

impl SolidBuilder for CapBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 1)?;
        let start = scaled_point(&ends[0], &kind, ctx.units)?;
        let radius = bore_radius(&ends[0], &kind, ctx.units)?;

        let end = match ends.get(1) {
            Some(keypoint) => Some(scaled_point(keypoint, &kind, ctx.units)?),
            None => None,
        };

        let part = match end {
            Some(end) if end != start => {
                cylinder_between(start, end, radius, radius, PartRole::Body)
            }
            _ => Part::new(
                Primitive::Sphere {
                    radius: radius * ctx.config.sphere_shrink,
                },
                Placement::at(start),
                PartRole::Body,
            ),
        };
        Ok(Solid::single("Cap", part))
    }
}
