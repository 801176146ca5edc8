// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valve: two cones, wide at each end point, meeting at the centre
//! point (or the midpoint of the ends). The pipe the valve sits on is
//! kept as an invisible pick volume.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::pipe::PipeBuilder;
use super::{BuildContext, SolidBuilder};
use crate::error::{BuildError, BuildResult};
use crate::solid::{PartRole, Solid};

/// Valve builder
pub struct ValveBuilder;

impl SolidBuilder for ValveBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 2)?;
        let start = scaled_point(&ends[0], &kind, ctx.units)?;
        let end = scaled_point(&ends[1], &kind, ctx.units)?;
        let radius = bore_radius(&ends[0], &kind, ctx.units)?;

        let centre = match component.geometry.first(&KeypointKind::Centre) {
            Some(keypoint) => scaled_point(keypoint, &KeypointKind::Centre, ctx.units)?,
            None => nalgebra::center(&start, &end),
        };
        if centre == start || centre == end {
            return Err(BuildError::Degenerate("valve half has zero length"));
        }

        let tip = radius * ctx.config.valve_tip_ratio;
        let mut parts = vec![
            cylinder_between(start, centre, radius, tip, PartRole::Body),
            cylinder_between(end, centre, radius, tip, PartRole::Body),
        ];
        parts.extend(PipeBuilder::run(component, ctx, PartRole::PickVolume).ok());

        Ok(Solid::group("Valve", parts))
    }
}
