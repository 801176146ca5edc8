// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tee: main run between the end points plus a branch from the centre
//! point to the first branch point.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{PartRole, Solid};

/// Tee builder
pub struct TeeBuilder;

impl SolidBuilder for TeeBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let end_kind = KeypointKind::End;
        let branch_kind = KeypointKind::Branch(1);

        let ends = keypoints(component, &end_kind, 2)?;
        let centres = keypoints(component, &KeypointKind::Centre, 1)?;
        let branches = keypoints(component, &branch_kind, 1)?;

        let start = scaled_point(&ends[0], &end_kind, ctx.units)?;
        let end = scaled_point(&ends[1], &end_kind, ctx.units)?;
        let centre = scaled_point(&centres[0], &KeypointKind::Centre, ctx.units)?;
        let branch = scaled_point(&branches[0], &branch_kind, ctx.units)?;

        let main_radius = bore_radius(&ends[0], &end_kind, ctx.units)?;
        let branch_radius = bore_radius(&branches[0], &branch_kind, ctx.units)?;

        Ok(Solid::merged(
            "Tee",
            vec![
                cylinder_between(start, end, main_radius, main_radius, PartRole::Body),
                cylinder_between(centre, branch, branch_radius, branch_radius, PartRole::Body),
            ],
        ))
    }
}
