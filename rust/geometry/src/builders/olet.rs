// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Olet: a branch cylinder from the centre point to the first branch
//! point, sized by the branch bore.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{PartRole, Solid};

/// Olet builder
pub struct OletBuilder;

impl SolidBuilder for OletBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let branch_kind = KeypointKind::Branch(1);
        let centres = keypoints(component, &KeypointKind::Centre, 1)?;
        let branches = keypoints(component, &branch_kind, 1)?;

        let centre = scaled_point(&centres[0], &KeypointKind::Centre, ctx.units)?;
        let branch = scaled_point(&branches[0], &branch_kind, ctx.units)?;
        let radius = bore_radius(&branches[0], &branch_kind, ctx.units)?;

        Ok(Solid::single(
            "Olet",
            cylinder_between(centre, branch, radius, radius, PartRole::Body),
        ))
    }
}
