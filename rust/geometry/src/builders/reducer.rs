// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reducer: frustum from the first end point's bore to the second's.
//! Eccentric reducers are drawn concentric.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{PartRole, Solid};

/// Reducer builder
pub struct ReducerBuilder;

impl SolidBuilder for ReducerBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 2)?;
        let start = scaled_point(&ends[0], &kind, ctx.units)?;
        let end = scaled_point(&ends[1], &kind, ctx.units)?;
        let start_radius = bore_radius(&ends[0], &kind, ctx.units)?;
        let end_radius = bore_radius(&ends[1], &kind, ctx.units)?;

        Ok(Solid::single(
            "Reducer",
            cylinder_between(start, end, start_radius, end_radius, PartRole::Body),
        ))
    }
}
