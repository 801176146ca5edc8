// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight pipe: one cylinder between the first two end points.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::{BuildError, BuildResult};
use crate::solid::{Part, PartRole, Solid};

/// Pipe builder
pub struct PipeBuilder;

impl PipeBuilder {
    /// Cylinder along the pipe run, radius from the first end point.
    ///
    /// Shared with the valve, whose pick volume is the pipe it sits on.
    pub(super) fn run(
        component: &Component,
        ctx: &BuildContext<'_, '_>,
        role: PartRole,
    ) -> Result<Part, BuildError> {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 2)?;
        let start = scaled_point(&ends[0], &kind, ctx.units)?;
        let end = scaled_point(&ends[1], &kind, ctx.units)?;
        let radius = bore_radius(&ends[0], &kind, ctx.units)?;
        Ok(cylinder_between(start, end, radius, radius, role))
    }
}

impl SolidBuilder for PipeBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        Self::run(component, ctx, PartRole::Body).map(|part| Solid::single("Pipe", part))
    }
}
