// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flange: an oversized short cylinder between the two end points.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, cylinder_between, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::{BuildError, BuildResult};
use crate::solid::{PartRole, Solid};

/// Flange builder
pub struct FlangeBuilder;

impl SolidBuilder for FlangeBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let kind = KeypointKind::End;
        let ends = keypoints(component, &kind, 2)?;
        let start = scaled_point(&ends[0], &kind, ctx.units)?;
        let end = scaled_point(&ends[1], &kind, ctx.units)?;
        if start == end {
            return Err(BuildError::Degenerate("flange end points coincide"));
        }

        // Both bores must be readable even though only the first sizes the disc.
        let radius = bore_radius(&ends[0], &kind, ctx.units)?;
        bore_radius(&ends[1], &kind, ctx.units)?;
        let radius = radius * ctx.config.flange_oversize;

        Ok(Solid::single(
            "Flange",
            cylinder_between(start, end, radius, radius, PartRole::Body),
        ))
    }
}
