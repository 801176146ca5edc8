// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bend / elbow: a tube along the quadratic curve from the first end
//! point, pulled toward the centre point, to the second end point. Both
//! open ends are closed with discs.

use pcf_lite_core::{Component, KeypointKind};

use super::helpers::{bore_radius, keypoints, scaled_point};
use super::{BuildContext, SolidBuilder};
use crate::error::BuildResult;
use crate::solid::{Part, PartRole, Placement, Primitive, Solid};

/// Bend builder
pub struct BendBuilder;

impl SolidBuilder for BendBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let ends = keypoints(component, &KeypointKind::End, 2)?;
        let centres = keypoints(component, &KeypointKind::Centre, 1)?;

        let start = scaled_point(&ends[0], &KeypointKind::End, ctx.units)?;
        let end = scaled_point(&ends[1], &KeypointKind::End, ctx.units)?;
        let control = scaled_point(&centres[0], &KeypointKind::Centre, ctx.units)?;
        let radius = bore_radius(&ends[0], &KeypointKind::End, ctx.units)?;

        let tube = Part::new(
            Primitive::SweptTube {
                start,
                control,
                end,
                radius,
            },
            Placement::identity(),
            PartRole::Body,
        );
        // Caps face outward, away from the centre point.
        let start_cap = Part::new(
            Primitive::Disc { radius },
            Placement::aligned(start, &(start - control)),
            PartRole::Cap,
        );
        let end_cap = Part::new(
            Primitive::Disc { radius },
            Placement::aligned(end, &(end - control)),
            PartRole::Cap,
        );

        Ok(Solid::merged("Bend", vec![tube, start_cap, end_cap]))
    }
}
