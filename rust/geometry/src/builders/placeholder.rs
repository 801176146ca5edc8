// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placeholder for unrecognized components and plain supports.
//!
//! Collects every keypoint that has both usable coordinates and a usable
//! nominal diameter. One point (or two coincident ones) gives a sphere;
//! two distinct points give a cylinder with the smaller of the two radii.

use nalgebra::Point3;
use pcf_lite_core::Component;
use smallvec::SmallVec;
use tracing::trace;

use super::helpers::cylinder_between;
use super::{BuildContext, SolidBuilder};
use crate::error::{BuildError, BuildResult};
use crate::solid::{Part, PartRole, Placement, Primitive, Solid};
use crate::transform::scale_point;

/// Placeholder builder
pub struct PlaceholderBuilder;

impl SolidBuilder for PlaceholderBuilder {
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult {
        let mut points: SmallVec<[(Point3<f64>, f64); 2]> = SmallVec::new();
        for (kind, keypoints) in component.geometry.iter() {
            for keypoint in keypoints {
                let Some(nominal) = keypoint.nominal.clone() else {
                    continue;
                };
                match (keypoint.raw_coords(), nominal) {
                    (Ok(raw), Ok(nominal)) => points.push((
                        scale_point(raw, ctx.units.coord_scale),
                        nominal * ctx.units.bore_scale / 2.0,
                    )),
                    _ => trace!(%kind, "Ignoring unusable keypoint"),
                }
            }
        }

        let part = match points.as_slice() {
            [] => return Err(BuildError::NoUsableKeypoints),
            [(a, ra), (b, rb), ..] if a != b => {
                cylinder_between(*a, *b, ra.min(*rb), ra.min(*rb), PartRole::Body)
            }
            [(a, ra), ..] => Part::new(
                Primitive::Sphere {
                    radius: ra * ctx.config.sphere_shrink,
                },
                Placement::at(*a),
                PartRole::Body,
            ),
        };
        Ok(Solid::single("Placeholder", part))
    }
}
