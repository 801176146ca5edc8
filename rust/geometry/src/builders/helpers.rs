// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keypoint access shared by the builders.
//!
//! Every accessor reports the keypoint kind it was looking at so a skip
//! can say exactly which field was missing or malformed.

use nalgebra::Point3;
use pcf_lite_core::{Component, Keypoint, KeypointKind, Units};

use crate::error::{BuildError, NumericField};
use crate::solid::{Part, PartRole, Placement, Primitive};
use crate::transform::scale_point;

/// At least `expected` keypoints of `kind`, in file order.
pub(super) fn keypoints<'c>(
    component: &'c Component,
    kind: &KeypointKind,
    expected: usize,
) -> Result<&'c [Keypoint], BuildError> {
    let points = component.geometry.get(kind);
    if points.len() < expected {
        return Err(BuildError::MissingKeypoint {
            kind: kind.clone(),
            expected,
            found: points.len(),
        });
    }
    Ok(points)
}

/// Raw coordinates of a keypoint.
pub(super) fn raw_point(keypoint: &Keypoint, kind: &KeypointKind) -> Result<[f64; 3], BuildError> {
    keypoint
        .raw_coords()
        .map_err(|source| BuildError::MalformedNumeric {
            kind: kind.clone(),
            field: NumericField::Coordinates,
            source,
        })
}

/// Keypoint position in meters.
pub(super) fn scaled_point(
    keypoint: &Keypoint,
    kind: &KeypointKind,
    units: &Units,
) -> Result<Point3<f64>, BuildError> {
    raw_point(keypoint, kind).map(|raw| scale_point(raw, units.coord_scale))
}

/// Half the keypoint's nominal diameter, in meters.
pub(super) fn bore_radius(
    keypoint: &Keypoint,
    kind: &KeypointKind,
    units: &Units,
) -> Result<f64, BuildError> {
    keypoint
        .nominal()
        .map(|nominal| nominal * units.bore_scale / 2.0)
        .map_err(|source| BuildError::MalformedNumeric {
            kind: kind.clone(),
            field: NumericField::Nominal,
            source,
        })
}

/// Frustum from `start` to `end`, bottom radius at `start`.
///
/// Coincident points give a zero-height cylinder with identity rotation.
pub(super) fn cylinder_between(
    start: Point3<f64>,
    end: Point3<f64>,
    radius_bottom: f64,
    radius_top: f64,
    role: PartRole,
) -> Part {
    let axis = end - start;
    Part::new(
        Primitive::Cylinder {
            radius_bottom,
            radius_top,
            height: axis.norm(),
        },
        Placement::aligned(start, &axis),
        role,
    )
}
