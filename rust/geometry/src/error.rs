// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use pcf_lite_core::{FieldError, KeypointKind};
use thiserror::Error;

use crate::topology::ComponentId;

/// Result type for reconstruction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures of the reconstruction engine itself
///
/// Malformed input never produces one of these; it produces a
/// [`BuildError`] and the component is skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No component at pipeline {}, index {}", .0.pipeline, .0.component)]
    NoSuchComponent(ComponentId),
}

/// Which numeric part of a keypoint was unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Coordinates,
    Nominal,
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NumericField::Coordinates => "coordinates",
            NumericField::Nominal => "nominal diameter",
        })
    }
}

/// Why a builder produced no solid for a component
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("expected at least {expected} {kind}, found {found}")]
    MissingKeypoint {
        kind: KeypointKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} {field}: {source}")]
    MalformedNumeric {
        kind: KeypointKind,
        field: NumericField,
        source: FieldError,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),

    #[error("no keypoint with usable coordinates and nominal diameter")]
    NoUsableKeypoints,
}

/// Result of a single builder call
pub type BuildResult = std::result::Result<crate::solid::Solid, BuildError>;
