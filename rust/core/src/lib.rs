// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PCF-Lite Core Parser
//!
//! Permissive parser for PCF (Piping Component File) plant-piping data.
//! Turns raw text into pipelines, components and typed geometric keypoints.
//!
//! ## Overview
//!
//! - **Units**: `UNITS-BORE` / `UNITS-CO-ORDS` header directives resolved to
//!   meter multipliers
//! - **Materials**: `MATERIALS` section grouped by `ITEM-CODE`
//! - **Pipelines**: line-driven state machine producing ordered components
//!   with keypoints grouped by kind
//! - **Typed fields**: numeric tokens decode to `Result<f64, FieldError>`
//!   instead of silently becoming NaN
//!
//! ## Quick Start
//!
//! ```rust
//! use pcf_lite_core::{parse, ComponentKind, KeypointKind};
//!
//! let text = "\
//! UNITS-BORE INCH
//! UNITS-CO-ORDS MM
//! PIPELINE-REFERENCE P1
//! PIPE
//!     END-POINT 0 0 0 6
//!     END-POINT 1000 0 0 6
//! ";
//! let parsed = parse(text);
//! let pipe = &parsed.pipelines[0].components[0];
//! assert_eq!(pipe.kind, ComponentKind::Pipe);
//! assert_eq!(pipe.geometry.get(&KeypointKind::End).len(), 2);
//! assert_eq!(parsed.units.coord_scale, 0.001);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for parsed data

pub mod error;
pub mod materials;
pub mod model;
pub mod parser;
pub mod units;

pub use error::{parse_field, Field, FieldError};
pub use materials::MaterialCatalog;
pub use model::{
    Component, ComponentKind, Geometry, Keypoint, KeypointKind, ParseResult, Pipeline,
    SupportKind,
};
pub use parser::{parse, PcfParser};
pub use units::{resolve_units, unit_scale, Units};
