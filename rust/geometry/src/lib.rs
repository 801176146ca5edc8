// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PCF-Lite Geometry
//!
//! Procedural reconstruction of 3D solids from parsed PCF components,
//! using nalgebra for placement and orientation.
//!
//! ```rust
//! use pcf_lite_core::parse;
//! use pcf_lite_geometry::{ComponentFactory, Primitive};
//!
//! let parsed = parse(
//!     "UNITS-BORE INCH\nUNITS-CO-ORDS MM\nPIPELINE-REFERENCE P1\n\
//!      PIPE\n    END-POINT 0 0 0 6\n    END-POINT 1000 0 0 6\n",
//! );
//! let factory = ComponentFactory::new(&parsed);
//! let solids = factory.build_all().unwrap();
//!
//! assert_eq!(solids.len(), 1);
//! assert_eq!(solids[0].provenance.pipeline_reference, "P1");
//! assert!(matches!(solids[0].solid.parts[0].primitive, Primitive::Cylinder { .. }));
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod factory;
pub mod mesh;
pub mod solid;
pub mod tessellate;
pub mod topology;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};

pub use builders::{BuildContext, SolidBuilder};
pub use config::BuildConfig;
pub use error::{BuildError, Error, NumericField, Result};
pub use factory::{BuildReport, ComponentFactory, ComponentSolid, Provenance, Skipped};
pub use mesh::{LineSet, Mesh};
pub use solid::{Aabb, Part, PartRole, Placement, Primitive, Solid, SolidForm};
pub use topology::{ComponentId, CoordKey, PipeMatch, TopologyResolver};
