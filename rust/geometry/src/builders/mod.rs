// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid builders, one per component category
//!
//! - `pipe`: straight cylinder between two end points
//! - `bend`: tube along a quadratic curve through the centre point
//! - `reducer`: frustum between two bores
//! - `tee`, `olet`: main run plus branch cylinders
//! - `flange`, `cap`: oversized disc and end closure
//! - `valve`: two cones meeting at the centre
//! - `weld`, `support`: schematic symbols with pick volumes
//! - `placeholder`: best-effort solid for anything else
//! - `helpers`: keypoint access and unit conversion shared by all builders

mod bend;
mod cap;
mod flange;
mod helpers;
mod olet;
mod pipe;
mod placeholder;
mod reducer;
mod support;
mod tee;
mod valve;
mod weld;


pub use bend::BendBuilder;
pub use cap::CapBuilder;
pub use flange::FlangeBuilder;
pub use olet::OletBuilder;
pub use pipe::PipeBuilder;
pub use placeholder::PlaceholderBuilder;
pub use reducer::ReducerBuilder;
pub use support::SupportBuilder;
pub use tee::TeeBuilder;
pub use valve::ValveBuilder;
pub use weld::WeldBuilder;

use pcf_lite_core::{Component, Units};

use crate::config::BuildConfig;
use crate::error::BuildResult;
use crate::topology::{ComponentId, TopologyResolver};

/// Everything a builder may consult besides the component itself
pub struct BuildContext<'r, 'a> {
    pub units: &'r Units,
    pub resolver: &'r TopologyResolver<'a>,
    pub config: &'r BuildConfig,
    /// Reference of the pipeline owning the component
    pub pipeline_reference: &'r str,
    /// Position of the component being built
    pub id: ComponentId,
}

/// Builder trait
/// Each builder turns one component category into a [`crate::Solid`]
pub trait SolidBuilder {
    /// Build the solid, or explain why the component cannot have one
    fn build(&self, component: &Component, ctx: &BuildContext<'_, '_>) -> BuildResult;
}
