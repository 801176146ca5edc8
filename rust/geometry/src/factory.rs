// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Component Factory - dispatch from component kind to solid builder
//!
//! Builds the topology index once, then routes each component to its
//! builder and tags the result with where it came from.

use pcf_lite_core::{Component, ComponentKind, ParseResult};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::builders::{
    BendBuilder, BuildContext, CapBuilder, FlangeBuilder, OletBuilder, PipeBuilder,
    PlaceholderBuilder, ReducerBuilder, SolidBuilder, SupportBuilder, TeeBuilder, ValveBuilder,
    WeldBuilder,
};
use crate::config::BuildConfig;
use crate::error::{BuildError, BuildResult, Error, Result};
use crate::solid::Solid;
use crate::topology::{ComponentId, TopologyResolver};

/// Where a solid came from
#[derive(Debug, Clone, Copy)]
pub struct Provenance<'a> {
    pub id: ComponentId,
    pub pipeline_reference: &'a str,
    /// Type string as written in the file (upper-cased)
    pub component_type: &'a str,
    /// The parsed component the solid was built from
    pub component: &'a Component,
}

/// A built solid and its provenance
#[derive(Debug, Clone)]
pub struct ComponentSolid<'a> {
    pub solid: Solid,
    pub provenance: Provenance<'a>,
}

/// A component that produced no solid, and why
#[derive(Debug, Clone)]
pub struct Skipped<'a> {
    pub provenance: Provenance<'a>,
    pub reason: BuildError,
}

/// Outcome counts of a full build pass
#[derive(Debug, Clone, Default)]
pub struct BuildReport<'a> {
    pub built: usize,
    pub skipped: Vec<Skipped<'a>>,
    /// Per component type: (built, skipped)
    pub per_type: FxHashMap<&'a str, (usize, usize)>,
}

impl BuildReport<'_> {
    pub fn total(&self) -> usize {
        self.built + self.skipped.len()
    }
}

/// Component factory - routes components to builders
pub struct ComponentFactory<'a> {
    parsed: &'a ParseResult,
    resolver: TopologyResolver<'a>,
    config: BuildConfig,
}

impl<'a> ComponentFactory<'a> {
    /// Create a factory with default proportions.
    pub fn new(parsed: &'a ParseResult) -> Self {
        Self::with_config(parsed, BuildConfig::default())
    }

    pub fn with_config(parsed: &'a ParseResult, config: BuildConfig) -> Self {
        Self {
            parsed,
            resolver: TopologyResolver::new(&parsed.pipelines),
            config,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TopologyResolver<'a> {
        &self.resolver
    }

    /// Builder for a component kind
    pub fn builder_for(kind: ComponentKind) -> &'static dyn SolidBuilder {
        match kind {
            ComponentKind::Pipe => &PipeBuilder,
            ComponentKind::Bend => &BendBuilder,
            ComponentKind::Reducer => &ReducerBuilder,
            ComponentKind::Tee => &TeeBuilder,
            ComponentKind::Flange => &FlangeBuilder,
            ComponentKind::Cap => &CapBuilder,
            ComponentKind::Olet => &OletBuilder,
            ComponentKind::Valve => &ValveBuilder,
            ComponentKind::Weld => &WeldBuilder,
            ComponentKind::Support => &SupportBuilder,
            ComponentKind::Unrecognized => &PlaceholderBuilder,
        }
    }

    /// Build one component
    ///
    /// `Ok(None)` means the component was skipped; the reason is logged.
    /// Only an out-of-range index is an error.
    pub fn build(
        &self,
        pipeline_index: usize,
        component_index: usize,
    ) -> Result<Option<ComponentSolid<'a>>> {
        let id = ComponentId::new(pipeline_index, component_index);
        let provenance = self.provenance(id)?;
        match self.build_component(provenance) {
            Ok(solid) => Ok(Some(ComponentSolid { solid, provenance })),
            Err(reason) => {
                log_skip(&provenance, &reason);
                Ok(None)
            }
        }
    }

    /// Build every component in parse order, dropping skipped ones.
    pub fn build_all(&self) -> Result<Vec<ComponentSolid<'a>>> {
        self.build_all_with_report().map(|(solids, _)| solids)
    }

    /// Build every component in parse order and account for the skips.
    pub fn build_all_with_report(&self) -> Result<(Vec<ComponentSolid<'a>>, BuildReport<'a>)> {
        let mut solids = Vec::with_capacity(self.parsed.component_count());
        let mut report = BuildReport::default();

        for (pi, pipeline) in self.parsed.pipelines.iter().enumerate() {
            for ci in 0..pipeline.components.len() {
                let provenance = self.provenance(ComponentId::new(pi, ci))?;
                let counts = report
                    .per_type
                    .entry(provenance.component_type)
                    .or_default();
                match self.build_component(provenance) {
                    Ok(solid) => {
                        counts.0 += 1;
                        report.built += 1;
                        solids.push(ComponentSolid { solid, provenance });
                    }
                    Err(reason) => {
                        counts.1 += 1;
                        log_skip(&provenance, &reason);
                        report.skipped.push(Skipped { provenance, reason });
                    }
                }
            }
        }

        debug!(
            built = report.built,
            skipped = report.skipped.len(),
            "Build pass complete"
        );
        Ok((solids, report))
    }

    fn provenance(&self, id: ComponentId) -> Result<Provenance<'a>> {
        let pipeline = self
            .parsed
            .pipelines
            .get(id.pipeline)
            .ok_or(Error::NoSuchComponent(id))?;
        let component = pipeline
            .components
            .get(id.component)
            .ok_or(Error::NoSuchComponent(id))?;
        Ok(Provenance {
            id,
            pipeline_reference: &pipeline.reference,
            component_type: &component.type_name,
            component,
        })
    }

    fn build_component(&self, provenance: Provenance<'a>) -> BuildResult {
        let ctx = BuildContext {
            units: &self.parsed.units,
            resolver: &self.resolver,
            config: &self.config,
            pipeline_reference: provenance.pipeline_reference,
            id: provenance.id,
        };
        let component = provenance.component;
        let built = Self::builder_for(component.kind).build(component, &ctx);

        // Finite but huge input can still overflow in the solid math.
        built.and_then(|solid| {
            if solid.is_finite() {
                Ok(solid)
            } else {
                Err(BuildError::Degenerate("non-finite geometry"))
            }
        })
    }
}

fn log_skip(provenance: &Provenance<'_>, reason: &BuildError) {
    warn!(
        pipeline = provenance.pipeline_reference,
        component_type = provenance.component_type,
        index = provenance.id.component,
        %reason,
        "Skipping component"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcf_lite_core::{parse, Keypoint, KeypointKind, Pipeline, Units};

    const PCF: &str = "\
UNITS-BORE INCH
UNITS-CO-ORDS MM
PIPELINE-REFERENCE P1
PIPE
    END-POINT 0 0 0 6
    END-POINT 1000 0 0 6
PIPE
    END-POINT 1000 0 0 6
GIZMO
    END-POINT 1000 0 0 2
    END-POINT 1000 0 500 2
";

    #[test]
    fn every_kind_has_a_builder() {
        // Dispatch is total; spot-check the fallback.
        let parsed = ParseResult {
            pipelines: vec![{
                let mut pipeline = Pipeline::new("P");
                let mut gizmo = Component::new("GIZMO", "GIZMO");
                gizmo
                    .geometry
                    .push(KeypointKind::End, Keypoint::new([0.0; 3], Some(1.0)));
                pipeline.components.push(gizmo);
                pipeline
            }],
            ..ParseResult::default()
        };
        let factory = ComponentFactory::new(&parsed);
        let built = factory.build(0, 0).unwrap().unwrap();
        assert_eq!(built.solid.name, "Placeholder");
        assert_eq!(built.provenance.component_type, "GIZMO");
    }

    #[test]
    fn skipped_components_are_reported() {
        let parsed = parse(PCF);
        let factory = ComponentFactory::new(&parsed);
        let (solids, report) = factory.build_all_with_report().unwrap();

        assert_eq!(solids.len(), 2);
        assert_eq!(report.built, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.skipped[0].provenance.id, ComponentId::new(0, 1));
        assert_eq!(report.per_type["PIPE"], (1, 1));
        assert_eq!(report.per_type["GIZMO"], (1, 0));

        assert!(factory.build(0, 1).unwrap().is_none());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let parsed = parse(PCF);
        let factory = ComponentFactory::new(&parsed);
        assert!(matches!(factory.build(3, 0), Err(Error::NoSuchComponent(_))));
        assert!(matches!(factory.build(0, 9), Err(Error::NoSuchComponent(_))));
    }

    #[test]
    fn overflowing_geometry_skips_only_that_component() {
        let parsed = ParseResult {
            pipelines: vec![{
                let mut pipeline = Pipeline::new("P");
                let mut pipe = Component::new("PIPE", "PIPE");
                pipe.geometry
                    .push(KeypointKind::End, Keypoint::new([0.0; 3], Some(f64::MAX)));
                pipe.geometry
                    .push(KeypointKind::End, Keypoint::new([1.0, 0.0, 0.0], Some(f64::MAX)));
                pipeline.components.push(pipe);
                pipeline
            }],
            units: Units {
                bore_scale: 10.0,
                ..Units::default()
            },
            ..ParseResult::default()
        };
        // Radius overflows to infinity.
        let factory = ComponentFactory::new(&parsed);
        assert!(factory.build(0, 0).unwrap().is_none());
    }

    #[test]
    fn huge_coordinates_do_not_abort_the_pass() {
        let parsed = parse(
            "\
UNITS-BORE MM
UNITS-CO-ORDS M
PIPELINE-REFERENCE P1
PIPE
    END-POINT 0 0 0 6
    END-POINT 1 0 0 6
PIPE
    END-POINT -1e308 0 0 6
    END-POINT 1e308 0 0 6
",
        );
        let factory = ComponentFactory::new(&parsed);
        let (solids, report) = factory.build_all_with_report().unwrap();

        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].provenance.id, ComponentId::new(0, 0));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].provenance.id, ComponentId::new(0, 1));
        assert_eq!(
            report.skipped[0].reason,
            BuildError::Degenerate("non-finite geometry")
        );
        assert_eq!(report.per_type["PIPE"], (1, 1));
    }
}
