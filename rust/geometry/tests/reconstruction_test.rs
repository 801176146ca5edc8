// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use pcf_lite_core::{parse, ParseResult};
use pcf_lite_geometry::{
    BuildConfig, BuildError, ComponentFactory, PartRole, Point3, Primitive, SolidForm, Vector3,
};
use std::fs;
use std::path::PathBuf;

fn load_fixture() -> ParseResult {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("pcf")
        .join("cooling_water.pcf");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {} unreadable: {e}", path.display()));
    parse(&text)
}

#[test]
fn single_pipe_end_to_end() {
    let parsed = parse(
        "UNITS-BORE INCH\n\
         UNITS-CO-ORDS MM\n\
         PIPELINE-REFERENCE P1\n\
         PIPE\n    \
         END-POINT 0 0 0 6\n    \
         END-POINT 1000 0 0 6\n",
    );
    let factory = ComponentFactory::new(&parsed);
    let solids = factory.build_all().unwrap();
    assert_eq!(solids.len(), 1);

    let built = &solids[0];
    assert_eq!(built.provenance.pipeline_reference, "P1");
    assert_eq!(built.provenance.component_type, "PIPE");
    assert!(std::ptr::eq(built.provenance.component, &parsed.pipelines[0].components[0]));

    let part = &built.solid.parts[0];
    match part.primitive {
        Primitive::Cylinder {
            radius_bottom,
            radius_top,
            height,
        } => {
            assert_relative_eq!(radius_bottom, 0.0762, epsilon = 1e-12);
            assert_relative_eq!(radius_top, 0.0762, epsilon = 1e-12);
            assert_relative_eq!(height, 1.0, epsilon = 1e-12);
        }
        ref other => panic!("expected cylinder, got {other:?}"),
    }
    assert_relative_eq!(part.placement.position, Point3::origin());
    assert_relative_eq!(part.placement.axis(), Vector3::x(), epsilon = 1e-12);
}

#[test]
fn fixture_builds_every_recognised_component() {
    let parsed = load_fixture();
    assert_eq!(parsed.pipeline_references(), vec!["CW-1001", "CW-1002"]);

    let factory = ComponentFactory::new(&parsed);
    let (solids, report) = factory.build_all_with_report().unwrap();

    // GASKET has no nominal, BEND has a malformed one.
    assert_eq!(report.total(), parsed.component_count());
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(solids.len(), parsed.component_count() - 2);
    let reasons: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.provenance.component_type, &s.reason))
        .collect();
    assert!(matches!(reasons[0], ("GASKET", BuildError::NoUsableKeypoints)));
    assert!(matches!(reasons[1], ("BEND", BuildError::MalformedNumeric { .. })));

    let names: Vec<&str> = solids.iter().map(|s| s.solid.name).collect();
    assert_eq!(
        names,
        vec![
            "Pipe", "Weld", "Flange", "Valve", "Bend", "Pipe", "Support", "Tee", "Reducer",
            "Cap", "Pipe", "Olet", "Support", "Placeholder", "Placeholder",
        ]
    );

    for built in &solids {
        assert!(built.solid.is_finite());
        assert!(built.solid.bounds().is_some(), "{} has no bounds", built.solid.name);
    }
}

#[test]
fn fixture_materials_attach_to_components() {
    let parsed = load_fixture();
    let first = &parsed.pipelines[0].components[0];
    let material = first.material.as_ref().expect("pipe has a material record");
    assert!(material.iter().any(|line| line.contains("A106-B")));
    // Weld has no item code
    assert!(parsed.pipelines[0].components[1].material.is_none());
}

#[test]
fn weld_between_pipe_and_flange_follows_pipe() {
    let parsed = load_fixture();
    let factory = ComponentFactory::new(&parsed);
    let weld = factory.build(0, 1).unwrap().unwrap();

    assert_eq!(weld.solid.form, SolidForm::Group);
    assert_relative_eq!(weld.solid.parts[0].placement.axis(), Vector3::x(), epsilon = 1e-12);
    assert_relative_eq!(
        weld.solid.parts[0].placement.position,
        Point3::new(2.0, 0.0, 0.0),
        epsilon = 1e-12
    );
}

#[test]
fn weld_prefers_straight_run_over_tee() {
    let parsed = parse(
        "PIPELINE-REFERENCE P\n\
         TEE\n    \
         END-POINT 0 -500 0 6\n    \
         END-POINT 0 0 0 6\n    \
         CENTRE-POINT 0 -250 0 6\n    \
         BRANCH1-POINT 250 -250 0 6\n\
         PIPE\n    \
         END-POINT 0 0 0 6\n    \
         END-POINT 0 0 1000 6\n\
         WELD\n    \
         END-POINT 0 0 0 6\n",
    );
    let factory = ComponentFactory::new(&parsed);
    let weld = factory.build(0, 2).unwrap().unwrap();
    assert_relative_eq!(weld.solid.parts[0].placement.axis(), Vector3::z(), epsilon = 1e-12);
}

#[test]
fn vertical_pipe_support_keeps_default_heading() {
    let parsed = load_fixture();
    let factory = ComponentFactory::new(&parsed);
    // Guide on the vertical CW-1002 pipe: the horizontal direction is +Z,
    // whose heading about Z is zero.
    let guide = factory.build(1, 2).unwrap().unwrap();
    let arm = &guide.solid.parts[0];
    match arm.primitive {
        Primitive::Segment { to, .. } => {
            let world = arm.placement.transform_point(&to);
            assert_relative_eq!(world.y, 3.4786, epsilon = 1e-9);
            assert!(world.x > 2.9786);
        }
        ref other => panic!("expected segment, got {other:?}"),
    }
}

#[test]
fn cap_with_coincident_ends_is_undersized_sphere() {
    let parsed = load_fixture();
    let factory = ComponentFactory::new(&parsed);
    let cap = factory.build(0, 9).unwrap().unwrap();
    match cap.solid.parts[0].primitive {
        Primitive::Sphere { radius } => {
            assert_relative_eq!(radius, 0.96 * 4.0 * 0.0254 / 2.0, epsilon = 1e-12)
        }
        ref other => panic!("expected sphere, got {other:?}"),
    }
}

#[test]
fn building_twice_gives_identical_solids() {
    let parsed = load_fixture();
    let factory = ComponentFactory::new(&parsed);
    let first = factory.build_all().unwrap();
    let second = factory.build_all().unwrap();
    let third = ComponentFactory::new(&parsed).build_all().unwrap();

    assert_eq!(first.len(), second.len());
    for ((a, b), c) in first.iter().zip(&second).zip(&third) {
        assert_eq!(a.solid, b.solid);
        assert_eq!(a.solid, c.solid);
        assert_eq!(a.provenance.id, b.provenance.id);
    }
}

#[test]
fn tessellation_skips_pick_volumes() {
    let parsed = load_fixture();
    let config = BuildConfig::default().with_radial_segments(12);
    let factory = ComponentFactory::with_config(&parsed, config.clone());
    let solids = factory.build_all().unwrap();

    let valve = solids.iter().find(|s| s.solid.name == "Valve").unwrap();
    assert!(valve
        .solid
        .parts
        .iter()
        .any(|p| p.role == PartRole::PickVolume));
    let mesh = valve.solid.to_mesh(&config);
    // Two cones, each: 24 side vertices plus two 13-vertex caps
    assert_eq!(mesh.vertex_count(), 2 * (24 + 13 + 13));

    let weld = solids.iter().find(|s| s.solid.name == "Weld").unwrap();
    assert!(weld.solid.to_mesh(&config).is_empty());
    // Four arms plus a 12-segment ring
    assert_eq!(weld.solid.line_segments(&config).segment_count(), 16);

    let bend = solids.iter().find(|s| s.solid.name == "Bend").unwrap();
    let mesh = bend.solid.to_mesh(&config);
    assert_eq!(mesh.vertex_count(), 21 * 12 + 2 * 13);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
}
