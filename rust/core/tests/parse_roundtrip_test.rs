// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use pcf_lite_core::{parse, ComponentKind, KeypointKind};
use std::fmt::Write;

const TYPES: [&str; 4] = ["PIPE", "TEE", "VALVE", "WELD"];

/// Keypoint kinds cycled through a component's field lines
fn kind_for(k: usize) -> &'static str {
    ["END-POINT", "END-POINT", "CENTRE-POINT", "BRANCH1-POINT", "CO-ORDS"][k % 5]
}

/// N pipelines, M components each, K keypoint lines per component.
fn generate(n: usize, m: usize, k: usize) -> String {
    let mut text = String::from("UNITS-BORE MM\nUNITS-CO-ORDS MM\n");
    for p in 0..n {
        writeln!(text, "PIPELINE-REFERENCE LINE-{p}").unwrap();
        writeln!(text, "    PIPING-SPEC S{p}").unwrap();
        for c in 0..m {
            writeln!(text, "{}", TYPES[c % TYPES.len()]).unwrap();
            for i in 0..k {
                writeln!(text, "    {} {p} {c} {i} 150", kind_for(i)).unwrap();
            }
            writeln!(text, "    ITEM-CODE CODE-{c}").unwrap();
        }
    }
    text.push_str("MATERIALS\nITEM-CODE CODE-0\n    DESCRIPTION FIRST\n");
    text
}

#[test]
fn parse_preserves_structure() {
    for (n, m, k) in [(1, 1, 1), (3, 4, 2), (2, 5, 7), (4, 0, 0)] {
        let parsed = parse(&generate(n, m, k));
        assert_eq!(parsed.pipelines.len(), n, "pipelines for {n}x{m}x{k}");

        for (p, pipeline) in parsed.pipelines.iter().enumerate() {
            assert_eq!(pipeline.reference, format!("LINE-{p}"));
            assert_eq!(pipeline.attributes["PIPING-SPEC"], format!("S{p}"));
            assert_eq!(pipeline.components.len(), m);

            for (c, component) in pipeline.components.iter().enumerate() {
                assert_eq!(component.type_name, TYPES[c % TYPES.len()]);
                assert_eq!(component.geometry.keypoint_count(), k);
                assert_eq!(component.item_code.as_deref(), Some(format!("CODE-{c}").as_str()));
                assert_eq!(component.material.is_some(), c == 0);

                // Keypoints keep file order within each kind.
                for (kind, points) in component.geometry.iter() {
                    let expected: Vec<usize> = (0..k)
                        .filter(|&i| KeypointKind::from_key(kind_for(i)).as_ref() == Some(kind))
                        .collect();
                    assert_eq!(points.len(), expected.len());
                    for (point, i) in points.iter().zip(expected) {
                        let coords = point.raw_coords().unwrap();
                        assert_eq!(coords, [p as f64, c as f64, i as f64]);
                        assert_relative_eq!(point.nominal().unwrap(), 150.0);
                    }
                }
            }
        }
    }
}

#[test]
fn units_default_and_scale() {
    let bare = parse("PIPELINE-REFERENCE A\nPIPE\n    END-POINT 0 0 0 1\n");
    assert_eq!(bare.units.bore_scale, 1.0);
    assert_eq!(bare.units.coord_scale, 1.0);

    let mm = parse("UNITS-CO-ORDS MM\nPIPELINE-REFERENCE A\n");
    assert_relative_eq!(mm.units.coord_scale, 0.001);
    assert_eq!(mm.units.bore_scale, 1.0);
}

#[test]
fn component_types_and_kinds() {
    let parsed = parse(&generate(2, 6, 1));
    assert_eq!(parsed.component_types(), vec!["PIPE", "TEE", "VALVE", "WELD"]);
    let kinds: Vec<ComponentKind> = parsed.pipelines[0]
        .components
        .iter()
        .map(|c| c.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            ComponentKind::Pipe,
            ComponentKind::Tee,
            ComponentKind::Valve,
            ComponentKind::Weld,
            ComponentKind::Pipe,
            ComponentKind::Tee,
        ]
    );
}
