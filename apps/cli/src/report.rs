// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable views of built solids.

use pcf_lite_geometry::{
    Aabb, BuildConfig, BuildReport, ComponentSolid, Part, PartRole, Point3, Primitive, SolidForm,
    Vector3,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct Document<'a> {
    pub pipelines: Vec<&'a str>,
    pub solids: Vec<SolidView<'a>>,
    pub skipped: Vec<SkipView<'a>>,
}

#[derive(Serialize)]
pub struct SolidView<'a> {
    pub pipeline: &'a str,
    pub component_type: &'a str,
    pub index: usize,
    pub name: &'static str,
    pub form: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<&'a str>,
    pub parts: Vec<PartView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[[f64; 3]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshStats>,
}

#[derive(Serialize)]
pub struct PartView {
    pub role: &'static str,
    pub position: [f64; 3],
    pub axis: [f64; 3],
    #[serde(flatten)]
    pub primitive: PrimitiveView,
}

#[derive(Serialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum PrimitiveView {
    Cylinder {
        radius_bottom: f64,
        radius_top: f64,
        height: f64,
    },
    Sphere {
        radius: f64,
    },
    Disc {
        radius: f64,
    },
    SweptTube {
        start: [f64; 3],
        control: [f64; 3],
        end: [f64; 3],
        radius: f64,
    },
    Segment {
        from: [f64; 3],
        to: [f64; 3],
    },
    Ring {
        radius: f64,
    },
}

#[derive(Serialize)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub line_segments: usize,
}

#[derive(Serialize)]
pub struct SkipView<'a> {
    pub pipeline: &'a str,
    pub component_type: &'a str,
    pub index: usize,
    pub reason: String,
}

fn point(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn vector(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

fn role(role: PartRole) -> &'static str {
    match role {
        PartRole::Body => "body",
        PartRole::Cap => "cap",
        PartRole::Symbol => "symbol",
        PartRole::PickVolume => "pick_volume",
    }
}

fn form(form: SolidForm) -> &'static str {
    match form {
        SolidForm::Single => "single",
        SolidForm::Merged => "merged",
        SolidForm::Group => "group",
    }
}

impl From<&Primitive> for PrimitiveView {
    fn from(primitive: &Primitive) -> Self {
        match *primitive {
            Primitive::Cylinder {
                radius_bottom,
                radius_top,
                height,
            } => PrimitiveView::Cylinder {
                radius_bottom,
                radius_top,
                height,
            },
            Primitive::Sphere { radius } => PrimitiveView::Sphere { radius },
            Primitive::Disc { radius } => PrimitiveView::Disc { radius },
            Primitive::SweptTube {
                start,
                control,
                end,
                radius,
            } => PrimitiveView::SweptTube {
                start: point(&start),
                control: point(&control),
                end: point(&end),
                radius,
            },
            Primitive::Segment { from, to } => PrimitiveView::Segment {
                from: point(&from),
                to: point(&to),
            },
            Primitive::Ring { radius } => PrimitiveView::Ring { radius },
        }
    }
}

impl From<&Part> for PartView {
    fn from(part: &Part) -> Self {
        PartView {
            role: role(part.role),
            position: point(&part.placement.position),
            axis: vector(&part.placement.axis()),
            primitive: PrimitiveView::from(&part.primitive),
        }
    }
}

impl<'a> SolidView<'a> {
    pub fn new(built: &ComponentSolid<'a>, tessellate: Option<&BuildConfig>) -> Self {
        let solid = &built.solid;
        let provenance = &built.provenance;
        SolidView {
            pipeline: provenance.pipeline_reference,
            component_type: provenance.component_type,
            index: provenance.id.component,
            name: solid.name,
            form: form(solid.form),
            item_code: provenance.component.item_code.as_deref(),
            parts: solid.parts.iter().map(PartView::from).collect(),
            bounds: solid
                .bounds()
                .map(|Aabb { min, max }| [point(&min), point(&max)]),
            mesh: tessellate.map(|config| {
                let mesh = solid.to_mesh(config);
                MeshStats {
                    vertices: mesh.vertex_count(),
                    triangles: mesh.triangle_count(),
                    line_segments: solid.line_segments(config).segment_count(),
                }
            }),
        }
    }
}

pub fn skipped<'a>(report: &BuildReport<'a>) -> Vec<SkipView<'a>> {
    report
        .skipped
        .iter()
        .map(|skip| SkipView {
            pipeline: skip.provenance.pipeline_reference,
            component_type: skip.provenance.component_type,
            index: skip.provenance.id.component,
            reason: skip.reason.to_string(),
        })
        .collect()
}
