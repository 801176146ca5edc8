// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PCF parser
//!
//! Line-driven state machine that splits a PCF file into its header,
//! pipeline and material sections and decodes pipelines into components
//! and keypoints. The parser is permissive: it never fails, it only
//! records what it could decode.

use std::sync::Arc;

use crate::materials::MaterialCatalog;
use crate::model::{Component, Keypoint, KeypointKind, ParseResult, Pipeline};
use crate::units::resolve_units;

const PIPELINE_REFERENCE: &str = "PIPELINE-REFERENCE";
const MATERIALS: &str = "MATERIALS";

/// Parse PCF text in one call.
pub fn parse(text: &str) -> ParseResult {
    PcfParser::new(text).parse()
}

/// PCF parser over decoded text
pub struct PcfParser<'a> {
    lines: Vec<&'a str>,
}

impl<'a> PcfParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
        }
    }

    /// Split the input into sections and decode each one.
    pub fn parse(&self) -> ParseResult {
        let total = self.lines.len();

        let materials_start = self
            .lines
            .iter()
            .position(|l| is_materials_marker(l))
            .unwrap_or(total);
        let units_end = self.lines[..materials_start]
            .iter()
            .position(|l| {
                l.trim()
                    .get(..PIPELINE_REFERENCE.len())
                    .is_some_and(|p| p.eq_ignore_ascii_case(PIPELINE_REFERENCE))
            })
            .unwrap_or(materials_start);

        tracing::debug!(
            lines = total,
            header = units_end,
            pipelines = materials_start - units_end,
            materials = total - materials_start,
            "Split PCF sections"
        );

        let units = resolve_units(self.lines[..units_end].iter().copied());
        let materials = MaterialCatalog::from_lines(
            self.lines
                .get(materials_start + 1..)
                .unwrap_or(&[])
                .iter()
                .copied(),
        );
        let pipelines = PipelineReader::new(&materials)
            .read(self.lines[units_end..materials_start].iter().copied());

        tracing::debug!(
            pipelines = pipelines.len(),
            components = pipelines.iter().map(|p| p.components.len()).sum::<usize>(),
            materials = materials.len(),
            "Parsed PCF"
        );

        ParseResult {
            units,
            pipelines,
            materials,
        }
    }
}

/// Where the reader is within the pipeline region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    OutsidePipeline,
    PipelineHeader,
    Components,
}

struct PipelineReader<'m> {
    materials: &'m MaterialCatalog,
    state: State,
    pipelines: Vec<Pipeline>,
    pipeline: Option<Pipeline>,
    header: Vec<String>,
    component: Option<Component>,
}

impl<'m> PipelineReader<'m> {
    fn new(materials: &'m MaterialCatalog) -> Self {
        Self {
            materials,
            state: State::OutsidePipeline,
            pipelines: Vec::new(),
            pipeline: None,
            header: Vec::new(),
            component: None,
        }
    }

    fn read<'a, I>(mut self, lines: I) -> Vec<Pipeline>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for raw in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case(MATERIALS) {
                break;
            }

            if starts_pipeline(raw) {
                self.finish_pipeline();
                let reference = line[PIPELINE_REFERENCE.len()..].trim();
                tracing::trace!(%reference, "Pipeline");
                self.pipeline = Some(Pipeline::new(reference));
                self.header = vec![raw.to_string()];
                self.state = State::PipelineHeader;
                continue;
            }

            match self.state {
                State::OutsidePipeline => continue,
                State::PipelineHeader if is_indented(raw) => {
                    self.header.push(raw.to_string());
                    self.add_attribute(line);
                    continue;
                }
                State::PipelineHeader => {
                    self.complete_header();
                    self.state = State::Components;
                }
                State::Components => {}
            }

            if !is_indented(raw) {
                self.flush_component();
                let type_name = line.split_whitespace().next().unwrap_or_default();
                self.component = Some(Component::new(type_name, raw));
            } else if let Some(component) = self.component.as_mut() {
                decode_field(component, raw, line);
            } else {
                self.add_attribute(line);
            }
        }

        self.finish_pipeline();
        self.pipelines
    }

    fn add_attribute(&mut self, line: &str) {
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };
        let mut tokens = line.split_whitespace();
        if let Some(name) = tokens.next() {
            let value = tokens.collect::<Vec<_>>().join(" ");
            pipeline.attributes.insert(name.to_string(), value);
        }
    }

    /// Freeze the header text so components can share it.
    fn complete_header(&mut self) {
        if let Some(pipeline) = self.pipeline.as_mut() {
            pipeline.header_lines = Arc::from(std::mem::take(&mut self.header));
        }
    }

    /// Close out the current component: attach material and header, push it.
    fn flush_component(&mut self) {
        let Some(mut component) = self.component.take() else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_mut() else {
            return;
        };

        component.pipeline_header = Arc::clone(&pipeline.header_lines);
        if let Some(code) = component.item_code.as_deref() {
            component.material = self.materials.get(code).cloned();
            if component.material.is_none() {
                tracing::debug!(
                    pipeline = %pipeline.reference,
                    %code,
                    "No material record for item code"
                );
            }
        }
        pipeline.components.push(component);
    }

    fn finish_pipeline(&mut self) {
        if self.state == State::PipelineHeader {
            self.complete_header();
        }
        self.flush_component();
        if let Some(pipeline) = self.pipeline.take() {
            tracing::trace!(
                reference = %pipeline.reference,
                components = pipeline.components.len(),
                "Pipeline complete"
            );
            self.pipelines.push(pipeline);
        }
        self.header.clear();
        self.state = State::OutsidePipeline;
    }
}

/// Decode one indented field line into the component.
fn decode_field(component: &mut Component, raw: &str, line: &str) {
    let mut tokens = line.split_whitespace();
    let key = tokens.next().unwrap_or_default();

    if key.eq_ignore_ascii_case("ITEM-CODE") {
        component.item_code = tokens.next().map(str::to_string);
    } else if key.eq_ignore_ascii_case("SKEY") {
        component.skey = tokens.next().map(str::to_string);
    } else if let Some(kind) = KeypointKind::from_key(key) {
        component.geometry.push(kind, Keypoint::from_tokens(tokens));
    }
    component.raw_lines.push(raw.to_string());
}

#[inline]
fn is_indented(raw: &str) -> bool {
    raw.starts_with([' ', '\t'])
}

/// `PIPELINE-REFERENCE` only counts at column 0.
#[inline]
fn starts_pipeline(raw: &str) -> bool {
    raw.get(..PIPELINE_REFERENCE.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(PIPELINE_REFERENCE))
}

#[inline]
fn is_materials_marker(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(MATERIALS)
}
