// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsed PCF data model
//!
//! Pipelines own their components; components own their keypoints. Nothing
//! here is mutated once [`crate::PcfParser::parse`] returns.

use std::borrow::Cow;
use std::sync::Arc;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map, map_res, value},
    sequence::delimited,
    IResult,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{parse_field, Field, FieldError};
use crate::materials::MaterialCatalog;
use crate::units::Units;

/// Named keypoint kinds found on component field lines
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KeypointKind {
    /// `END-POINT`: connection to the previous/next component
    End,
    /// `BRANCH<N>-POINT`: branch connection, carrying N
    Branch(u32),
    /// `PORT-POINT`: equipment or nozzle connection
    Port,
    /// `CENTRE-POINT`: local reference for bends, tees and valves
    Centre,
    /// `CO-ORDS`: free-standing position (supports, instruments)
    CoOrds,
    /// Any other `*-POINT` key, kept upper-cased
    Other(String),
}

fn branch_point(input: &str) -> IResult<&str, KeypointKind> {
    map(
        delimited(
            tag("BRANCH"),
            map_res(digit1, |s: &str| s.parse::<u32>()),
            tag("-POINT"),
        ),
        KeypointKind::Branch,
    )(input)
}

fn known_keypoint(input: &str) -> IResult<&str, KeypointKind> {
    alt((
        value(KeypointKind::End, tag("END-POINT")),
        branch_point,
        value(KeypointKind::Port, tag("PORT-POINT")),
        value(KeypointKind::Centre, tag("CENTRE-POINT")),
        value(KeypointKind::CoOrds, tag("CO-ORDS")),
    ))(input)
}

impl KeypointKind {
    /// Classify a field key. Returns `None` for keys that are not keypoints.
    pub fn from_key(key: &str) -> Option<Self> {
        let upper = key.to_ascii_uppercase();
        if let Ok((_, kind)) = all_consuming(known_keypoint)(upper.as_str()) {
            return Some(kind);
        }
        if upper.ends_with("-POINT") {
            return Some(KeypointKind::Other(upper));
        }
        None
    }

    /// External keypoints mark physical connections to neighbours.
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            KeypointKind::End | KeypointKind::Branch(_) | KeypointKind::Port
        )
    }

    /// Internal keypoints only shape the component itself.
    #[inline]
    pub fn is_internal(&self) -> bool {
        matches!(self, KeypointKind::Centre | KeypointKind::CoOrds)
    }

    /// The PCF key this kind was read from.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            KeypointKind::End => Cow::Borrowed("END-POINT"),
            KeypointKind::Branch(n) => Cow::Owned(format!("BRANCH{n}-POINT")),
            KeypointKind::Port => Cow::Borrowed("PORT-POINT"),
            KeypointKind::Centre => Cow::Borrowed("CENTRE-POINT"),
            KeypointKind::CoOrds => Cow::Borrowed("CO-ORDS"),
            KeypointKind::Other(key) => Cow::Borrowed(key.as_str()),
        }
    }
}

impl std::fmt::Display for KeypointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// One keypoint line: three raw coordinates and an optional nominal bore
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Keypoint {
    /// Raw (unscaled) coordinates
    pub coords: [Field; 3],
    /// Fourth numeric token, if the line had one
    pub nominal: Option<Field>,
}

impl Keypoint {
    /// Build a keypoint from the value tokens following the key.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let mut next = || tokens.next().map(parse_field);
        let coords = [
            next().unwrap_or(Err(FieldError::Missing)),
            next().unwrap_or(Err(FieldError::Missing)),
            next().unwrap_or(Err(FieldError::Missing)),
        ];
        let nominal = next();
        Self { coords, nominal }
    }

    /// Create a keypoint from known-good values.
    pub fn new(coords: [f64; 3], nominal: Option<f64>) -> Self {
        Self {
            coords: coords.map(Ok),
            nominal: nominal.map(Ok),
        }
    }

    /// All three raw coordinates, or the first coordinate error.
    #[inline]
    pub fn raw_coords(&self) -> Result<[f64; 3], FieldError> {
        let [x, y, z] = &self.coords;
        Ok([x.clone()?, y.clone()?, z.clone()?])
    }

    /// The nominal bore, treating an absent token as [`FieldError::Missing`].
    #[inline]
    pub fn nominal(&self) -> Field {
        self.nominal.clone().unwrap_or(Err(FieldError::Missing))
    }
}

/// Keypoints of one component, grouped by kind in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Geometry {
    entries: Vec<(KeypointKind, SmallVec<[Keypoint; 2]>)>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keypoint under its kind.
    pub fn push(&mut self, kind: KeypointKind, keypoint: Keypoint) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, points)) => points.push(keypoint),
            None => {
                let mut points = SmallVec::new();
                points.push(keypoint);
                self.entries.push((kind, points));
            }
        }
    }

    /// Keypoints of one kind, empty if none were parsed.
    pub fn get(&self, kind: &KeypointKind) -> &[Keypoint] {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, points)| points.as_slice())
            .unwrap_or(&[])
    }

    /// First keypoint of one kind.
    #[inline]
    pub fn first(&self, kind: &KeypointKind) -> Option<&Keypoint> {
        self.get(kind).first()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeypointKind, &[Keypoint])> {
        self.entries.iter().map(|(k, points)| (k, points.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of keypoints across all kinds.
    pub fn keypoint_count(&self) -> usize {
        self.entries.iter().map(|(_, points)| points.len()).sum()
    }

    pub fn has_internal(&self) -> bool {
        self.entries.iter().any(|(k, _)| k.is_internal())
    }

    /// True when the only external kind is exactly two `END-POINT`s and
    /// there are no internal keypoints: a straight two-ended run.
    pub fn is_straight_run(&self) -> bool {
        let mut external = self.entries.iter().filter(|(k, _)| k.is_external());
        let only_ends = matches!(
            (external.next(), external.next()),
            (Some((KeypointKind::End, points)), None) if points.len() == 2
        );
        only_ends && !self.has_internal()
    }
}

/// Component categories with a dedicated solid builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ComponentKind {
    Pipe,
    Bend,
    Reducer,
    Tee,
    Flange,
    Cap,
    Olet,
    Valve,
    Weld,
    Support,
    Unrecognized,
}

impl ComponentKind {
    /// Map a normalised (upper-case) type string onto a kind.
    pub fn from_type(type_name: &str) -> Self {
        match type_name {
            "PIPE" => ComponentKind::Pipe,
            "ELBOW" | "BEND" => ComponentKind::Bend,
            "REDUCER-CONCENTRIC" | "REDUCER-ECCENTRIC" => ComponentKind::Reducer,
            "TEE" => ComponentKind::Tee,
            "FLANGE" => ComponentKind::Flange,
            "CAP" => ComponentKind::Cap,
            "OLET" => ComponentKind::Olet,
            "VALVE" => ComponentKind::Valve,
            "WELD" => ComponentKind::Weld,
            "SUPPORT" => ComponentKind::Support,
            _ => ComponentKind::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Pipe => "Pipe",
            ComponentKind::Bend => "Bend",
            ComponentKind::Reducer => "Reducer",
            ComponentKind::Tee => "Tee",
            ComponentKind::Flange => "Flange",
            ComponentKind::Cap => "Cap",
            ComponentKind::Olet => "Olet",
            ComponentKind::Valve => "Valve",
            ComponentKind::Weld => "Weld",
            ComponentKind::Support => "Support",
            ComponentKind::Unrecognized => "Unrecognized",
        }
    }
}

/// Support sub-kinds decoded from `SKEY`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SupportKind {
    Anchor,
    Guide,
    Skid,
    Spring,
    Hanger,
    Other(String),
}

impl SupportKind {
    pub fn from_skey(skey: &str) -> Self {
        match skey.to_ascii_uppercase().as_str() {
            "ANCH" => SupportKind::Anchor,
            "GUID" => SupportKind::Guide,
            "SKID" => SupportKind::Skid,
            "SPRG" => SupportKind::Spring,
            "HANG" => SupportKind::Hanger,
            other => SupportKind::Other(other.to_string()),
        }
    }

    /// Sub-kinds drawn with the cross-and-arrowhead symbol.
    #[inline]
    pub fn has_symbol(&self) -> bool {
        !matches!(self, SupportKind::Other(_))
    }
}

/// One typed entry within a pipeline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Component {
    /// Upper-cased first token of the component header
    pub type_name: String,
    pub kind: ComponentKind,
    pub skey: Option<String>,
    pub item_code: Option<String>,
    pub geometry: Geometry,
    /// Header line plus every field line, verbatim
    pub raw_lines: Vec<String>,
    /// Catalog lines for `item_code`, when the catalog has them
    pub material: Option<Arc<[String]>>,
    /// Raw header text of the owning pipeline
    pub pipeline_header: Arc<[String]>,
}

impl Component {
    /// Start a component from its header line.
    pub fn new(type_name: &str, header_line: &str) -> Self {
        let type_name = type_name.to_ascii_uppercase();
        Self {
            kind: ComponentKind::from_type(&type_name),
            type_name,
            skey: None,
            item_code: None,
            geometry: Geometry::new(),
            raw_lines: vec![header_line.to_string()],
            material: None,
            pipeline_header: Arc::from(Vec::new()),
        }
    }

    /// Support sub-kind, if an `SKEY` was given.
    pub fn support_kind(&self) -> Option<SupportKind> {
        self.skey.as_deref().map(SupportKind::from_skey)
    }
}

/// One `PIPELINE-REFERENCE` section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pipeline {
    pub reference: String,
    pub attributes: FxHashMap<String, String>,
    /// `PIPELINE-REFERENCE` line and its indented continuation lines
    pub header_lines: Arc<[String]>,
    pub components: Vec<Component>,
}

impl Pipeline {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            attributes: FxHashMap::default(),
            header_lines: Arc::from(Vec::new()),
            components: Vec::new(),
        }
    }
}

/// Everything a parse produces; read-only thereafter
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseResult {
    pub units: Units,
    pub pipelines: Vec<Pipeline>,
    pub materials: MaterialCatalog,
}

impl ParseResult {
    /// Pipeline references in file order.
    pub fn pipeline_references(&self) -> Vec<&str> {
        self.pipelines.iter().map(|p| p.reference.as_str()).collect()
    }

    /// Distinct component type strings in first-seen order.
    pub fn component_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for component in self.components() {
            if !types.contains(&component.type_name.as_str()) {
                types.push(&component.type_name);
            }
        }
        types
    }

    /// Every component of every pipeline in parse order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.pipelines.iter().flat_map(|p| p.components.iter())
    }

    pub fn component_count(&self) -> usize {
        self.pipelines.iter().map(|p| p.components.len()).sum()
    }
}
