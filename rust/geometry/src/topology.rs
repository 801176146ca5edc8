// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keypoint topology across all pipelines
//!
//! Components that carry no direction of their own (welds, supports)
//! borrow it from their neighbours. [`TopologyResolver`] indexes every
//! external keypoint by exact raw coordinates and keeps the list of pipe
//! segments for nearest-pipe queries. All queries here work in raw file
//! units, before unit scaling.

use nalgebra::{Point3, Vector3};
use pcf_lite_core::{Component, ComponentKind, Field, KeypointKind, Pipeline, Units};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::transform::horizontal_direction;

/// Position of a component within a parse result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId {
    pub pipeline: usize,
    pub component: usize,
}

impl ComponentId {
    pub fn new(pipeline: usize, component: usize) -> Self {
        Self {
            pipeline,
            component,
        }
    }
}

/// Exact-equality key for raw coordinates. Negative zero folds onto zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordKey([u64; 3]);

impl CoordKey {
    pub fn new(coords: [f64; 3]) -> Self {
        Self(coords.map(|c| if c == 0.0 { 0.0f64.to_bits() } else { c.to_bits() }))
    }
}

/// Straight pipe between its two end points, raw units
#[derive(Debug, Clone)]
struct PipeSegment {
    id: ComponentId,
    start: Point3<f64>,
    end: Point3<f64>,
    nominal: Field,
}

/// Pipe found by [`TopologyResolver::nearest_pipe`]
#[derive(Debug, Clone, PartialEq)]
pub struct PipeMatch {
    pub id: ComponentId,
    /// Distance from the query point to the pipe axis, raw units
    pub distance: f64,
    /// Unnormalized start-to-end vector of the pipe
    pub direction: Vector3<f64>,
    /// Nominal diameter of the pipe's first end point
    pub nominal: Field,
}

/// Read-only index over the keypoints of every pipeline
pub struct TopologyResolver<'a> {
    pipelines: &'a [Pipeline],
    by_coord: FxHashMap<CoordKey, SmallVec<[ComponentId; 4]>>,
    pipes: Vec<PipeSegment>,
}

impl<'a> TopologyResolver<'a> {
    /// Index all external keypoints and pipe segments.
    pub fn new(pipelines: &'a [Pipeline]) -> Self {
        let mut by_coord: FxHashMap<CoordKey, SmallVec<[ComponentId; 4]>> = FxHashMap::default();
        let mut pipes = Vec::new();

        for (pi, pipeline) in pipelines.iter().enumerate() {
            for (ci, component) in pipeline.components.iter().enumerate() {
                let id = ComponentId::new(pi, ci);

                let external = component
                    .geometry
                    .iter()
                    .filter(|(kind, _)| kind.is_external())
                    .flat_map(|(_, points)| points.iter());
                for keypoint in external {
                    let Ok(coords) = keypoint.raw_coords() else {
                        continue;
                    };
                    let bucket = by_coord.entry(CoordKey::new(coords)).or_default();
                    if !bucket.contains(&id) {
                        bucket.push(id);
                    }
                }

                if let Some(segment) = pipe_segment(id, component) {
                    pipes.push(segment);
                }
            }
        }

        debug!(
            coordinates = by_coord.len(),
            pipes = pipes.len(),
            "Indexed keypoint topology"
        );

        Self {
            pipelines,
            by_coord,
            pipes,
        }
    }

    pub fn component(&self, id: ComponentId) -> Option<&'a Component> {
        self.pipelines.get(id.pipeline)?.components.get(id.component)
    }

    /// Components with an external keypoint exactly at `coords`, in parse order.
    pub fn neighbours(&self, coords: [f64; 3]) -> &[ComponentId] {
        self.by_coord
            .get(&CoordKey::new(coords))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Direction of a straight two-ended run touching `coords`
    ///
    /// Candidates are components sharing an external keypoint at exactly
    /// `coords`, other than `exclude`. Only a component whose geometry is
    /// exactly two `END-POINT`s with no internal keypoints qualifies; the
    /// first one in parse order with distinct, well-formed ends wins.
    pub fn direction_at_shared_keypoint(
        &self,
        coords: [f64; 3],
        exclude: Option<ComponentId>,
    ) -> Option<Vector3<f64>> {
        let candidates = self.neighbours(coords);
        let found = candidates
            .iter()
            .filter(|id| Some(**id) != exclude)
            .filter_map(|id| self.component(*id))
            .filter(|component| component.geometry.is_straight_run())
            .find_map(|component| {
                let ends = component.geometry.get(&KeypointKind::End);
                let start = ends[0].raw_coords().ok()?;
                let end = ends[1].raw_coords().ok()?;
                let v = Point3::from(end) - Point3::from(start);
                (v.norm_squared() > 0.0).then(|| v.normalize())
            });

        if found.is_none() {
            trace!(
                candidates = candidates.len(),
                "No straight run at shared keypoint"
            );
        }
        found
    }

    /// Closest pipe whose axis passes within `tolerance` of `coords`
    ///
    /// The point is projected onto each pipe's segment, clamped to the
    /// ends. Ties keep the earlier pipe.
    pub fn nearest_pipe(&self, coords: [f64; 3], tolerance: f64) -> Option<PipeMatch> {
        let point = Point3::from(coords);
        let mut best: Option<(f64, &PipeSegment)> = None;

        for pipe in &self.pipes {
            let axis = pipe.end - pipe.start;
            let t = ((point - pipe.start).dot(&axis) / axis.norm_squared()).clamp(0.0, 1.0);
            let distance = (pipe.start + axis * t - point).norm();
            if distance <= tolerance && best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, pipe));
            }
        }

        best.map(|(distance, pipe)| PipeMatch {
            id: pipe.id,
            distance,
            direction: pipe.end - pipe.start,
            nominal: pipe.nominal.clone(),
        })
    }

    /// Radius (meters) of the pipe passing through `coords`
    ///
    /// Falls back to one coordinate unit when no pipe is near or its
    /// nominal diameter is unusable.
    pub fn pipe_radius_at(&self, coords: [f64; 3], units: &Units, tolerance: f64) -> f64 {
        match self.nearest_pipe(coords, tolerance).map(|m| m.nominal) {
            Some(Ok(nominal)) => nominal * units.bore_scale / 2.0,
            _ => {
                debug!(?coords, "No pipe radius at point, using fallback");
                units.coord_scale
            }
        }
    }

    /// Horizontal direction of the pipe passing through `coords`
    ///
    /// A vertical pipe yields +Z. `None` when no pipe is near.
    pub fn pipe_direction_at(&self, coords: [f64; 3], tolerance: f64) -> Option<Vector3<f64>> {
        self.nearest_pipe(coords, tolerance)
            .map(|m| horizontal_direction(&m.direction))
    }
}

fn pipe_segment(id: ComponentId, component: &Component) -> Option<PipeSegment> {
    if component.kind != ComponentKind::Pipe {
        return None;
    }
    let ends = component.geometry.get(&KeypointKind::End);
    if ends.len() != 2 {
        return None;
    }
    let start = Point3::from(ends[0].raw_coords().ok()?);
    let end = Point3::from(ends[1].raw_coords().ok()?);
    if start == end {
        return None;
    }
    Some(PipeSegment {
        id,
        start,
        end,
        nominal: ends[0].nominal(),
    })
}
