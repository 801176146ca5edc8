// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconstruction tunables

/// Proportions and tessellation density used by the builders
///
/// Ratios are relative to the component's pipe radius unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Radial segments for cylinders, discs, rings and spheres
    pub radial_segments: usize,
    /// Segments along a bend's centerline curve
    pub tube_segments: usize,
    /// Flange radius over pipe radius
    pub flange_oversize: f64,
    /// Sphere radius factor for point-like caps and placeholders
    pub sphere_shrink: f64,
    /// Valve cone tip radius over pipe radius
    pub valve_tip_ratio: f64,
    /// Weld cross arm length over pipe radius
    pub weld_arm_ratio: f64,
    /// Weld ring radius over pipe radius
    pub weld_ring_ratio: f64,
    /// Weld pick volume thickness over pipe radius
    pub weld_pick_thickness: f64,
    /// Support symbol half-extent over the nearby pipe radius
    pub support_symbol_scale: f64,
    /// Distance (raw file units) within which a point lies on a pipe
    pub topology_tolerance: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            radial_segments: 32,
            tube_segments: 20,
            flange_oversize: 1.4,
            sphere_shrink: 0.96,
            valve_tip_ratio: 0.25,
            weld_arm_ratio: 1.5,
            weld_ring_ratio: 0.8,
            weld_pick_thickness: 0.1,
            support_symbol_scale: 4.0,
            topology_tolerance: 0.01,
        }
    }
}

impl BuildConfig {
    pub fn with_radial_segments(mut self, segments: usize) -> Self {
        self.radial_segments = segments.max(3);
        self
    }

    pub fn with_topology_tolerance(mut self, tolerance: f64) -> Self {
        self.topology_tolerance = tolerance;
        self
    }
}
