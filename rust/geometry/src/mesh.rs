// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render-ready buffers produced from solid descriptions

use nalgebra::{Point3, Vector3};

/// Triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with normal, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        index
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    /// Merge another mesh into this one
    pub fn merge(&mut self, other: &Mesh) {
        if other.is_empty() {
            return;
        }
        let vertex_offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + vertex_offset));
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Axis-aligned bounds of the vertices, `None` when empty
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        if self.is_empty() {
            return None;
        }
        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for chunk in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                min[axis] = min[axis].min(chunk[axis]);
                max[axis] = max[axis].max(chunk[axis]);
            }
        }
        Some((min, max))
    }
}

/// Line-segment buffer for symbolic parts (weld crosses, support axes)
#[derive(Debug, Clone, Default)]
pub struct LineSet {
    /// Segment endpoints, two points (six floats) per segment
    pub positions: Vec<f32>,
}

impl LineSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_segment(&mut self, from: Point3<f64>, to: Point3<f64>) {
        self.positions.extend_from_slice(&[
            from.x as f32,
            from.y as f32,
            from.z as f32,
            to.x as f32,
            to.y as f32,
            to.z as f32,
        ]);
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
