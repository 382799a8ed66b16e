//! 3D terrain renderer: a heightfield mesh deformed and colored by risk.
//!
//! The mesh is a `(segments+1) x (segments+1)` vertex grid over a square
//! plane. Base hills are procedural; applying a risk grid adds a
//! risk-proportional vertical offset per vertex and assigns a per-vertex
//! ramp color, after which vertex normals are recomputed for lighting.

use crate::color::{color_at, Rgb};
use crate::core_types::{RiskGrid, Vec3};
use crate::geo::plane_to_grid;
use rand::Rng;

/// Vertical exaggeration applied to risk when deforming the mesh.
const RISK_HEIGHT_SCALE: f32 = 3.0;

/// Heightfield mesh with per-vertex color and normals, mutated in place.
#[derive(Debug)]
pub struct TerrainRenderer {
    plane_size: f32,
    /// Vertices per side (`segments + 1`).
    vertices_per_side: usize,
    base_heights: Vec<f32>,
    heights: Vec<f32>,
    colors: Vec<Rgb>,
    normals: Vec<Vec3>,
}

impl TerrainRenderer {
    /// Reference mesh: a 64-unit plane with 63 segments.
    pub const DEFAULT_PLANE_SIZE: f32 = 64.0;
    pub const DEFAULT_SEGMENTS: usize = 63;

    /// Build the base terrain with procedural hills.
    pub fn new(plane_size: f32, segments: usize) -> Self {
        let n = segments + 1;
        let mut rng = rand::rng();
        let mut base_heights = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                let (x, z) = Self::vertex_xz(plane_size, n, i, j);
                let mut height = (x * 0.1).sin() * (z * 0.1).cos() * 3.0;
                height += (x * 0.2 + 1.0).sin() * (z * 0.15).cos() * 2.0;
                height += rng.random::<f32>() * 0.5;
                base_heights.push(height);
            }
        }
        let heights = base_heights.clone();
        let mut terrain = TerrainRenderer {
            plane_size,
            vertices_per_side: n,
            base_heights,
            heights,
            colors: vec![Rgb::new(34, 139, 34); n * n],
            normals: vec![Vec3::new(0.0, 1.0, 0.0); n * n],
        };
        terrain.recompute_normals();
        terrain
    }

    fn vertex_xz(plane_size: f32, n: usize, i: usize, j: usize) -> (f32, f32) {
        let step = plane_size / (n - 1) as f32;
        let half = plane_size / 2.0;
        (i as f32 * step - half, j as f32 * step - half)
    }

    /// Vertices per side of the mesh.
    pub fn vertices_per_side(&self) -> usize {
        self.vertices_per_side
    }

    /// World-space position of vertex (i, j).
    pub fn vertex_position(&self, i: usize, j: usize) -> Vec3 {
        let (x, z) = Self::vertex_xz(self.plane_size, self.vertices_per_side, i, j);
        Vec3::new(x, self.heights[j * self.vertices_per_side + i], z)
    }

    /// Per-vertex colors, row-major.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Per-vertex normals, row-major.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Deform and color the mesh from a risk grid.
    ///
    /// Each vertex looks up its grid cell through the inverse plane
    /// projection, then `height = base + risk * 3.0` and the vertex color
    /// comes from the shared ramp. A missing grid is a no-op; the previous
    /// deformation stays visible.
    pub fn apply_risk(&mut self, grid: Option<&RiskGrid>) {
        let Some(grid) = grid else {
            return;
        };
        let n = self.vertices_per_side;
        for j in 0..n {
            for i in 0..n {
                let (x, z) = Self::vertex_xz(self.plane_size, n, i, j);
                let risk = plane_to_grid(x, z, self.plane_size, grid.size())
                    .map_or(0.0, |(col, row)| grid.at(col, row));
                let idx = j * n + i;
                self.heights[idx] = self.base_heights[idx] + risk * RISK_HEIGHT_SCALE;
                self.colors[idx] = color_at(risk);
            }
        }
        self.recompute_normals();
    }

    /// Recompute vertex normals from height central differences. Edge
    /// vertices fall back to one-sided differences.
    fn recompute_normals(&mut self) {
        let n = self.vertices_per_side;
        let step = self.plane_size / (n - 1) as f32;
        for j in 0..n {
            for i in 0..n {
                let h = |ii: usize, jj: usize| self.heights[jj * n + ii];
                let (x0, x1, dx) = if i == 0 {
                    (h(0, j), h(1, j), step)
                } else if i == n - 1 {
                    (h(n - 2, j), h(n - 1, j), step)
                } else {
                    (h(i - 1, j), h(i + 1, j), 2.0 * step)
                };
                let (z0, z1, dz) = if j == 0 {
                    (h(i, 0), h(i, 1), step)
                } else if j == n - 1 {
                    (h(i, n - 2), h(i, n - 1), step)
                } else {
                    (h(i, j - 1), h(i, j + 1), 2.0 * step)
                };
                let normal = Vec3::new(-(x1 - x0) / dx, 1.0, -(z1 - z0) / dz).normalize();
                self.normals[j * n + i] = normal;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uniform_grid(size: usize, value: f32) -> RiskGrid {
        RiskGrid::from_rows(&vec![vec![value; size]; size]).unwrap()
    }

    #[test]
    fn test_mesh_dimensions() {
        let terrain = TerrainRenderer::new(64.0, 63);
        assert_eq!(terrain.vertices_per_side(), 64);
        assert_eq!(terrain.colors().len(), 64 * 64);
        let corner = terrain.vertex_position(0, 0);
        assert_relative_eq!(corner.x, -32.0);
        assert_relative_eq!(corner.z, -32.0);
    }

    #[test]
    fn test_risk_deforms_height() {
        let mut terrain = TerrainRenderer::new(64.0, 63);
        let before: Vec<f32> = (0..63)
            .map(|i| terrain.vertex_position(i, 10).y)
            .collect();
        terrain.apply_risk(Some(&uniform_grid(32, 1.0)));
        // The far edge vertex sits exactly on the plane boundary and maps to
        // no cell, mirroring the reference lookup; interior vertices all
        // rise by the full scale.
        for (i, &b) in before.iter().enumerate() {
            let after = terrain.vertex_position(i, 10).y;
            assert_relative_eq!(after - b, 3.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_risk_colors_vertices() {
        let mut terrain = TerrainRenderer::new(64.0, 63);
        terrain.apply_risk(Some(&uniform_grid(32, 1.0)));
        for j in 0..63 {
            for i in 0..63 {
                assert_eq!(terrain.colors()[j * 64 + i], Rgb::new(239, 68, 68));
            }
        }
    }

    #[test]
    fn test_normals_are_unit_and_upward() {
        let mut terrain = TerrainRenderer::new(64.0, 63);
        terrain.apply_risk(Some(&uniform_grid(32, 0.5)));
        for normal in terrain.normals() {
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-4);
            assert!(normal.y > 0.0);
        }
    }

    #[test]
    fn test_missing_grid_is_noop() {
        let mut terrain = TerrainRenderer::new(64.0, 63);
        terrain.apply_risk(Some(&uniform_grid(32, 0.8)));
        let before = terrain.vertex_position(5, 5);
        terrain.apply_risk(None);
        let after = terrain.vertex_position(5, 5);
        assert_relative_eq!(before.y, after.y);
    }
}
