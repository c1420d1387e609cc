//! Tile mesh generation from filled elevation samples.
//!
//! Geometry is built in three passes:
//!
//! 1. Every grid and skirt vertex is projected to the geocentric frame.
//! 2. The mesh origin is placed at the centre of the grid's geocentric
//!    bounding box, and a local frame is aligned with the surface normal
//!    and north direction there.
//! 3. Vertices and normals are re-based into that frame and triangulated.
//!
//! # Winding
//!
//! Triangles wind clockwise when viewed from outside the ellipsoid. In
//! vector terms, `(v1 - v0) × (v2 - v0)` points away from the terrain:
//! up for grid triangles and outward for skirt triangles.

use std::time::Instant;

use glam::{DQuat, DVec3};
use tracing::trace;

use super::error::MeshError;
use super::skirt;
use super::types::TileMesh;
use super::uv::{GridEdge, UvCalculator};
use crate::config::MeshConfig;
use crate::geodesy::Ellipsoid;
use crate::mapper::{TerrainTileIndex, TileMapper};
use crate::provider::TileAttributeMask;
use crate::sample::ElevationPointSample;

/// Builds [`TileMesh`]es for a fixed configuration and ellipsoid.
///
/// A generator is immutable and can be shared across concurrent requests.
#[derive(Debug, Clone)]
pub struct MeshGenerator {
    samples_per_side: usize,
    skirt_height: f64,
    water_depth: f64,
    /// Clockwise perimeter, empty when skirts are disabled
    perimeter: Vec<(usize, usize)>,
    ellipsoid: Ellipsoid,
}

/// Geocentric position and surface normal of one vertex.
struct WorldVertex {
    position: DVec3,
    normal: DVec3,
}

impl MeshGenerator {
    /// Creates a generator, rejecting an invalid configuration.
    pub fn new(config: &MeshConfig, ellipsoid: Ellipsoid) -> Result<Self, MeshError> {
        config.validate()?;

        let samples_per_side = config.samples_per_side();
        let perimeter = if config.has_skirt() {
            skirt::perimeter(samples_per_side)
        } else {
            Vec::new()
        };

        Ok(Self {
            samples_per_side,
            skirt_height: config.skirt_height(),
            water_depth: config.water_depth(),
            perimeter,
            ellipsoid,
        })
    }

    pub fn samples_per_side(&self) -> usize {
        self.samples_per_side
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Grid vertices per mesh (`N²`).
    pub fn grid_vertex_count(&self) -> usize {
        self.samples_per_side * self.samples_per_side
    }

    /// Skirt vertices per mesh: `4(N - 1)`, or 0 with skirts disabled.
    pub fn skirt_vertex_count(&self) -> usize {
        self.perimeter.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.grid_vertex_count() + self.skirt_vertex_count()
    }

    /// Triangles per mesh: two per grid quad plus two per skirt segment.
    pub fn triangle_count(&self) -> usize {
        let quads = (self.samples_per_side - 1) * (self.samples_per_side - 1);
        2 * quads + 2 * self.skirt_vertex_count()
    }

    /// Generates the mesh for `tile` from a filled sample grid.
    ///
    /// `samples` must hold `N²` samples in row-major order, north row
    /// first, as written by [`crate::sample::populate_sample_points`].
    /// Water pixels in `mask` lower their vertices by the configured water
    /// depth. UVs are computed against `mapper`.
    pub fn generate(
        &self,
        tile: TerrainTileIndex,
        samples: &[ElevationPointSample],
        mask: Option<&TileAttributeMask>,
        mapper: &dyn TileMapper,
    ) -> Result<TileMesh, MeshError> {
        let expected = self.grid_vertex_count();
        if samples.len() != expected {
            return Err(MeshError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let start = Instant::now();
        let world = self.project_vertices(samples, mask);

        let (center, rotation) = self.local_frame(&world[..expected]);
        let inverse = rotation.inverse();

        let mut vertices = Vec::with_capacity(world.len());
        let mut normals = Vec::with_capacity(world.len());
        let mut grid_min = DVec3::splat(f64::INFINITY);
        let mut grid_max = DVec3::splat(f64::NEG_INFINITY);

        for (index, vertex) in world.iter().enumerate() {
            let local = inverse * (vertex.position - center);
            if index < expected {
                grid_min = grid_min.min(local);
                grid_max = grid_max.max(local);
            }
            vertices.push(local.as_vec3());
            normals.push((inverse * vertex.normal).as_vec3());
        }
        let extents = (grid_max - grid_min) * 0.5;

        let triangles = self.triangulate();
        let uvs = UvCalculator::new(mapper, &self.ellipsoid).compute(
            tile,
            center,
            rotation,
            &vertices,
            |index| self.grid_edge(index),
        );

        trace!(
            level = tile.level,
            row = tile.row,
            column = tile.column,
            vertices = vertices.len(),
            triangles = triangles.len() / 3,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Tile mesh generated"
        );

        Ok(TileMesh::new(
            tile, center, extents, rotation, vertices, uvs, normals, triangles, expected,
        ))
    }

    /// Projects grid then skirt vertices to the geocentric frame.
    fn project_vertices(
        &self,
        samples: &[ElevationPointSample],
        mask: Option<&TileAttributeMask>,
    ) -> Vec<WorldVertex> {
        let n = self.samples_per_side;
        let mut world = Vec::with_capacity(self.vertex_count());

        for (index, sample) in samples.iter().enumerate() {
            let elevation = sample.elevation - self.water_offset(mask, index / n, index % n);
            world.push(self.project(sample, elevation));
        }

        for &(row, col) in &self.perimeter {
            let sample = &samples[row * n + col];
            let elevation =
                sample.elevation - self.skirt_height - self.water_offset(mask, row, col);
            world.push(self.project(sample, elevation));
        }

        world
    }

    fn project(&self, sample: &ElevationPointSample, elevation: f64) -> WorldVertex {
        let (position, normal) = self.ellipsoid.to_geocentric(sample.position, elevation);
        WorldVertex { position, normal }
    }

    /// Water depth to subtract at grid sample `(row, col)`, or 0 over land.
    fn water_offset(&self, mask: Option<&TileAttributeMask>, row: usize, col: usize) -> f64 {
        match mask {
            Some(mask) => {
                let (x, y) = mask_pixel(mask, self.samples_per_side, row, col);
                if mask.is_water(x, y) {
                    self.water_depth
                } else {
                    0.0
                }
            }
            None => 0.0,
        }
    }

    /// Outer grid column of vertex `index`; skirt vertices share their edge
    /// sample's column.
    fn grid_edge(&self, index: usize) -> Option<GridEdge> {
        let n = self.samples_per_side;
        let grid = self.grid_vertex_count();
        let column = if index < grid {
            index % n
        } else {
            self.perimeter.get(index - grid)?.1
        };

        if column == 0 {
            Some(GridEdge::West)
        } else if column == n - 1 {
            Some(GridEdge::East)
        } else {
            None
        }
    }

    /// Mesh origin and local-to-geocentric rotation for the grid vertices.
    fn local_frame(&self, grid: &[WorldVertex]) -> (DVec3, DQuat) {
        let (min, max) = grid.iter().fold(
            (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
            |(min, max), v| (min.min(v.position), max.max(v.position)),
        );
        let center = (min + max) * 0.5;
        let geo = self.ellipsoid.to_geodetic(center);
        (center, self.ellipsoid.local_rotation(geo.into()))
    }

    fn triangulate(&self) -> Vec<u32> {
        let n = self.samples_per_side;
        let grid = self.grid_vertex_count();
        let mut triangles = Vec::with_capacity(self.triangle_count() * 3);

        for y in 0..n - 1 {
            for x in 0..n - 1 {
                let top_left = (y * n + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = top_left + n as u32;
                let bottom_right = bottom_left + 1;

                triangles.extend_from_slice(&[top_left, top_right, bottom_right]);
                triangles.extend_from_slice(&[top_left, bottom_right, bottom_left]);
            }
        }

        let count = self.perimeter.len();
        for i in 0..count {
            let j = (i + 1) % count;
            let (row_a, col_a) = self.perimeter[i];
            let (row_b, col_b) = self.perimeter[j];
            let edge_a = (row_a * n + col_a) as u32;
            let edge_b = (row_b * n + col_b) as u32;
            let skirt_a = (grid + i) as u32;
            let skirt_b = (grid + j) as u32;

            triangles.extend_from_slice(&[edge_b, edge_a, skirt_a]);
            triangles.extend_from_slice(&[edge_b, skirt_a, skirt_b]);
        }

        triangles
    }
}

/// Mask pixel under grid sample `(row, col)` of an `n × n` grid.
fn mask_pixel(mask: &TileAttributeMask, n: usize, row: usize, col: usize) -> (u32, u32) {
    let step = (n.max(2) - 1) as f64;
    let x = (col as f64 * mask.width().saturating_sub(1) as f64 / step).round();
    let y = (row as f64 * mask.height().saturating_sub(1) as f64 / step).round();
    (x as u32, y as u32)
}
