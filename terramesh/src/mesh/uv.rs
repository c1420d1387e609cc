//! Texture coordinates for tile meshes.
//!
//! UVs map each vertex onto the tile's own pixel footprint: `u` runs west
//! to east, `v` runs south to north (pixel Y grows south, so it is
//! flipped). Offsets are clamped to the footprint, so every UV lies in
//! `[0, 1]`.
//!
//! Tiles in the first or last column of a level touch the antimeridian.
//! Vertices on their outer edge can reconstruct to a longitude on the far
//! side of the date line, which would put their pixel almost a full map
//! width away. Such vertices are snapped to the near edge instead: `u = 0`
//! for the westernmost column, `u = 1` for the easternmost.
//!
//! When a level has a single column, the tile's west and east edges are the
//! same meridian and a reconstructed position cannot tell them apart. Edge
//! vertices then take `u` from the grid column they were sampled on, passed
//! in as a [`GridEdge`].

use glam::{DQuat, DVec3, Vec2, Vec3};

use crate::geodesy::Ellipsoid;
use crate::mapper::{TerrainTileIndex, TileMapper};

/// Which side of the map a tile's date-line wraparound comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrap {
    None,
    /// Only column: both edges lie on the date line
    Both,
    /// First column: wrapped pixels land near the eastern end of the map
    West,
    /// Last column: wrapped pixels land near the western end of the map
    East,
}

/// Outer grid column a vertex was sampled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEdge {
    West,
    East,
}

/// Computes per-vertex UVs for one tile.
#[derive(Debug, Clone, Copy)]
pub struct UvCalculator<'a> {
    mapper: &'a dyn TileMapper,
    ellipsoid: &'a Ellipsoid,
}

impl<'a> UvCalculator<'a> {
    pub fn new(mapper: &'a dyn TileMapper, ellipsoid: &'a Ellipsoid) -> Self {
        Self { mapper, ellipsoid }
    }

    /// Computes UVs for local-frame `vertices` of `tile`.
    ///
    /// Each vertex is taken back to the geocentric frame through `center`
    /// and `rotation`, converted to geodetic coordinates and projected to
    /// pixels at the tile's level. `edge_of` maps a vertex index to the
    /// outer grid column it belongs to, if any; it is only consulted for
    /// tiles spanning the whole map width.
    pub fn compute(
        &self,
        tile: TerrainTileIndex,
        center: DVec3,
        rotation: DQuat,
        vertices: &[Vec3],
        edge_of: impl Fn(usize) -> Option<GridEdge>,
    ) -> Vec<Vec2> {
        let level = tile.level;
        let tile_width = self.mapper.tile_pixel_width(level) as f64;
        let tile_height = self.mapper.tile_pixel_height(level) as f64;
        let (left, top) = self.mapper.tile_to_pixel_xy(tile);
        let right = left + tile_width;
        let map_width = self.mapper.map_pixel_width(level);

        // Halfway through the wrapped span on each side.
        let west_threshold = (right + map_width) / 2.0;
        let east_threshold = left / 2.0;
        let wrap = self.wrap_for(tile);

        vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| {
                let world = center + rotation * vertex.as_dvec3();
                let geo = self.ellipsoid.to_geodetic(world);
                let (px, py) = self.mapper.geo_to_pixel_xy(geo.into(), level);

                let u = match wrap {
                    Wrap::Both => match edge_of(index) {
                        Some(GridEdge::West) => 0.0,
                        Some(GridEdge::East) => 1.0,
                        None => normalize(px - left, tile_width),
                    },
                    Wrap::West if px > west_threshold => 0.0,
                    Wrap::East if px < east_threshold => 1.0,
                    _ => normalize(px - left, tile_width),
                };
                let v = 1.0 - normalize(py - top, tile_height);

                Vec2::new(u as f32, v as f32)
            })
            .collect()
    }

    fn wrap_for(&self, tile: TerrainTileIndex) -> Wrap {
        if !self.mapper.touches_antimeridian(tile) {
            Wrap::None
        } else if self.mapper.num_tiles_x(tile.level) == 1 {
            Wrap::Both
        } else if tile.column == 0 {
            Wrap::West
        } else {
            Wrap::East
        }
    }
}

#[inline]
fn normalize(offset: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return 0.0;
    }
    offset.clamp(0.0, span) / span
}
