//! Tile mapping between tile indices, global pixel coordinates and
//! geodetic coordinates.
//!
//! A [`TileMapper`] defines a level-of-detail tiling scheme through four
//! primitives (tile size, grid size, forward and inverse projection). All
//! other conversions are derived from those primitives by the trait's
//! provided methods, so a new projection only has to implement the core.
//!
//! Pixel coordinates are global: `(0, 0)` is the north-west corner of the
//! map at that level, X grows east and Y grows south. They are `f64` and may
//! fall outside the map when longitudes wrap past the date line.

mod geographic;
mod types;
mod web_mercator;

pub use geographic::GeographicTileMapper;
pub use types::{GeoBounds, TerrainTileIndex, TileIndexError};
pub use web_mercator::{WebMercatorTileMapper, MAX_MERCATOR_LATITUDE};

use crate::geodesy::Geodetic2d;
use std::fmt::Debug;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Default deepest supported level of detail.
pub const DEFAULT_MAX_LEVEL: u32 = 23;

/// A level-of-detail tiling scheme.
///
/// Implementations are pure: no I/O and no interior mutability, so one
/// mapper can be shared by every in-flight mesh request.
pub trait TileMapper: Send + Sync + Debug {
    /// Tile width in pixels at `level`.
    fn tile_pixel_width(&self, level: u32) -> u32;

    /// Tile height in pixels at `level`.
    fn tile_pixel_height(&self, level: u32) -> u32;

    /// Number of tile columns at `level`.
    fn num_tiles_x(&self, level: u32) -> u32;

    /// Number of tile rows at `level`.
    fn num_tiles_y(&self, level: u32) -> u32;

    /// Deepest level this scheme supports.
    fn max_level(&self) -> u32;

    /// Projects a geodetic coordinate to global pixel coordinates.
    fn geo_to_pixel_xy(&self, geo: Geodetic2d, level: u32) -> (f64, f64);

    /// Inverse of [`TileMapper::geo_to_pixel_xy`].
    fn pixel_xy_to_geo(&self, level: u32, pixel_x: f64, pixel_y: f64) -> Geodetic2d;

    /// Map width in pixels at `level`.
    fn map_pixel_width(&self, level: u32) -> f64 {
        self.tile_pixel_width(level) as f64 * self.num_tiles_x(level) as f64
    }

    /// Map height in pixels at `level`.
    fn map_pixel_height(&self, level: u32) -> f64 {
        self.tile_pixel_height(level) as f64 * self.num_tiles_y(level) as f64
    }

    /// Global pixel coordinates of a tile's north-west corner.
    fn tile_to_pixel_xy(&self, tile: TerrainTileIndex) -> (f64, f64) {
        (
            tile.column as f64 * self.tile_pixel_width(tile.level) as f64,
            tile.row as f64 * self.tile_pixel_height(tile.level) as f64,
        )
    }

    /// Tile containing a global pixel coordinate, clamped to the grid.
    fn pixel_xy_to_tile(&self, level: u32, pixel_x: f64, pixel_y: f64) -> TerrainTileIndex {
        let column = clamp_cell(
            pixel_x / self.tile_pixel_width(level) as f64,
            self.num_tiles_x(level),
        );
        let row = clamp_cell(
            pixel_y / self.tile_pixel_height(level) as f64,
            self.num_tiles_y(level),
        );
        TerrainTileIndex::new(level, row, column)
    }

    /// Tile containing a geodetic coordinate.
    fn geo_to_tile(&self, geo: Geodetic2d, level: u32) -> TerrainTileIndex {
        let (x, y) = self.geo_to_pixel_xy(geo, level);
        self.pixel_xy_to_tile(level, x, y)
    }

    /// Geodetic coordinate of a tile's north-west corner.
    fn tile_to_geo(&self, tile: TerrainTileIndex) -> Geodetic2d {
        let (x, y) = self.tile_to_pixel_xy(tile);
        self.pixel_xy_to_geo(tile.level, x, y)
    }

    /// Geodetic bounds of a tile.
    fn tile_to_bounds(&self, tile: TerrainTileIndex) -> GeoBounds {
        let (x0, y0) = self.tile_to_pixel_xy(tile);
        let x1 = x0 + self.tile_pixel_width(tile.level) as f64;
        let y1 = y0 + self.tile_pixel_height(tile.level) as f64;
        let north_west = self.pixel_xy_to_geo(tile.level, x0, y0);
        let south_east = self.pixel_xy_to_geo(tile.level, x1, y1);
        GeoBounds::new(
            south_east.latitude,
            north_west.longitude,
            north_west.latitude,
            south_east.longitude,
        )
    }

    /// Checks that `tile` exists in this scheme.
    fn check_tile(&self, tile: TerrainTileIndex) -> Result<(), TileIndexError> {
        if tile.level > self.max_level() {
            return Err(TileIndexError::LevelOutOfRange {
                level: tile.level,
                max_level: self.max_level(),
            });
        }
        let rows = self.num_tiles_y(tile.level);
        if tile.row >= rows {
            return Err(TileIndexError::RowOutOfRange {
                level: tile.level,
                row: tile.row,
                rows,
            });
        }
        let columns = self.num_tiles_x(tile.level);
        if tile.column >= columns {
            return Err(TileIndexError::ColumnOutOfRange {
                level: tile.level,
                column: tile.column,
                columns,
            });
        }
        Ok(())
    }

    fn is_valid_tile(&self, tile: TerrainTileIndex) -> bool {
        self.check_tile(tile).is_ok()
    }

    /// Returns true if the tile touches the antimeridian (first or last
    /// column at its level).
    fn touches_antimeridian(&self, tile: TerrainTileIndex) -> bool {
        tile.column == 0 || tile.column + 1 == self.num_tiles_x(tile.level)
    }
}

#[inline]
fn clamp_cell(cell: f64, count: u32) -> u32 {
    if cell <= 0.0 {
        0
    } else {
        (cell.floor() as u64).min(count.saturating_sub(1) as u64) as u32
    }
}
