//! Equirectangular (plate carrée) tiling.

use super::{TileMapper, DEFAULT_MAX_LEVEL, DEFAULT_TILE_SIZE};
use crate::geodesy::Geodetic2d;

/// Equirectangular tiling over the full globe.
///
/// Level 0 is a `base_tiles_x` × `base_tiles_y` grid; each level doubles
/// both axes. Pixels are linear in latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeographicTileMapper {
    tile_size: u32,
    max_level: u32,
    base_tiles_x: u32,
    base_tiles_y: u32,
}

impl GeographicTileMapper {
    pub fn new(tile_size: u32, max_level: u32) -> Self {
        Self::with_base_grid(tile_size, max_level, 2, 1)
    }

    /// Creates a mapper with a custom level-0 grid.
    pub fn with_base_grid(
        tile_size: u32,
        max_level: u32,
        base_tiles_x: u32,
        base_tiles_y: u32,
    ) -> Self {
        assert!(tile_size > 0, "tile_size must be > 0");
        assert!(
            base_tiles_x > 0 && base_tiles_y > 0,
            "base grid must have at least one tile"
        );
        Self {
            tile_size,
            max_level,
            base_tiles_x,
            base_tiles_y,
        }
    }

    pub fn base_tiles_x(&self) -> u32 {
        self.base_tiles_x
    }

    pub fn base_tiles_y(&self) -> u32 {
        self.base_tiles_y
    }
}

impl Default for GeographicTileMapper {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, DEFAULT_MAX_LEVEL)
    }
}

impl TileMapper for GeographicTileMapper {
    fn tile_pixel_width(&self, _level: u32) -> u32 {
        self.tile_size
    }

    fn tile_pixel_height(&self, _level: u32) -> u32 {
        self.tile_size
    }

    fn num_tiles_x(&self, level: u32) -> u32 {
        self.base_tiles_x.saturating_mul(1u32 << level.min(31))
    }

    fn num_tiles_y(&self, level: u32) -> u32 {
        self.base_tiles_y.saturating_mul(1u32 << level.min(31))
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }

    fn geo_to_pixel_xy(&self, geo: Geodetic2d, level: u32) -> (f64, f64) {
        let x = (geo.longitude + 180.0) / 360.0 * self.map_pixel_width(level);
        let y = (90.0 - geo.latitude) / 180.0 * self.map_pixel_height(level);
        (x, y)
    }

    fn pixel_xy_to_geo(&self, level: u32, pixel_x: f64, pixel_y: f64) -> Geodetic2d {
        let lon = pixel_x / self.map_pixel_width(level) * 360.0 - 180.0;
        let lat = 90.0 - pixel_y / self.map_pixel_height(level) * 180.0;
        Geodetic2d::new(lat, lon)
    }
}
