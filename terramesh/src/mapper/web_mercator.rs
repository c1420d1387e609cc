//! Web Mercator (slippy map) tiling.

use super::{TileMapper, DEFAULT_MAX_LEVEL, DEFAULT_TILE_SIZE};
use crate::geodesy::Geodetic2d;
use std::f64::consts::PI;

/// Web Mercator valid latitude range.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.05112878;

/// Web Mercator tiling: one tile at level 0, doubling per level on each
/// axis. Latitudes beyond ±85.05112878° are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebMercatorTileMapper {
    tile_size: u32,
    max_level: u32,
}

impl WebMercatorTileMapper {
    pub fn new(tile_size: u32, max_level: u32) -> Self {
        assert!(tile_size > 0, "tile_size must be > 0");
        Self {
            tile_size,
            max_level,
        }
    }

    #[inline]
    fn tiles_per_axis(level: u32) -> u32 {
        1u32 << level.min(31)
    }
}

impl Default for WebMercatorTileMapper {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE, DEFAULT_MAX_LEVEL)
    }
}

impl TileMapper for WebMercatorTileMapper {
    fn tile_pixel_width(&self, _level: u32) -> u32 {
        self.tile_size
    }

    fn tile_pixel_height(&self, _level: u32) -> u32 {
        self.tile_size
    }

    fn num_tiles_x(&self, level: u32) -> u32 {
        Self::tiles_per_axis(level)
    }

    fn num_tiles_y(&self, level: u32) -> u32 {
        Self::tiles_per_axis(level)
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }

    fn geo_to_pixel_xy(&self, geo: Geodetic2d, level: u32) -> (f64, f64) {
        let width = self.map_pixel_width(level);
        let height = self.map_pixel_height(level);

        let x = (geo.longitude + 180.0) / 360.0 * width;

        let lat_rad = geo
            .latitude
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
            .to_radians();
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * height;

        (x, y)
    }

    fn pixel_xy_to_geo(&self, level: u32, pixel_x: f64, pixel_y: f64) -> Geodetic2d {
        let width = self.map_pixel_width(level);
        let height = self.map_pixel_height(level);

        let lon = pixel_x / width * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * pixel_y / height)).sinh().atan().to_degrees();

        Geodetic2d::new(lat, lon)
    }
}
