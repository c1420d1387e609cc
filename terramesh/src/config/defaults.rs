//! Default values and constants for all configuration settings.

use super::settings::*;
use crate::geodesy::Ellipsoid;
use crate::mapper::{DEFAULT_MAX_LEVEL, DEFAULT_TILE_SIZE};

/// Default grid samples per tile side.
pub const DEFAULT_SAMPLES_PER_SIDE: usize = 33;

/// Default skirt height in metres.
pub const DEFAULT_SKIRT_HEIGHT: f64 = 50.0;

/// Default water depth offset in metres.
pub const DEFAULT_WATER_DEPTH: f64 = 0.0;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "terramesh.log";

/// Get the number of available CPU cores.
pub fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Default concurrent mesh requests: one per CPU.
pub fn default_max_concurrent_requests() -> usize {
    num_cpus()
}

impl Default for ConfigFile {
    fn default() -> Self {
        let wgs84 = Ellipsoid::wgs84();
        Self {
            mesh: MeshSettings {
                samples_per_side: DEFAULT_SAMPLES_PER_SIDE,
                skirt_height: DEFAULT_SKIRT_HEIGHT,
                water_depth: DEFAULT_WATER_DEPTH,
                max_concurrent_requests: default_max_concurrent_requests(),
            },
            tiling: TilingSettings {
                scheme: TilingScheme::WebMercator,
                tile_size: DEFAULT_TILE_SIZE,
                max_level: DEFAULT_MAX_LEVEL,
                base_tiles_x: 2,
                base_tiles_y: 1,
            },
            ellipsoid: EllipsoidSettings {
                model: EllipsoidModel::Wgs84,
                equatorial_radius: wgs84.equatorial_radius(),
                polar_radius: wgs84.polar_radius(),
            },
            logging: LoggingSettings {
                directory: super::file::config_directory().join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
