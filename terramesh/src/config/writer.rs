//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[mesh]
; Grid samples along each tile edge (minimum 2, default: 33)
; Each tile produces samples_per_side^2 surface vertices
samples_per_side = {}
; Skirt drop below the tile edge in metres (default: 50, 0 disables skirts)
; Skirts hide cracks between neighbouring tiles at different levels
skirt_height = {}
; Extra drop applied to water vertices in metres (default: 0)
water_depth = {}
; Maximum concurrent mesh requests (default: number of CPU cores)
; Each in-flight request holds one sample buffer
max_concurrent_requests = {}

[tiling]
; Tile grid projection:
;   web_mercator - slippy map, one tile at level 0
;   geographic   - equirectangular lat/lon grid
scheme = {}
; Tile edge length in pixels (default: 256)
tile_size = {}
; Deepest supported level (default: 23)
max_level = {}
; Level-0 tile grid for the geographic scheme (default: 2 x 1)
base_tiles_x = {}
base_tiles_y = {}

[ellipsoid]
; Reference ellipsoid: wgs84, unit_sphere, or custom
model = {}
; Radii in metres, only used when model = custom
equatorial_radius = {}
polar_radius = {}

[logging]
; Directory for log files (default: ~/.terramesh/logs)
directory = {}
file = {}
"#,
        config.mesh.samples_per_side,
        config.mesh.skirt_height,
        config.mesh.water_depth,
        config.mesh.max_concurrent_requests,
        config.tiling.scheme,
        config.tiling.tile_size,
        config.tiling.max_level,
        config.tiling.base_tiles_x,
        config.tiling.base_tiles_y,
        config.ellipsoid.model,
        config.ellipsoid.equatorial_radius,
        config.ellipsoid.polar_radius,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Render a path for the config file, collapsing the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
