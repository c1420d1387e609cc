//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Mesh generation settings
    pub mesh: MeshSettings,
    /// Tiling scheme settings
    pub tiling: TilingSettings,
    /// Reference ellipsoid settings
    pub ellipsoid: EllipsoidSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Mesh generation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSettings {
    /// Grid samples along each tile edge
    pub samples_per_side: usize,
    /// Skirt drop in metres (0 disables skirts)
    pub skirt_height: f64,
    /// Extra drop for water vertices in metres
    pub water_depth: f64,
    /// Maximum concurrent mesh requests (sample buffer pool size)
    pub max_concurrent_requests: usize,
}

/// Tile grid projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilingScheme {
    /// Slippy-map Web Mercator, 1×1 tiles at level 0
    WebMercator,
    /// Equirectangular latitude/longitude grid
    Geographic,
}

impl FromStr for TilingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web_mercator" | "webmercator" | "mercator" => Ok(Self::WebMercator),
            "geographic" | "equirectangular" => Ok(Self::Geographic),
            other => Err(format!("unknown tiling scheme '{}'", other)),
        }
    }
}

impl fmt::Display for TilingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebMercator => write!(f, "web_mercator"),
            Self::Geographic => write!(f, "geographic"),
        }
    }
}

/// Tiling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingSettings {
    pub scheme: TilingScheme,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Deepest supported level
    pub max_level: u32,
    /// Level-0 columns (geographic scheme only)
    pub base_tiles_x: u32,
    /// Level-0 rows (geographic scheme only)
    pub base_tiles_y: u32,
}

/// Reference ellipsoid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipsoidModel {
    Wgs84,
    UnitSphere,
    /// Radii taken from `equatorial_radius` / `polar_radius`
    Custom,
}

impl FromStr for EllipsoidModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wgs84" => Ok(Self::Wgs84),
            "unit_sphere" | "unit" => Ok(Self::UnitSphere),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown ellipsoid model '{}'", other)),
        }
    }
}

impl fmt::Display for EllipsoidModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wgs84 => write!(f, "wgs84"),
            Self::UnitSphere => write!(f, "unit_sphere"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Ellipsoid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidSettings {
    pub model: EllipsoidModel,
    /// Semi-major axis in metres (custom model only)
    pub equatorial_radius: f64,
    /// Semi-minor axis in metres (custom model only)
    pub polar_radius: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}
