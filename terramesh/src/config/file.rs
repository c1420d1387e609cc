//! Configuration file handling for ~/.terramesh/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ini::Ini;
use thiserror::Error;

use super::mesh::{MeshConfig, MeshConfigError};
use super::settings::{ConfigFile, EllipsoidModel, TilingScheme};
use crate::geodesy::Ellipsoid;
use crate::mapper::{GeographicTileMapper, TileMapper, WebMercatorTileMapper};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Mesh settings failed validation
    #[error("Invalid mesh configuration: {0}")]
    Mesh(#[from] MeshConfigError),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.terramesh/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.terramesh/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    /// Build the mesh generation parameters from the `[mesh]` section.
    pub fn mesh_config(&self) -> MeshConfig {
        MeshConfig::new()
            .with_samples_per_side(self.mesh.samples_per_side)
            .with_skirt_height(self.mesh.skirt_height)
            .with_water_depth(self.mesh.water_depth)
            .with_max_concurrent_requests(self.mesh.max_concurrent_requests)
    }

    /// Build the tile mapper described by the `[tiling]` section.
    pub fn tile_mapper(&self) -> Arc<dyn TileMapper> {
        let tiling = &self.tiling;
        match tiling.scheme {
            TilingScheme::WebMercator => {
                Arc::new(WebMercatorTileMapper::new(tiling.tile_size, tiling.max_level))
            }
            TilingScheme::Geographic => Arc::new(GeographicTileMapper::with_base_grid(
                tiling.tile_size,
                tiling.max_level,
                tiling.base_tiles_x,
                tiling.base_tiles_y,
            )),
        }
    }

    /// Build the reference ellipsoid described by the `[ellipsoid]` section.
    ///
    /// Custom radii are checked when the file is parsed.
    pub fn ellipsoid(&self) -> Ellipsoid {
        match self.ellipsoid.model {
            EllipsoidModel::Wgs84 => Ellipsoid::wgs84(),
            EllipsoidModel::UnitSphere => Ellipsoid::unit_sphere(),
            EllipsoidModel::Custom => Ellipsoid::new(
                self.ellipsoid.equatorial_radius,
                self.ellipsoid.polar_radius,
            ),
        }
    }
}

/// Get the path to the config directory (~/.terramesh).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".terramesh")
}

/// Get the path to the config file (~/.terramesh/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.mesh.samples_per_side, DEFAULT_SAMPLES_PER_SIDE);
        assert_eq!(config.mesh.skirt_height, DEFAULT_SKIRT_HEIGHT);
        assert_eq!(config.mesh.water_depth, DEFAULT_WATER_DEPTH);
        assert!(config.mesh.max_concurrent_requests >= 1);
        assert_eq!(config.tiling.scheme, TilingScheme::WebMercator);
        assert_eq!(config.ellipsoid.model, EllipsoidModel::Wgs84);
        assert_eq!(config.logging.file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_default_mesh_config_is_valid() {
        let config = ConfigFile::default();
        assert!(config.mesh_config().validate().is_ok());
    }

    #[test]
    fn test_tile_mapper_follows_scheme() {
        let mut config = ConfigFile::default();
        assert_eq!(config.tile_mapper().num_tiles_x(0), 1);

        config.tiling.scheme = TilingScheme::Geographic;
        let mapper = config.tile_mapper();
        assert_eq!(mapper.num_tiles_x(0), 2);
        assert_eq!(mapper.num_tiles_y(0), 1);
    }

    #[test]
    fn test_ellipsoid_models() {
        let mut config = ConfigFile::default();
        assert_eq!(config.ellipsoid(), Ellipsoid::wgs84());

        config.ellipsoid.model = EllipsoidModel::UnitSphere;
        assert_eq!(config.ellipsoid(), Ellipsoid::unit_sphere());
    }

    #[test]
    fn test_config_path_under_home() {
        assert!(config_file_path().ends_with(".terramesh/config.ini"));
    }
}
