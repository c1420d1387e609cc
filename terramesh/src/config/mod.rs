//! Configuration for terramesh components.
//!
//! Two layers live here:
//!
//! - [`MeshConfig`]: the validated parameters a mesh provider is built from
//! - [`ConfigFile`]: the user's `~/.terramesh/config.ini`, which produces a
//!   `MeshConfig`, a tile mapper and an ellipsoid
//!
//! # Example
//!
//! ```
//! use terramesh::config::MeshConfig;
//!
//! let config = MeshConfig::new()
//!     .with_samples_per_side(17)
//!     .with_skirt_height(25.0);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.samples_per_tile(), 289);
//! ```

mod defaults;
mod file;
mod mesh;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_max_concurrent_requests, num_cpus, DEFAULT_LOG_FILE, DEFAULT_SAMPLES_PER_SIDE,
    DEFAULT_SKIRT_HEIGHT, DEFAULT_WATER_DEPTH,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use mesh::{MeshConfig, MeshConfigError, MIN_SAMPLES_PER_SIDE, SKIRT_HEIGHT_EPSILON};
pub use settings::{
    ConfigFile, EllipsoidModel, EllipsoidSettings, LoggingSettings, MeshSettings, TilingScheme,
    TilingSettings,
};
