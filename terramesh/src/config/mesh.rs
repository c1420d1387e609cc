//! Mesh generation configuration.

use super::defaults::{
    default_max_concurrent_requests, DEFAULT_SAMPLES_PER_SIDE, DEFAULT_SKIRT_HEIGHT,
    DEFAULT_WATER_DEPTH,
};
use thiserror::Error;

/// Skirt heights within this distance of zero disable skirt generation.
pub const SKIRT_HEIGHT_EPSILON: f64 = 1e-6;

/// Minimum samples per tile side (a single quad).
pub const MIN_SAMPLES_PER_SIDE: usize = 2;

/// Invalid mesh configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshConfigError {
    #[error("samples_per_side must be at least {min}, got {0}", min = MIN_SAMPLES_PER_SIDE)]
    TooFewSamples(usize),

    #[error("skirt_height must not be negative, got {0}")]
    NegativeSkirtHeight(f64),

    #[error("water_depth must not be negative, got {0}")]
    NegativeWaterDepth(f64),

    #[error("max_concurrent_requests must be > 0")]
    ZeroConcurrency,

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Configuration for tile mesh generation.
///
/// # Example
///
/// ```
/// use terramesh::config::MeshConfig;
///
/// let config = MeshConfig::new()
///     .with_samples_per_side(17)
///     .with_skirt_height(25.0)
///     .with_max_concurrent_requests(4);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.samples_per_tile(), 17 * 17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Grid samples along each tile edge
    samples_per_side: usize,
    /// Distance skirt vertices drop below their edge vertex, in metres
    skirt_height: f64,
    /// Extra drop applied to vertices over water, in metres
    water_depth: f64,
    /// Sample buffers in the pool, and so the bound on concurrent requests
    max_concurrent_requests: usize,
}

impl MeshConfig {
    /// Create a new mesh configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of grid samples per tile side. Default: 33.
    pub fn with_samples_per_side(mut self, samples: usize) -> Self {
        self.samples_per_side = samples;
        self
    }

    /// Set the skirt height in metres. Zero disables skirts. Default: 50.
    pub fn with_skirt_height(mut self, height: f64) -> Self {
        self.skirt_height = height;
        self
    }

    /// Set the extra depth applied to water vertices. Default: 0.
    pub fn with_water_depth(mut self, depth: f64) -> Self {
        self.water_depth = depth;
        self
    }

    /// Set the maximum number of concurrent mesh requests.
    /// Default: number of available CPUs.
    pub fn with_max_concurrent_requests(mut self, requests: usize) -> Self {
        self.max_concurrent_requests = requests;
        self
    }

    pub fn samples_per_side(&self) -> usize {
        self.samples_per_side
    }

    /// Samples in one tile grid, `samples_per_side²`.
    pub fn samples_per_tile(&self) -> usize {
        self.samples_per_side * self.samples_per_side
    }

    pub fn skirt_height(&self) -> f64 {
        self.skirt_height
    }

    pub fn water_depth(&self) -> f64 {
        self.water_depth
    }

    pub fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Returns true if skirts are generated.
    pub fn has_skirt(&self) -> bool {
        self.skirt_height.abs() > SKIRT_HEIGHT_EPSILON
    }

    /// Checks the configuration before any mesh work starts.
    pub fn validate(&self) -> Result<(), MeshConfigError> {
        if self.samples_per_side < MIN_SAMPLES_PER_SIDE {
            return Err(MeshConfigError::TooFewSamples(self.samples_per_side));
        }
        if !self.skirt_height.is_finite() {
            return Err(MeshConfigError::NonFinite("skirt_height"));
        }
        if !self.water_depth.is_finite() {
            return Err(MeshConfigError::NonFinite("water_depth"));
        }
        if self.skirt_height < -SKIRT_HEIGHT_EPSILON {
            return Err(MeshConfigError::NegativeSkirtHeight(self.skirt_height));
        }
        if self.water_depth < 0.0 {
            return Err(MeshConfigError::NegativeWaterDepth(self.water_depth));
        }
        if self.max_concurrent_requests == 0 {
            return Err(MeshConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            samples_per_side: DEFAULT_SAMPLES_PER_SIDE,
            skirt_height: DEFAULT_SKIRT_HEIGHT,
            water_depth: DEFAULT_WATER_DEPTH,
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}
