//! Error types for mesh generation.

use thiserror::Error;

use crate::config::MeshConfigError;
use crate::mapper::TileIndexError;
use crate::provider::ProviderError;
use crate::sample::PoolError;

/// Errors that fail a mesh request.
///
/// Attribute-mask failures never appear here: they are logged and the mesh
/// is built without a mask.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// The request was cancelled at a suspension point
    #[error("mesh request cancelled")]
    Cancelled,

    /// The elevation provider failed
    #[error("elevation query failed: {0}")]
    Elevation(ProviderError),

    /// Mesh configuration is invalid
    #[error("invalid mesh configuration: {0}")]
    InvalidConfig(#[from] MeshConfigError),

    /// The tile index does not exist in the tiling scheme
    #[error("invalid tile index: {0}")]
    InvalidTileIndex(#[from] TileIndexError),

    /// The sample buffer does not hold `N²` samples
    #[error("expected {expected} elevation samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// The sample buffer pool could not hand out a buffer
    #[error("sample buffer pool error: {0}")]
    Pool(PoolError),
}

impl MeshError {
    /// Returns true if the request was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<ProviderError> for MeshError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Cancelled => Self::Cancelled,
            other => Self::Elevation(other),
        }
    }
}

impl From<PoolError> for MeshError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Cancelled => Self::Cancelled,
            other => Self::Pool(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_maps_through() {
        assert!(MeshError::from(ProviderError::Cancelled).is_cancelled());
        assert!(MeshError::from(PoolError::Cancelled).is_cancelled());
    }

    #[test]
    fn test_provider_failure_is_elevation_error() {
        let err = MeshError::from(ProviderError::Unavailable("dem offline".into()));
        assert_eq!(
            err,
            MeshError::Elevation(ProviderError::Unavailable("dem offline".into()))
        );
        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("dem offline"));
    }

    #[test]
    fn test_pool_closed_is_pool_error() {
        let err = MeshError::from(PoolError::Closed);
        assert_eq!(err, MeshError::Pool(PoolError::Closed));
    }

    #[test]
    fn test_sample_count_message() {
        let err = MeshError::SampleCountMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "expected 4 elevation samples, got 3");
    }
}
