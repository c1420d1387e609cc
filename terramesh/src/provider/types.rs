//! Provider types and traits

use super::TileAttributeMask;
use crate::mapper::TerrainTileIndex;
use crate::sample::ElevationPointSample;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The query observed cancellation and stopped early
    #[error("query cancelled")]
    Cancelled,

    /// The backing source could not be reached
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Requested location is outside the provider's coverage
    #[error("no coverage for tile {0}")]
    OutOfCoverage(TerrainTileIndex),

    /// Provider-specific failure
    #[error("provider error: {0}")]
    Backend(String),
}

/// Boxed future returned by provider queries.
pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Source of elevation values for batches of geodetic points.
///
/// # Mutation contract
///
/// `query_point_samples` receives the caller's sample slice mutably and
/// writes each elevation in place, positionally aligned with the input.
/// This is the one place where the mesh pipeline shares a buffer for
/// writing; it keeps batch queries zero-copy. Implementations must not
/// reorder samples or touch their positions.
///
/// Implementations should check `cancellation` between batches and return
/// [`ProviderError::Cancelled`] when it fires. Partially written elevations
/// are discarded by the caller in that case.
pub trait ElevationProvider: Send + Sync {
    /// Fills in `elevation` for every sample.
    fn query_point_samples<'a>(
        &'a self,
        samples: &'a mut [ElevationPointSample],
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, ()>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}

/// Source of per-pixel tile classification masks.
pub trait TileAttributesProvider: Send + Sync {
    /// Fetches the attribute mask for `tile`.
    fn query_tile_attributes<'a>(
        &'a self,
        tile: TerrainTileIndex,
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, TileAttributeMask>;

    /// Returns the provider's name for logging and identification.
    fn name(&self) -> &str;
}
