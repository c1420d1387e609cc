//! Tile mesh request orchestration.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::MeshConfig;
use crate::geodesy::Ellipsoid;
use crate::mapper::{TerrainTileIndex, TileMapper};
use crate::mesh::{MeshError, MeshGenerator, TileMesh};
use crate::provider::{ElevationProvider, ProviderError, TileAttributeMask, TileAttributesProvider};
use crate::sample::{populate_sample_points, SampleBufferPool};

/// Serves terrain tile meshes.
///
/// Concurrent requests are bounded by the sample buffer pool: each request
/// holds one buffer from acquisition until its mesh is built, and waits
/// (without spinning) when all buffers are out.
pub struct TileMeshProvider {
    config: MeshConfig,
    mapper: Arc<dyn TileMapper>,
    generator: MeshGenerator,
    pool: SampleBufferPool,
    elevation: Option<Arc<dyn ElevationProvider>>,
    attributes: Option<Arc<dyn TileAttributesProvider>>,
}

impl TileMeshProvider {
    /// Creates a provider with no elevation or attribute source.
    ///
    /// Without an elevation provider every sample sits on the ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        config: MeshConfig,
        mapper: Arc<dyn TileMapper>,
        ellipsoid: Ellipsoid,
    ) -> Result<Self, MeshError> {
        let generator = MeshGenerator::new(&config, ellipsoid)?;
        let pool = SampleBufferPool::new(config.max_concurrent_requests(), config.samples_per_tile());

        debug!(
            samples_per_side = config.samples_per_side(),
            skirt_height = config.skirt_height(),
            water_depth = config.water_depth(),
            max_concurrent_requests = config.max_concurrent_requests(),
            "Tile mesh provider created"
        );

        Ok(Self {
            config,
            mapper,
            generator,
            pool,
            elevation: None,
            attributes: None,
        })
    }

    /// Sets the elevation source.
    pub fn with_elevation_provider(mut self, provider: Arc<dyn ElevationProvider>) -> Self {
        self.elevation = Some(provider);
        self
    }

    /// Sets the tile attribute (water mask) source.
    pub fn with_attributes_provider(mut self, provider: Arc<dyn TileAttributesProvider>) -> Self {
        self.attributes = Some(provider);
        self
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    pub fn mapper(&self) -> &Arc<dyn TileMapper> {
        &self.mapper
    }

    /// The sample buffer pool, for instrumentation.
    pub fn pool(&self) -> &SampleBufferPool {
        &self.pool
    }

    /// Builds the mesh for one tile.
    ///
    /// Cancellation is observed while waiting for a buffer and while
    /// waiting on either provider. Once elevations are in hand the mesh is
    /// built to completion. The sample buffer returns to the pool on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidTileIndex`] before any work if `tile` is not
    ///   part of the mapper's grid
    /// - [`MeshError::Cancelled`] if `cancellation` fires first
    /// - [`MeshError::Elevation`] if the elevation provider fails
    ///
    /// Attribute provider failures are logged and the mesh is built
    /// without a water mask.
    #[instrument(skip(self, cancellation), fields(tile = %tile))]
    pub async fn query_tile_mesh(
        &self,
        tile: TerrainTileIndex,
        cancellation: &CancellationToken,
    ) -> Result<TileMesh, MeshError> {
        let start = Instant::now();
        self.mapper.check_tile(tile)?;

        // Stage 1: Acquire a sample buffer
        let mut buffer = self.pool.acquire(cancellation).await?;
        let waited = start.elapsed();

        // Stage 2: Lay out the sample grid
        populate_sample_points(
            self.mapper.as_ref(),
            tile,
            self.config.samples_per_side(),
            &mut buffer,
        );

        // Stage 3: Fill elevations
        if let Some(elevation) = &self.elevation {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => return Err(MeshError::Cancelled),
                result = elevation.query_point_samples(&mut buffer, cancellation) => result?,
            }
        }

        // Stage 4: Fetch the water mask
        let mask = match &self.attributes {
            Some(attributes) => self.query_mask(attributes.as_ref(), tile, cancellation).await?,
            None => None,
        };

        // Stage 5: Build geometry and UVs
        let mesh = self
            .generator
            .generate(tile, &buffer, mask.as_ref(), self.mapper.as_ref())?;
        drop(buffer);

        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            water_mask = mask.is_some(),
            wait_ms = waited.as_millis() as u64,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tile mesh complete"
        );

        Ok(mesh)
    }

    /// Builds meshes for several tiles concurrently.
    ///
    /// Concurrency is bounded by the pool. Results are returned in the
    /// order of `tiles`; each tile succeeds or fails independently.
    pub async fn query_tile_meshes(
        &self,
        tiles: &[TerrainTileIndex],
        cancellation: &CancellationToken,
    ) -> Vec<Result<TileMesh, MeshError>> {
        join_all(
            tiles
                .iter()
                .map(|&tile| self.query_tile_mesh(tile, cancellation)),
        )
        .await
    }

    /// Queries the water mask, absorbing provider failures.
    async fn query_mask(
        &self,
        attributes: &dyn TileAttributesProvider,
        tile: TerrainTileIndex,
        cancellation: &CancellationToken,
    ) -> Result<Option<TileAttributeMask>, MeshError> {
        let result = tokio::select! {
            biased;
            _ = cancellation.cancelled() => return Err(MeshError::Cancelled),
            result = attributes.query_tile_attributes(tile, cancellation) => result,
        };

        match result {
            Ok(mask) => Ok(Some(mask)),
            Err(ProviderError::Cancelled) => Err(MeshError::Cancelled),
            Err(e) => {
                warn!(
                    provider = attributes.name(),
                    error = %e,
                    "Tile attribute query failed - building mesh without water mask"
                );
                Ok(None)
            }
        }
    }
}

impl fmt::Debug for TileMeshProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileMeshProvider")
            .field("config", &self.config)
            .field("mapper", &self.mapper)
            .field("pool", &self.pool)
            .field("elevation", &self.elevation.as_ref().map(|p| p.name()))
            .field("attributes", &self.attributes.as_ref().map(|p| p.name()))
            .finish()
    }
}
