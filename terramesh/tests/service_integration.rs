//! Integration tests for the tile mesh service.
//!
//! These tests drive `TileMeshProvider` through its public API and verify:
//! - The sample buffer pool bounds concurrent requests
//! - Cancellation never leaks pool buffers
//! - Provider failures propagate (elevation) or degrade (attributes)

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use terramesh::config::MeshConfig;
use terramesh::geodesy::Ellipsoid;
use terramesh::mapper::{TerrainTileIndex, WebMercatorTileMapper};
use terramesh::mesh::MeshError;
use terramesh::provider::{ElevationProvider, ProviderError, ProviderFuture};
use terramesh::sample::ElevationPointSample;
use terramesh::service::TileMeshProvider;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

// =============================================================================
// Test Helpers
// =============================================================================

/// Elevation provider that blocks each query until the test opens the gate.
struct GatedElevationProvider {
    started: AtomicUsize,
    finished: AtomicUsize,
    gate: Semaphore,
}

impl GatedElevationProvider {
    fn new() -> Self {
        Self {
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
            gate: Semaphore::new(0),
        }
    }

    fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    /// Lets `count` waiting queries complete.
    fn open(&self, count: usize) {
        self.gate.add_permits(count);
    }
}

impl ElevationProvider for GatedElevationProvider {
    fn query_point_samples<'a>(
        &'a self,
        samples: &'a mut [ElevationPointSample],
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::select! {
                _ = cancellation.cancelled() => return Err(ProviderError::Cancelled),
                permit = self.gate.acquire() => {
                    permit
                        .map_err(|e| ProviderError::Backend(e.to_string()))?
                        .forget();
                }
            }
            for sample in samples.iter_mut() {
                sample.elevation = 15.0;
            }
            self.finished.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "gated"
    }
}

fn gated_provider(
    max_concurrent: usize,
) -> (Arc<TileMeshProvider>, Arc<GatedElevationProvider>) {
    let elevation = Arc::new(GatedElevationProvider::new());
    let config = MeshConfig::new()
        .with_samples_per_side(5)
        .with_skirt_height(25.0)
        .with_max_concurrent_requests(max_concurrent);
    let provider = TileMeshProvider::new(
        config,
        Arc::new(WebMercatorTileMapper::default()),
        Ellipsoid::wgs84(),
    )
    .unwrap()
    .with_elevation_provider(elevation.clone());
    (Arc::new(provider), elevation)
}

fn spawn_request(
    provider: &Arc<TileMeshProvider>,
    tile: TerrainTileIndex,
    token: &CancellationToken,
) -> tokio::task::JoinHandle<Result<terramesh::mesh::TileMesh, MeshError>> {
    let provider = Arc::clone(provider);
    let token = token.clone();
    tokio::spawn(async move { provider.query_tile_mesh(tile, &token).await })
}

/// Polls `condition` until it holds, failing the test after one second.
async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

// =============================================================================
// Concurrency bound
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_bounds_concurrent_requests() {
    let (provider, elevation) = gated_provider(2);
    let token = CancellationToken::new();

    let handles: Vec<_> = (0..3)
        .map(|i| spawn_request(&provider, TerrainTileIndex::new(12, 1500, 2100 + i), &token))
        .collect();

    // Two requests hold buffers and block in the provider.
    wait_until(|| elevation.started() == 2).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(elevation.started(), 2, "third request must wait for a buffer");
    assert_eq!(provider.pool().in_flight(), 2);
    assert_eq!(provider.pool().available(), 0);
    assert!(handles.iter().all(|h| !h.is_finished()));

    // Releasing one request admits the third.
    elevation.open(1);
    wait_until(|| elevation.started() == 3).await;
    assert!(elevation.finished() >= 1);

    elevation.open(2);
    for handle in handles {
        let mesh = handle.await.unwrap().unwrap();
        assert_eq!(mesh.vertex_count(), 25 + 16);
    }

    assert_eq!(provider.pool().peak_in_flight(), 2);
    assert_eq!(provider.pool().allocated_buffers(), 2);
    assert_eq!(provider.pool().available(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_batch_never_exceeds_pool() {
    let (provider, elevation) = gated_provider(3);
    elevation.open(usize::from(u16::MAX));

    let tiles: Vec<_> = (0..12)
        .map(|i| TerrainTileIndex::new(10, 380 + i / 4, 300 + i % 4))
        .collect();
    let results = provider
        .query_tile_meshes(&tiles, &CancellationToken::new())
        .await;

    assert_eq!(results.len(), tiles.len());
    for (tile, result) in tiles.iter().zip(&results) {
        assert_eq!(result.as_ref().unwrap().tile(), *tile);
    }
    assert!(provider.pool().peak_in_flight() <= 3);
    assert_eq!(provider.pool().allocated_buffers(), 3);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn test_cancel_before_acquire_leaves_pool_unchanged() {
    let (provider, elevation) = gated_provider(2);
    let token = CancellationToken::new();
    token.cancel();

    let before = provider.pool().available();
    let err = provider
        .query_tile_mesh(TerrainTileIndex::new(12, 1500, 2100), &token)
        .await
        .unwrap_err();

    assert_eq!(err, MeshError::Cancelled);
    assert_eq!(provider.pool().available(), before);
    assert_eq!(elevation.started(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_while_waiting_for_buffer() {
    let (provider, elevation) = gated_provider(1);
    let holder_token = CancellationToken::new();
    let waiter_token = CancellationToken::new();

    let holder = spawn_request(&provider, TerrainTileIndex::new(12, 1500, 2100), &holder_token);
    wait_until(|| elevation.started() == 1).await;

    let waiter = spawn_request(&provider, TerrainTileIndex::new(12, 1500, 2101), &waiter_token);
    tokio::time::sleep(Duration::from_millis(20)).await;
    waiter_token.cancel();

    let err = waiter.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(elevation.started(), 1);

    elevation.open(1);
    holder.await.unwrap().unwrap();
    assert_eq!(provider.pool().available(), 1);
    assert_eq!(provider.pool().in_flight(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_inside_provider_releases_buffer() {
    let (provider, elevation) = gated_provider(2);
    let token = CancellationToken::new();

    let handle = spawn_request(&provider, TerrainTileIndex::new(12, 1500, 2100), &token);
    wait_until(|| elevation.started() == 1).await;
    assert_eq!(provider.pool().available(), 1);

    token.cancel();

    let err = handle.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(provider.pool().available(), 2);
    assert_eq!(elevation.finished(), 0);
}
