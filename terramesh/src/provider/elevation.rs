//! Bundled elevation providers.

use super::{ElevationProvider, ProviderError, ProviderFuture};
use crate::geodesy::Geodetic2d;
use crate::mapper::GeoBounds;
use crate::sample::ElevationPointSample;
use tokio_util::sync::CancellationToken;

/// Default number of samples filled between cancellation checks.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Reports the same elevation everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantElevationProvider {
    elevation: f64,
}

impl ConstantElevationProvider {
    pub fn new(elevation: f64) -> Self {
        Self { elevation }
    }
}

impl ElevationProvider for ConstantElevationProvider {
    fn query_point_samples<'a>(
        &'a self,
        samples: &'a mut [ElevationPointSample],
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            if cancellation.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }
            for sample in samples.iter_mut() {
                sample.elevation = self.elevation;
            }
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Bilinearly samples a regular latitude/longitude elevation grid.
///
/// Posts are row-major with row 0 on the grid's northern edge and the
/// first/last posts lying exactly on the bounds. Points outside the bounds
/// get the fill value.
#[derive(Debug, Clone)]
pub struct GridElevationProvider {
    bounds: GeoBounds,
    width: usize,
    height: usize,
    posts: Vec<f32>,
    fill_value: f64,
    batch_size: usize,
}

impl GridElevationProvider {
    /// Creates a provider over `posts`, a `width × height` elevation grid.
    pub fn new(
        bounds: GeoBounds,
        width: usize,
        height: usize,
        posts: Vec<f32>,
    ) -> Result<Self, ProviderError> {
        if width < 2 || height < 2 {
            return Err(ProviderError::Backend(format!(
                "elevation grid must be at least 2×2, got {}×{}",
                width, height
            )));
        }
        if posts.len() != width * height {
            return Err(ProviderError::Backend(format!(
                "elevation grid has {} posts, expected {}×{}",
                posts.len(),
                width,
                height
            )));
        }
        if bounds.width_degrees() <= 0.0 || bounds.height_degrees() <= 0.0 {
            return Err(ProviderError::Backend(
                "elevation grid bounds are empty".to_string(),
            ));
        }

        Ok(Self {
            bounds,
            width,
            height,
            posts,
            fill_value: 0.0,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Elevation reported outside the grid bounds.
    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Number of samples filled between cancellation checks.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Elevation at `geo`, interpolated between the four surrounding posts.
    pub fn elevation_at(&self, geo: Geodetic2d) -> f64 {
        let geo = if self.bounds.contains(geo) {
            geo
        } else {
            geo.normalized()
        };
        if !self.bounds.contains(geo) {
            return self.fill_value;
        }

        let gx = (geo.longitude - self.bounds.west) / self.bounds.width_degrees()
            * (self.width - 1) as f64;
        let gy = (self.bounds.north - geo.latitude) / self.bounds.height_degrees()
            * (self.height - 1) as f64;

        let x0 = (gx.floor() as usize).min(self.width - 2);
        let y0 = (gy.floor() as usize).min(self.height - 2);
        let tx = gx - x0 as f64;
        let ty = gy - y0 as f64;

        let post = |x: usize, y: usize| self.posts[y * self.width + x] as f64;
        let top = post(x0, y0) * (1.0 - tx) + post(x0 + 1, y0) * tx;
        let bottom = post(x0, y0 + 1) * (1.0 - tx) + post(x0 + 1, y0 + 1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

impl ElevationProvider for GridElevationProvider {
    fn query_point_samples<'a>(
        &'a self,
        samples: &'a mut [ElevationPointSample],
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            for batch in samples.chunks_mut(self.batch_size) {
                if cancellation.is_cancelled() {
                    return Err(ProviderError::Cancelled);
                }
                for sample in batch {
                    sample.elevation = self.elevation_at(sample.position);
                }
                tokio::task::yield_now().await;
            }
            Ok(())
        })
    }

    fn name(&self) -> &str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> GridElevationProvider {
        // 3×3 posts over 0..2° × 0..2°, elevation = 100 × column
        let posts = vec![0.0, 100.0, 200.0, 0.0, 100.0, 200.0, 0.0, 100.0, 200.0];
        GridElevationProvider::new(GeoBounds::new(0.0, 0.0, 2.0, 2.0), 3, 3, posts).unwrap()
    }

    #[test]
    fn test_grid_posts_are_exact() {
        let grid = ramp_grid();
        assert_eq!(grid.elevation_at(Geodetic2d::new(2.0, 0.0)), 0.0);
        assert_eq!(grid.elevation_at(Geodetic2d::new(0.0, 2.0)), 200.0);
    }

    #[test]
    fn test_grid_interpolates() {
        let grid = ramp_grid();
        let elevation = grid.elevation_at(Geodetic2d::new(1.3, 0.5));
        assert!((elevation - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_fill_outside_bounds() {
        let grid = ramp_grid().with_fill_value(-1.0);
        assert_eq!(grid.elevation_at(Geodetic2d::new(5.0, 1.0)), -1.0);
    }

    #[test]
    fn test_grid_wrapped_longitude() {
        let posts = vec![10.0, 10.0, 20.0, 20.0];
        let grid =
            GridElevationProvider::new(GeoBounds::new(-10.0, -180.0, 10.0, -170.0), 2, 2, posts)
                .unwrap();

        // 185°E is 175°W
        let elevation = grid.elevation_at(Geodetic2d::new(0.0, 185.0));
        assert!((elevation - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_rejects_bad_dimensions() {
        let result = GridElevationProvider::new(GeoBounds::new(0.0, 0.0, 1.0, 1.0), 2, 2, vec![0.0]);
        assert!(matches!(result, Err(ProviderError::Backend(_))));

        let result =
            GridElevationProvider::new(GeoBounds::new(0.0, 0.0, 1.0, 1.0), 1, 4, vec![0.0; 4]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_grid_fills_samples_in_place() {
        let grid = ramp_grid().with_batch_size(2);
        let mut samples = vec![
            ElevationPointSample::new(Geodetic2d::new(1.0, 0.0)),
            ElevationPointSample::new(Geodetic2d::new(1.0, 1.0)),
            ElevationPointSample::new(Geodetic2d::new(1.0, 2.0)),
        ];

        grid.query_point_samples(&mut samples, &CancellationToken::new())
            .await
            .unwrap();

        let elevations: Vec<f64> = samples.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![0.0, 100.0, 200.0]);
        assert_eq!(samples[1].position, Geodetic2d::new(1.0, 1.0));
    }

    #[tokio::test]
    async fn test_grid_cancelled() {
        let grid = ramp_grid();
        let mut samples = vec![ElevationPointSample::default(); 4];
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = grid.query_point_samples(&mut samples, &cancellation).await;
        assert_eq!(result, Err(ProviderError::Cancelled));
    }

    #[tokio::test]
    async fn test_constant_provider() {
        let provider = ConstantElevationProvider::new(321.0);
        let mut samples = vec![ElevationPointSample::default(); 3];

        provider
            .query_point_samples(&mut samples, &CancellationToken::new())
            .await
            .unwrap();
        assert!(samples.iter().all(|s| s.elevation == 321.0));
    }
}
