//! Elevation point samples and the pooled buffers that carry them.
//!
//! A mesh request samples its tile on a regular `N × N` grid. The grid is
//! generated into a buffer borrowed from a [`SampleBufferPool`], filled in
//! place by an elevation provider, consumed by the mesh generator and then
//! handed back to the pool.

mod grid;
mod pool;

pub use grid::{populate_sample_points, sample_pixel_xy};
pub use pool::{PoolError, SampleBuffer, SampleBufferPool};

use crate::geodesy::Geodetic2d;

/// A geodetic position and the elevation sampled there, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElevationPointSample {
    pub position: Geodetic2d,
    pub elevation: f64,
}

impl ElevationPointSample {
    /// Creates a sample at `position` with zero elevation.
    #[inline]
    pub const fn new(position: Geodetic2d) -> Self {
        Self {
            position,
            elevation: 0.0,
        }
    }

    #[inline]
    pub const fn with_elevation(position: Geodetic2d, elevation: f64) -> Self {
        Self {
            position,
            elevation,
        }
    }
}
