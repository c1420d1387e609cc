//! Regular sample grid generation.

use super::ElevationPointSample;
use crate::mapper::{TerrainTileIndex, TileMapper};

/// Global pixel coordinate of grid sample `(row, col)` in an `n × n` grid
/// spanning `tile`.
///
/// Samples sit on the tile's pixel footprint edges inclusive, so adjacent
/// tiles share their border samples.
pub fn sample_pixel_xy(
    mapper: &dyn TileMapper,
    tile: TerrainTileIndex,
    samples_per_side: usize,
    row: usize,
    col: usize,
) -> (f64, f64) {
    let (origin_x, origin_y) = mapper.tile_to_pixel_xy(tile);
    let step = (samples_per_side.max(2) - 1) as f64;
    let width = mapper.tile_pixel_width(tile.level) as f64;
    let height = mapper.tile_pixel_height(tile.level) as f64;
    (
        origin_x + col as f64 / step * width,
        origin_y + row as f64 / step * height,
    )
}

/// Writes the sample positions for `tile` into `samples` in row-major
/// order, row 0 along the tile's northern edge. Elevations are reset to 0.
///
/// `samples` must hold exactly `samples_per_side²` entries.
pub fn populate_sample_points(
    mapper: &dyn TileMapper,
    tile: TerrainTileIndex,
    samples_per_side: usize,
    samples: &mut [ElevationPointSample],
) {
    debug_assert_eq!(samples.len(), samples_per_side * samples_per_side);

    for (index, sample) in samples.iter_mut().enumerate() {
        let row = index / samples_per_side;
        let col = index % samples_per_side;
        let (x, y) = sample_pixel_xy(mapper, tile, samples_per_side, row, col);
        *sample = ElevationPointSample::new(mapper.pixel_xy_to_geo(tile.level, x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::GeographicTileMapper;

    #[test]
    fn test_grid_covers_tile_bounds() {
        let mapper = GeographicTileMapper::default();
        let tile = TerrainTileIndex::new(3, 2, 5);
        let bounds = mapper.tile_to_bounds(tile);
        let mut samples = vec![ElevationPointSample::default(); 9];

        populate_sample_points(&mapper, tile, 3, &mut samples);

        assert_eq!(samples[0].position.latitude, bounds.north);
        assert_eq!(samples[0].position.longitude, bounds.west);
        assert_eq!(samples[8].position.latitude, bounds.south);
        assert_eq!(samples[8].position.longitude, bounds.east);
        assert_eq!(samples[4].position, bounds.center());
    }

    #[test]
    fn test_grid_is_row_major_north_first() {
        let mapper = GeographicTileMapper::default();
        let tile = TerrainTileIndex::new(2, 1, 1);
        let mut samples = vec![ElevationPointSample::default(); 16];

        populate_sample_points(&mapper, tile, 4, &mut samples);

        // Along a row: same latitude, longitude increasing
        assert_eq!(samples[0].position.latitude, samples[3].position.latitude);
        assert!(samples[1].position.longitude > samples[0].position.longitude);
        // Down a column: same longitude, latitude decreasing
        assert_eq!(samples[0].position.longitude, samples[12].position.longitude);
        assert!(samples[4].position.latitude < samples[0].position.latitude);
    }

    #[test]
    fn test_populate_resets_elevation() {
        let mapper = GeographicTileMapper::default();
        let mut samples = vec![ElevationPointSample::default(); 4];
        for sample in &mut samples {
            sample.elevation = 123.0;
        }

        populate_sample_points(&mapper, TerrainTileIndex::new(0, 0, 0), 2, &mut samples);

        assert!(samples.iter().all(|s| s.elevation == 0.0));
    }
}
