//! Per-pixel tile attribute masks.

use super::{ProviderError, ProviderFuture, TileAttributesProvider};
use crate::mapper::TerrainTileIndex;
use tokio_util::sync::CancellationToken;

const WATER: u8 = 0b0000_0001;

/// Per-pixel classification flags for one tile, row-major with row 0 on
/// the tile's northern edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileAttributeMask {
    width: u32,
    height: u32,
    flags: Vec<u8>,
}

impl TileAttributeMask {
    /// Creates an all-land mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            flags: vec![0; width as usize * height as usize],
        }
    }

    /// Creates a mask where every pixel is water.
    pub fn all_water(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            flags: vec![WATER; width as usize * height as usize],
        }
    }

    /// Creates a mask by evaluating `is_water(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut is_water: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if is_water(x, y) {
                    mask.set_water(x, y, true);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the pixel is classified as water. Pixels outside the
    /// mask are land.
    pub fn is_water(&self, local_pixel_x: u32, local_pixel_y: u32) -> bool {
        self.index(local_pixel_x, local_pixel_y)
            .is_some_and(|i| self.flags[i] & WATER != 0)
    }

    /// Sets or clears the water flag of one pixel. Out-of-range pixels are
    /// ignored.
    pub fn set_water(&mut self, local_pixel_x: u32, local_pixel_y: u32, water: bool) {
        if let Some(i) = self.index(local_pixel_x, local_pixel_y) {
            if water {
                self.flags[i] |= WATER;
            } else {
                self.flags[i] &= !WATER;
            }
        }
    }

    /// Number of water pixels.
    pub fn water_count(&self) -> usize {
        self.flags.iter().filter(|f| **f & WATER != 0).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }
}

/// Returns the same mask for every tile.
#[derive(Debug, Clone)]
pub struct ConstantAttributesProvider {
    mask: TileAttributeMask,
}

impl ConstantAttributesProvider {
    pub fn new(mask: TileAttributeMask) -> Self {
        Self { mask }
    }
}

impl TileAttributesProvider for ConstantAttributesProvider {
    fn query_tile_attributes<'a>(
        &'a self,
        _tile: TerrainTileIndex,
        cancellation: &'a CancellationToken,
    ) -> ProviderFuture<'a, TileAttributeMask> {
        Box::pin(async move {
            if cancellation.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }
            Ok(self.mask.clone())
        })
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mask_is_land() {
        let mask = TileAttributeMask::new(4, 4);
        assert!(!mask.is_water(0, 0));
        assert_eq!(mask.water_count(), 0);
    }

    #[test]
    fn test_all_water() {
        let mask = TileAttributeMask::all_water(3, 2);
        assert!(mask.is_water(2, 1));
        assert_eq!(mask.water_count(), 6);
    }

    #[test]
    fn test_from_fn_left_half() {
        let mask = TileAttributeMask::from_fn(4, 4, |x, _| x < 2);
        assert!(mask.is_water(1, 3));
        assert!(!mask.is_water(2, 3));
        assert_eq!(mask.water_count(), 8);
    }

    #[test]
    fn test_out_of_range_is_land() {
        let mut mask = TileAttributeMask::all_water(2, 2);
        assert!(!mask.is_water(2, 0));
        assert!(!mask.is_water(0, 5));

        // Ignored rather than panicking
        mask.set_water(9, 9, false);
        assert_eq!(mask.water_count(), 4);
    }

    #[test]
    fn test_set_and_clear() {
        let mut mask = TileAttributeMask::new(2, 2);
        mask.set_water(1, 0, true);
        assert!(mask.is_water(1, 0));
        mask.set_water(1, 0, false);
        assert!(!mask.is_water(1, 0));
    }

    #[tokio::test]
    async fn test_constant_provider_returns_mask() {
        let provider = ConstantAttributesProvider::new(TileAttributeMask::all_water(2, 2));
        let mask = provider
            .query_tile_attributes(TerrainTileIndex::new(0, 0, 0), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(mask.water_count(), 4);
    }

    #[tokio::test]
    async fn test_constant_provider_honours_cancellation() {
        let provider = ConstantAttributesProvider::new(TileAttributeMask::new(1, 1));
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = provider
            .query_tile_attributes(TerrainTileIndex::new(0, 0, 0), &cancellation)
            .await;
        assert_eq!(result, Err(ProviderError::Cancelled));
    }
}
