//! Tile index and bounds types.

use crate::geodesy::Geodetic2d;
use std::fmt;
use thiserror::Error;

/// Identifies one tile in the global grid at a level of detail.
///
/// Row 0 is the northernmost row, column 0 the westernmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerrainTileIndex {
    /// Level of detail (0 = coarsest)
    pub level: u32,
    /// Y coordinate (north-south), 0 at north
    pub row: u32,
    /// X coordinate (east-west), 0 at west
    pub column: u32,
}

impl TerrainTileIndex {
    #[inline]
    pub const fn new(level: u32, row: u32, column: u32) -> Self {
        Self { level, row, column }
    }
}

impl fmt::Display for TerrainTileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}/R{}/C{}", self.level, self.row, self.column)
    }
}

/// Geodetic bounding box of a tile, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub const fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// South-west corner.
    pub fn min(&self) -> Geodetic2d {
        Geodetic2d::new(self.south, self.west)
    }

    /// North-east corner.
    pub fn max(&self) -> Geodetic2d {
        Geodetic2d::new(self.north, self.east)
    }

    /// Midpoint in latitude/longitude space.
    pub fn center(&self) -> Geodetic2d {
        Geodetic2d::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }

    pub fn width_degrees(&self) -> f64 {
        self.east - self.west
    }

    pub fn height_degrees(&self) -> f64 {
        self.north - self.south
    }

    /// Returns true if `geo` lies inside the bounds (edges inclusive).
    pub fn contains(&self, geo: Geodetic2d) -> bool {
        (self.south..=self.north).contains(&geo.latitude)
            && (self.west..=self.east).contains(&geo.longitude)
    }
}

/// A tile index that does not exist in the mapper's grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileIndexError {
    #[error("level {level} exceeds maximum supported level {max_level}")]
    LevelOutOfRange { level: u32, max_level: u32 },

    #[error("row {row} out of range at level {level} ({rows} rows)")]
    RowOutOfRange { level: u32, row: u32, rows: u32 },

    #[error("column {column} out of range at level {level} ({columns} columns)")]
    ColumnOutOfRange {
        level: u32,
        column: u32,
        columns: u32,
    },
}
