//! Common types and utilities shared across CLI commands.

use std::ops::Range;

use clap::{Args, ValueEnum};
use glam::Vec2;
use terramesh::config::{ConfigFile, TilingScheme};
use terramesh::geodesy::Ellipsoid;
use terramesh::mesh::TileMesh;

/// Tiling scheme selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SchemeArg {
    /// Slippy-map Web Mercator (one tile at level 0)
    WebMercator,
    /// Equirectangular latitude/longitude grid (2 x 1 tiles at level 0)
    Geographic,
}

impl From<SchemeArg> for TilingScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::WebMercator => TilingScheme::WebMercator,
            SchemeArg::Geographic => TilingScheme::Geographic,
        }
    }
}

/// Mesh settings that override the config file for one invocation.
#[derive(Debug, Clone, Default, Args)]
pub struct MeshOverrides {
    /// Grid samples per tile side (minimum 2)
    #[arg(long)]
    pub samples: Option<usize>,

    /// Skirt height in metres (0 disables skirts)
    #[arg(long)]
    pub skirt: Option<f64>,

    /// Extra drop for water vertices in metres
    #[arg(long)]
    pub water_depth: Option<f64>,

    /// Constant terrain elevation in metres
    #[arg(long, allow_negative_numbers = true)]
    pub elevation: Option<f64>,

    /// Tiling scheme
    #[arg(long, value_enum)]
    pub scheme: Option<SchemeArg>,

    /// Maximum concurrent mesh requests
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

impl MeshOverrides {
    /// Overlay the overrides onto a loaded config.
    pub fn apply(&self, config: &mut ConfigFile) {
        if let Some(samples) = self.samples {
            config.mesh.samples_per_side = samples;
        }
        if let Some(skirt) = self.skirt {
            config.mesh.skirt_height = skirt;
        }
        if let Some(depth) = self.water_depth {
            config.mesh.water_depth = depth;
        }
        if let Some(requests) = self.max_concurrent {
            config.mesh.max_concurrent_requests = requests;
        }
        if let Some(scheme) = self.scheme {
            config.tiling.scheme = scheme.into();
        }
    }
}

/// Parse a tile span: `7` (one tile), `3..7` (exclusive) or `3..=7`
/// (inclusive).
pub fn parse_span(s: &str) -> Result<Range<u32>, String> {
    let number = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| format!("'{}' is not a tile number", v))
    };

    let (start, end) = if let Some((a, b)) = s.split_once("..=") {
        let end = number(b)?
            .checked_add(1)
            .ok_or_else(|| format!("span '{}' is too large", s))?;
        (number(a)?, end)
    } else if let Some((a, b)) = s.split_once("..") {
        (number(a)?, number(b)?)
    } else {
        let single = number(s)?;
        (single, single.saturating_add(1))
    };

    if start >= end {
        return Err(format!("span '{}' is empty", s));
    }
    Ok(start..end)
}

/// Print a human-readable summary of a mesh.
pub fn print_mesh_summary(mesh: &TileMesh, ellipsoid: &Ellipsoid) {
    let origin = ellipsoid.to_geodetic(mesh.center());
    let extents = mesh.extents();
    let (uv_min, uv_max) = mesh.uvs().iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), uv| (min.min(*uv), max.max(*uv)),
    );

    println!("Tile {}", mesh.tile());
    println!(
        "  Vertices:  {} ({} grid, {} skirt)",
        mesh.vertex_count(),
        mesh.grid_vertex_count(),
        mesh.skirt_vertex_count()
    );
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Origin:    {}", origin);
    println!(
        "  Extents:   {:.2} x {:.2} x {:.2} m (east, up, north)",
        extents.x * 2.0,
        extents.y * 2.0,
        extents.z * 2.0
    );
    println!(
        "  UV range:  ({:.4}, {:.4}) .. ({:.4}, {:.4})",
        uv_min.x, uv_min.y, uv_max.x, uv_max.y
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_tile() {
        assert_eq!(parse_span("5").unwrap(), 5..6);
    }

    #[test]
    fn test_parse_exclusive_span() {
        assert_eq!(parse_span("3..7").unwrap(), 3..7);
    }

    #[test]
    fn test_parse_inclusive_span() {
        assert_eq!(parse_span("3..=7").unwrap(), 3..8);
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(parse_span("7..3").is_err());
        assert!(parse_span("4..4").is_err());
        assert!(parse_span("a..b").is_err());
        assert!(parse_span("").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = ConfigFile::default();
        let overrides = MeshOverrides {
            samples: Some(5),
            skirt: Some(0.0),
            scheme: Some(SchemeArg::Geographic),
            ..Default::default()
        };

        overrides.apply(&mut config);

        assert_eq!(config.mesh.samples_per_side, 5);
        assert_eq!(config.mesh.skirt_height, 0.0);
        assert_eq!(config.tiling.scheme, TilingScheme::Geographic);
        assert_eq!(
            config.mesh.water_depth,
            ConfigFile::default().mesh.water_depth
        );
    }
}
