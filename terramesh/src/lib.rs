//! terramesh - terrain tile mesh synthesis
//!
//! Turns a `(level, row, column)` tile of geodetic elevation samples into a
//! renderable mesh: vertices and normals in a local tangent frame, a skirt
//! that hides seams against neighbouring tiles, triangle indices and
//! date-line aware texture coordinates.
//!
//! # High-Level API
//!
//! The [`service`] module serves meshes asynchronously:
//!
//! ```ignore
//! use std::sync::Arc;
//! use terramesh::config::ConfigFile;
//! use terramesh::mapper::TerrainTileIndex;
//! use terramesh::service::TileMeshProvider;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ConfigFile::load()?;
//! let provider = TileMeshProvider::new(
//!     config.mesh_config(),
//!     config.tile_mapper(),
//!     config.ellipsoid(),
//! )?;
//!
//! let mesh = provider
//!     .query_tile_mesh(TerrainTileIndex::new(12, 1500, 2100), &CancellationToken::new())
//!     .await?;
//! ```
//!
//! # Components
//!
//! - [`geodesy`]: ellipsoid and geodetic/geocentric conversions
//! - [`mapper`]: tiling schemes between tile, pixel and geodetic space
//! - [`sample`]: sample grids and the bounded sample buffer pool
//! - [`provider`]: elevation and tile attribute sources
//! - [`mesh`]: mesh, skirt and UV generation

pub mod config;
pub mod geodesy;
pub mod logging;
pub mod mapper;
pub mod mesh;
pub mod provider;
pub mod sample;
pub mod service;

/// Version of the terramesh library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
