//! Async tile mesh service.
//!
//! [`TileMeshProvider`] is the public entry point: it owns the sample
//! buffer pool, wires the tile mapper and the elevation/attribute
//! providers into the mesh generator, and serves one mesh per request.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terramesh::config::MeshConfig;
//! use terramesh::geodesy::Ellipsoid;
//! use terramesh::mapper::{TerrainTileIndex, WebMercatorTileMapper};
//! use terramesh::provider::ConstantElevationProvider;
//! use terramesh::service::TileMeshProvider;
//! use tokio_util::sync::CancellationToken;
//!
//! let provider = TileMeshProvider::new(
//!     MeshConfig::default(),
//!     Arc::new(WebMercatorTileMapper::default()),
//!     Ellipsoid::wgs84(),
//! )?
//! .with_elevation_provider(Arc::new(ConstantElevationProvider::new(120.0)));
//!
//! let mesh = provider
//!     .query_tile_mesh(TerrainTileIndex::new(12, 1500, 2100), &CancellationToken::new())
//!     .await?;
//! ```

mod mesh_provider;

pub use mesh_provider::TileMeshProvider;
