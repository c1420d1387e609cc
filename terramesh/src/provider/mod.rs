//! Elevation and tile-attribute provider interfaces.
//!
//! The mesh service depends only on these traits; where elevations and
//! water masks actually come from (a DEM on disk, a web service, a
//! procedural generator) is up to the implementor.
//!
//! Both traits return boxed futures so implementations can be stored as
//! `Arc<dyn ElevationProvider>` / `Arc<dyn TileAttributesProvider>`.

mod attributes;
mod elevation;
mod types;

pub use attributes::{ConstantAttributesProvider, TileAttributeMask};
pub use elevation::{ConstantElevationProvider, GridElevationProvider, DEFAULT_BATCH_SIZE};
pub use types::{ElevationProvider, ProviderError, ProviderFuture, TileAttributesProvider};
