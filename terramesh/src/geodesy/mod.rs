//! Ellipsoidal geodesy.
//!
//! Conversions between geodetic coordinates (latitude/longitude/height) and
//! a left-handed geocentric Cartesian frame, plus the local tangent-frame
//! helpers used to re-base tile meshes near the ellipsoid surface.
//!
//! # Frame convention
//!
//! ```text
//!            +Y (north pole)
//!             │
//!             │
//!             └──── +Z (0°N, 90°E)
//!            ╱
//!          +X (0°N, 0°E)
//! ```
//!
//! The frame is left-handed: it is the usual right-handed ECEF frame with
//! its Y and Z axes swapped. A local frame built by
//! [`Ellipsoid::local_rotation`] has `+Y` up, `+Z` north and `+X` east.

mod ellipsoid;
mod types;

pub use ellipsoid::Ellipsoid;
pub use types::{Geodetic2d, Geodetic3d, MAX_LATITUDE, MIN_LATITUDE};
