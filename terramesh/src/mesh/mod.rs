//! Terrain tile mesh synthesis.
//!
//! [`MeshGenerator`] turns a filled `N × N` elevation sample grid into a
//! [`TileMesh`]: vertices and normals in a local tangent frame centred on
//! the tile, a skirt hanging from the tile perimeter, triangle indices and
//! texture coordinates from [`UvCalculator`].
//!
//! Vertex layout for `N = 3` with skirts enabled:
//!
//! ```text
//!   grid (row-major)        skirt (clockwise from NW)
//!
//!   0 ─ 1 ─ 2               9 ─ 10 ─ 11
//!   │   │   │               │         │
//!   3 ─ 4 ─ 5               16        12
//!   │   │   │               │         │
//!   6 ─ 7 ─ 8               15 ─ 14 ─ 13
//! ```

mod error;
mod generator;
mod skirt;
mod types;
mod uv;

pub use error::MeshError;
pub use generator::MeshGenerator;
pub use skirt::{perimeter, perimeter_len};
pub use types::TileMesh;
pub use uv::{GridEdge, UvCalculator};
