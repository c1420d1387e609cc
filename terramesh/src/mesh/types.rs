//! The immutable mesh value returned to callers.

use glam::{DQuat, DVec3, Vec2, Vec3};

use crate::mapper::TerrainTileIndex;

/// A renderable terrain tile mesh in its local tangent frame.
///
/// Vertices and normals are expressed relative to [`TileMesh::center`] and
/// rotated into the tile's local frame (`+Y` up, `+Z` north, `+X` east).
/// Use [`TileMesh::to_world`] to recover geocentric positions.
///
/// The first [`TileMesh::grid_vertex_count`] vertices are the `N × N` sample
/// grid in row-major order (north row first); any remaining vertices form
/// the skirt, in clockwise perimeter order starting at the north-west
/// corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMesh {
    tile: TerrainTileIndex,
    center: DVec3,
    extents: DVec3,
    rotation: DQuat,
    vertices: Vec<Vec3>,
    uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    triangles: Vec<u32>,
    grid_vertex_count: usize,
}

impl TileMesh {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        tile: TerrainTileIndex,
        center: DVec3,
        extents: DVec3,
        rotation: DQuat,
        vertices: Vec<Vec3>,
        uvs: Vec<Vec2>,
        normals: Vec<Vec3>,
        triangles: Vec<u32>,
        grid_vertex_count: usize,
    ) -> Self {
        debug_assert_eq!(vertices.len(), normals.len());
        debug_assert_eq!(vertices.len(), uvs.len());
        debug_assert_eq!(triangles.len() % 3, 0);
        Self {
            tile,
            center,
            extents,
            rotation,
            vertices,
            uvs,
            normals,
            triangles,
            grid_vertex_count,
        }
    }

    /// Tile this mesh was generated for.
    pub fn tile(&self) -> TerrainTileIndex {
        self.tile
    }

    /// Mesh origin in the geocentric frame.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Half-size of the grid vertices' bounding box in the local frame.
    ///
    /// Skirt vertices are excluded.
    pub fn extents(&self) -> DVec3 {
        self.extents
    }

    /// Rotation from the local frame to the geocentric frame.
    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Flattened triangle index triples.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Number of `N × N` grid vertices.
    pub fn grid_vertex_count(&self) -> usize {
        self.grid_vertex_count
    }

    pub fn skirt_vertex_count(&self) -> usize {
        self.vertices.len() - self.grid_vertex_count
    }

    /// Grid vertices only.
    pub fn grid_vertices(&self) -> &[Vec3] {
        &self.vertices[..self.grid_vertex_count]
    }

    /// Skirt vertices only (empty when skirts are disabled).
    pub fn skirt_vertices(&self) -> &[Vec3] {
        &self.vertices[self.grid_vertex_count..]
    }

    /// Converts a local-frame position back to the geocentric frame.
    pub fn to_world(&self, local: Vec3) -> DVec3 {
        self.center + self.rotation * local.as_dvec3()
    }

    /// Consumes the mesh, returning its vertex, uv, normal and index arrays.
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Vec2>, Vec<Vec3>, Vec<u32>) {
        (self.vertices, self.uvs, self.normals, self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TileMesh {
        TileMesh::new(
            TerrainTileIndex::new(3, 2, 1),
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(0.5, 0.0, 0.5),
            DQuat::IDENTITY,
            vec![
                Vec3::new(-0.5, 0.0, 0.5),
                Vec3::new(0.5, 0.0, 0.5),
                Vec3::new(-0.5, 0.0, -0.5),
                Vec3::new(0.5, 0.0, -0.5),
            ],
            vec![Vec2::new(0.0, 1.0), Vec2::ONE, Vec2::ZERO, Vec2::new(1.0, 0.0)],
            vec![Vec3::Y; 4],
            vec![0, 1, 3, 0, 3, 2],
            4,
        )
    }

    #[test]
    fn test_into_parts_keeps_arrays_parallel() {
        let mesh = quad();
        let vertices = mesh.vertices().to_vec();

        let (parts_vertices, uvs, normals, triangles) = mesh.into_parts();
        assert_eq!(parts_vertices, vertices);
        assert_eq!(uvs.len(), 4);
        assert_eq!(normals, vec![Vec3::Y; 4]);
        assert_eq!(triangles, vec![0, 1, 3, 0, 3, 2]);
    }

    #[test]
    fn test_to_world_adds_center() {
        let mesh = quad();
        assert_eq!(mesh.to_world(Vec3::ZERO), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.skirt_vertices().is_empty());
    }
}
