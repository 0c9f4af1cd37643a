use crate::dynamics::ShapeError;
use crate::math::{Isometry, Point, Real, Vector};
use parry::bounding_volume::Aabb;
use parry::shape::{Shape, TriMesh, Triangle};

/// A triangle mesh with a non-uniform scale.
///
/// The scale is baked into the vertices of the underlying [`TriMesh`], whose bounding volume
/// hierarchy finds the triangles overlapping a box.
#[derive(Clone, Debug)]
pub struct MeshShape {
    trimesh: TriMesh,
    scale: Vector<Real>,
    local_aabb: Aabb,
}

impl MeshShape {
    /// Creates a mesh from its vertices and the vertex indices of its triangles.
    ///
    /// ```
    /// use rebound3d::dynamics::MeshShape;
    /// use rebound3d::math::Point;
    ///
    /// let vertices = vec![
    ///     Point::new(-1.0, 0.0, -1.0),
    ///     Point::new(1.0, 0.0, -1.0),
    ///     Point::new(0.0, 0.0, 1.0),
    /// ];
    /// let mesh = MeshShape::new(vertices, vec![[0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.num_triangles(), 1);
    /// assert!(MeshShape::new(vec![], vec![]).is_err());
    /// ```
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<Self, ShapeError> {
        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(vertex) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(ShapeError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    vertex: *vertex,
                });
            }
        }

        let trimesh = TriMesh::new(vertices, indices)?;
        let local_aabb = trimesh.compute_local_aabb();
        Ok(Self {
            trimesh,
            scale: Vector::repeat(1.0),
            local_aabb,
        })
    }

    /// Changes the scale of this mesh, relative to the vertices it was created with.
    pub fn with_scale(self, scale: Vector<Real>) -> Result<Self, ShapeError> {
        if scale.iter().any(|s| *s == 0.0) {
            return Err(ShapeError::ZeroScale);
        }

        let vertices = self
            .trimesh
            .vertices()
            .iter()
            .map(|pt| Point::from(pt.coords.component_div(&self.scale).component_mul(&scale)))
            .collect();
        let trimesh = TriMesh::new(vertices, self.trimesh.indices().to_vec())?;
        let local_aabb = trimesh.compute_local_aabb();

        Ok(Self {
            trimesh,
            scale,
            local_aabb,
        })
    }

    /// The underlying triangle mesh, scale included.
    pub fn trimesh(&self) -> &TriMesh {
        &self.trimesh
    }

    /// The scaled vertices of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        self.trimesh.vertices()
    }

    /// The vertex indices of the triangles of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        self.trimesh.indices()
    }

    /// The scale of this mesh.
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }

    /// The number of triangles of this mesh.
    pub fn num_triangles(&self) -> usize {
        self.trimesh.num_triangles()
    }

    /// The `i`-th triangle of this mesh, with the scale applied.
    pub fn triangle(&self, i: u32) -> Triangle {
        self.trimesh.triangle(i)
    }

    /// The bounding box of this mesh in its local frame.
    pub fn local_aabb(&self) -> &Aabb {
        &self.local_aabb
    }

    /// The bounding box of this mesh transformed by `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.local_aabb.transform_by(pos)
    }

    /// The sorted indices of the triangles whose bounding box intersects `aabb`, given in the
    /// local frame of this mesh.
    pub fn triangles_intersecting(&self, aabb: &Aabb) -> Vec<u32> {
        let mut result: Vec<u32> = self.trimesh.bvh().intersect_aabb(aabb).collect();
        result.sort_unstable();
        result.dedup();
        result
    }
}
