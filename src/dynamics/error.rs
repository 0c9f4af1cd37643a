use crate::dynamics::{BodyHandle, ColliderHandle, JointHandle};
use parry::shape::TriMeshBuilderError;

/// Errors that can occur while building a collider shape.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// A mesh must contain at least one triangle.
    #[error("a mesh must contain at least one triangle.")]
    EmptyMesh,
    /// A triangle references a vertex that doesn't exist.
    #[error("the triangle {triangle} references the vertex {vertex} which does not exist.")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
    /// One of the components of a mesh scale is zero.
    #[error("the scale of a mesh must not have any zero component.")]
    ZeroScale,
    /// The points given to build a convex hull are degenerate (too few, or all coplanar).
    #[error("the convex hull of the given points is degenerate.")]
    DegenerateHull,
    /// The triangle mesh could not be built.
    #[error("invalid mesh: {0}")]
    InvalidMesh(TriMeshBuilderError),
}

impl From<TriMeshBuilderError> for ShapeError {
    fn from(err: TriMeshBuilderError) -> Self {
        match err {
            TriMeshBuilderError::EmptyIndices => ShapeError::EmptyMesh,
            err => ShapeError::InvalidMesh(err),
        }
    }
}

/// Errors returned by the world when it is given inconsistent handles.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum WorldError {
    /// The body handle doesn't refer to any body of the world.
    #[error("the body {0:?} does not exist.")]
    InvalidBody(BodyHandle),
    /// The collider handle doesn't refer to any collider of the world.
    #[error("the collider {0:?} does not exist.")]
    InvalidCollider(ColliderHandle),
    /// The joint handle doesn't refer to any joint of the world.
    #[error("the joint {0:?} does not exist.")]
    InvalidJoint(JointHandle),
    /// A joint was attached twice to the same body.
    #[error("a joint cannot attach the body {0:?} to itself.")]
    SelfJoint(BodyHandle),
    /// A shape could not be built.
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),
}
