use crate::dynamics::{BodyHandle, BodySet, ContactHandle, MeshShape, ProxyId, ShapeError};
use crate::math::{Isometry, Point, Real, Vector};
use parry::bounding_volume::Aabb;
use crate::utils::Arena;
use parry::shape::{Ball, Capsule, ConvexPolyhedron, Cuboid, Shape, Triangle};
use std::ops::{Index, IndexMut};

/// The handle of a collider inserted into a [`ColliderSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ColliderHandle(pub(crate) crate::utils::Index);

impl ColliderHandle {
    /// The slot and generation numbers of this handle.
    pub fn into_raw_parts(self) -> (u32, u32) {
        self.0.into_raw_parts()
    }

    /// Rebuilds a handle from its slot and generation numbers.
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self(crate::utils::Index::from_raw_parts(index, generation))
    }
}

/// The type of a collider shape.
///
/// The order of the variants matters: when two shapes collide, the contact always stores the
/// shape with the greatest type as its first shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum ShapeType {
    /// A ball.
    Sphere,
    /// A capsule.
    Capsule,
    /// A convex polyhedron.
    Hull,
    /// A single triangle.
    Triangle,
    /// A triangle mesh.
    Mesh,
}

/// A convex polyhedron.
#[derive(Clone, Debug)]
pub enum Hull {
    /// A box.
    Cuboid(Cuboid),
    /// The convex hull of a point cloud.
    Polyhedron(ConvexPolyhedron),
}

/// The geometry of a collider.
#[derive(Clone, Debug)]
pub enum ColliderShape {
    /// A ball.
    Sphere(Ball),
    /// A capsule.
    Capsule(Capsule),
    /// A convex polyhedron.
    Hull(Hull),
    /// A single triangle.
    Triangle(Triangle),
    /// A triangle mesh.
    Mesh(MeshShape),
}

impl ColliderShape {
    /// A ball.
    pub fn ball(radius: Real) -> Self {
        Self::Sphere(Ball::new(radius))
    }

    /// A capsule defined by the segment `[a, b]` and a radius.
    pub fn capsule(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        Self::Capsule(Capsule::new(a, b, radius))
    }

    /// A capsule aligned with the `y` axis.
    pub fn capsule_y(half_height: Real, radius: Real) -> Self {
        Self::Capsule(Capsule::new_y(half_height, radius))
    }

    /// A box with the given half-extents.
    pub fn cuboid(hx: Real, hy: Real, hz: Real) -> Self {
        Self::Hull(Hull::Cuboid(Cuboid::new(Vector::new(hx, hy, hz))))
    }

    /// The convex hull of a point cloud.
    pub fn convex_hull(points: &[Point<Real>]) -> Result<Self, ShapeError> {
        ConvexPolyhedron::from_convex_hull(points)
            .map(|hull| Self::Hull(Hull::Polyhedron(hull)))
            .ok_or(ShapeError::DegenerateHull)
    }

    /// A triangle.
    pub fn triangle(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Self {
        Self::Triangle(Triangle::new(a, b, c))
    }

    /// A triangle mesh.
    pub fn mesh(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<Self, ShapeError> {
        MeshShape::new(vertices, indices).map(Self::Mesh)
    }

    /// The type tag of this shape.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Sphere(_) => ShapeType::Sphere,
            Self::Capsule(_) => ShapeType::Capsule,
            Self::Hull(_) => ShapeType::Hull,
            Self::Triangle(_) => ShapeType::Triangle,
            Self::Mesh(_) => ShapeType::Mesh,
        }
    }

    /// This shape as a convex shape usable by the narrow-phase, if it isn't a mesh.
    pub fn as_convex(&self) -> Option<&dyn Shape> {
        match self {
            Self::Sphere(s) => Some(s as &dyn Shape),
            Self::Capsule(s) => Some(s as &dyn Shape),
            Self::Hull(Hull::Cuboid(s)) => Some(s as &dyn Shape),
            Self::Hull(Hull::Polyhedron(s)) => Some(s as &dyn Shape),
            Self::Triangle(s) => Some(s as &dyn Shape),
            Self::Mesh(_) => None,
        }
    }

    /// This shape as a mesh.
    pub fn as_mesh(&self) -> Option<&MeshShape> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The bounding box of this shape transformed by `pos`.
    pub fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        match self {
            Self::Mesh(mesh) => mesh.aabb(pos),
            _ => match self.as_convex() {
                Some(shape) => shape.compute_aabb(pos),
                None => unreachable!(),
            },
        }
    }
}

/// An edge of the contact graph, stored by each collider a contact involves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContactEdge {
    /// The contact.
    pub contact: ContactHandle,
    /// The collider at the other end of the contact.
    pub other: ColliderHandle,
}

/// The description of a collider to attach to a body.
#[derive(Clone, Debug)]
pub struct ColliderDesc {
    /// The geometry of the collider.
    pub shape: ColliderShape,
    /// Sensors detect overlaps but never produce a physical response.
    pub sensor: bool,
    /// Arbitrary data attached to the collider.
    pub user_data: u128,
}

impl ColliderDesc {
    /// A solid collider with the given shape.
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            sensor: false,
            user_data: 0,
        }
    }

    /// Sets whether this collider is a sensor.
    pub fn sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    /// Sets the user data of this collider.
    pub fn user_data(mut self, user_data: u128) -> Self {
        self.user_data = user_data;
        self
    }
}

/// A shape attached to a body.
#[derive(Clone, Debug)]
pub struct Collider {
    body: BodyHandle,
    shape: ColliderShape,
    sensor: bool,
    pub(crate) proxy: ProxyId,
    /// Arbitrary data attached to the collider.
    pub user_data: u128,
    contact_edges: Vec<ContactEdge>,
}

impl Collider {
    /// The body this collider is attached to.
    #[inline]
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// The geometry of this collider.
    #[inline]
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// The type of the geometry of this collider.
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Is this collider a sensor?
    #[inline]
    pub fn is_sensor(&self) -> bool {
        self.sensor
    }

    /// The broad-phase proxy of this collider.
    #[inline]
    pub fn proxy(&self) -> ProxyId {
        self.proxy
    }

    /// The contacts involving this collider.
    #[inline]
    pub fn contact_edges(&self) -> &[ContactEdge] {
        &self.contact_edges
    }

    pub(crate) fn push_edge(&mut self, edge: ContactEdge) {
        self.contact_edges.push(edge);
    }

    pub(crate) fn remove_edge(&mut self, contact: ContactHandle) -> ContactEdge {
        let i = self
            .contact_edges
            .iter()
            .position(|e| e.contact == contact);
        match i {
            Some(i) => self.contact_edges.swap_remove(i),
            None => panic!("the contact {:?} isn't linked to this collider", contact),
        }
    }
}

/// The set of all the colliders of a world.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Arena<Collider>,
}

impl ColliderSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a new collider to the body `parent`.
    ///
    /// The collider has no broad-phase proxy until it is registered to a contact manager.
    pub fn insert(
        &mut self,
        desc: ColliderDesc,
        parent: BodyHandle,
        bodies: &mut BodySet,
    ) -> ColliderHandle {
        let collider = Collider {
            body: parent,
            shape: desc.shape,
            sensor: desc.sensor,
            proxy: ProxyId::INVALID,
            user_data: desc.user_data,
            contact_edges: Vec::new(),
        };
        let handle = ColliderHandle(self.colliders.insert(collider));
        bodies[parent].colliders.push(handle);
        handle
    }

    pub(crate) fn remove(
        &mut self,
        handle: ColliderHandle,
        bodies: &mut BodySet,
    ) -> Option<Collider> {
        let collider = self.colliders.remove(handle.0)?;
        if let Some(body) = bodies.get_mut(collider.body) {
            body.colliders.retain(|c| *c != handle);
        }
        Some(collider)
    }

    /// The collider identified by `handle`.
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.0)
    }

    /// Does `handle` identify a collider of this set?
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle.0)
    }

    /// The number of colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterates through all the colliders.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders.iter().map(|(i, c)| (ColliderHandle(i), c))
    }
}

impl Index<ColliderHandle> for ColliderSet {
    type Output = Collider;

    #[track_caller]
    fn index(&self, handle: ColliderHandle) -> &Collider {
        &self.colliders[handle.0]
    }
}

impl IndexMut<ColliderHandle> for ColliderSet {
    #[track_caller]
    fn index_mut(&mut self, handle: ColliderHandle) -> &mut Collider {
        &mut self.colliders[handle.0]
    }
}
