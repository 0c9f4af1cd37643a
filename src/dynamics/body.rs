use crate::dynamics::{ColliderHandle, JointHandle};
use crate::math::{Isometry, Real, Vector};
use crate::utils::Arena;
use std::ops::{Index, IndexMut};

/// The handle of a rigid-body inserted into a [`BodySet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct BodyHandle(pub(crate) crate::utils::Index);

impl BodyHandle {
    /// The slot and generation numbers of this handle.
    pub fn into_raw_parts(self) -> (u32, u32) {
        self.0.into_raw_parts()
    }

    /// Rebuilds a handle from its slot and generation numbers.
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self(crate::utils::Index::from_raw_parts(index, generation))
    }
}

/// How a rigid-body reacts to contacts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum BodyType {
    /// Never moves and never sleeps nor wakes up.
    Static,
    /// Moved by the user only, unaffected by contacts.
    Kinematic,
    /// Moved by the solver.
    Dynamic,
}

/// An edge of the joint graph, stored by each body a joint is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct JointEdge {
    /// The joint.
    pub joint: JointHandle,
    /// The body at the other end of the joint.
    pub other: BodyHandle,
    /// Are the colliders of the two bodies allowed to touch each other?
    pub collide_connected: bool,
}

/// The description of a rigid-body to insert into a world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RigidBodyDesc {
    /// The type of the body.
    pub body_type: BodyType,
    /// The initial position of the body.
    pub position: Isometry<Real>,
    /// Is the body initially awake? Ignored for static bodies.
    pub awake: bool,
    /// Arbitrary data attached to the body.
    pub user_data: u128,
}

impl RigidBodyDesc {
    /// A body of the given type at the origin.
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            awake: true,
            user_data: 0,
        }
    }

    /// A dynamic body at the origin.
    pub fn dynamic() -> Self {
        Self::new(BodyType::Dynamic)
    }

    /// A static body at the origin.
    pub fn fixed() -> Self {
        Self::new(BodyType::Static)
    }

    /// A kinematic body at the origin.
    pub fn kinematic() -> Self {
        Self::new(BodyType::Kinematic)
    }

    /// Sets the initial position of the body.
    pub fn position(mut self, position: Isometry<Real>) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial position of the body from a translation.
    pub fn translation(mut self, translation: Vector<Real>) -> Self {
        self.position = Isometry::translation(translation.x, translation.y, translation.z);
        self
    }

    /// Sets whether the body starts awake.
    pub fn awake(mut self, awake: bool) -> Self {
        self.awake = awake;
        self
    }

    /// Sets the user data of the body.
    pub fn user_data(mut self, user_data: u128) -> Self {
        self.user_data = user_data;
        self
    }
}

/// A rigid-body: a set of colliders moving together.
#[derive(Clone, Debug)]
pub struct RigidBody {
    body_type: BodyType,
    position: Isometry<Real>,
    prev_position: Isometry<Real>,
    moved: bool,
    awake: bool,
    /// Arbitrary data attached to the body.
    pub user_data: u128,
    pub(crate) colliders: Vec<ColliderHandle>,
    pub(crate) joint_edges: Vec<JointEdge>,
}

impl RigidBody {
    /// Builds a body from its description.
    pub fn new(desc: &RigidBodyDesc) -> Self {
        Self {
            body_type: desc.body_type,
            position: desc.position,
            prev_position: desc.position,
            moved: false,
            awake: desc.awake && desc.body_type != BodyType::Static,
            user_data: desc.user_data,
            colliders: Vec::new(),
            joint_edges: Vec::new(),
        }
    }

    /// The type of this body.
    #[inline]
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Is this body static?
    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Is this body dynamic?
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// The current position of this body.
    #[inline]
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// The position of this body before its last move.
    #[inline]
    pub fn prev_position(&self) -> &Isometry<Real> {
        &self.prev_position
    }

    /// The translation of this body since its last move.
    pub fn displacement(&self) -> Vector<Real> {
        self.position.translation.vector - self.prev_position.translation.vector
    }

    /// Was this body moved since the last step?
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Is this body awake?
    #[inline]
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Is this body awake and non-static?
    #[inline]
    pub fn is_active(&self) -> bool {
        self.awake && !self.is_static()
    }

    /// Wakes up or puts this body to sleep. This has no effect on static bodies.
    pub fn set_awake(&mut self, awake: bool) {
        if !self.is_static() {
            self.awake = awake;
        }
    }

    /// The colliders attached to this body.
    pub fn colliders(&self) -> &[ColliderHandle] {
        &self.colliders
    }

    /// The joints attached to this body.
    pub fn joint_edges(&self) -> &[JointEdge] {
        &self.joint_edges
    }

    pub(crate) fn set_position(&mut self, position: Isometry<Real>) {
        if !self.moved {
            self.prev_position = self.position;
        }
        self.position = position;
        self.moved = true;
    }

    pub(crate) fn finalize_move(&mut self) {
        self.prev_position = self.position;
        self.moved = false;
    }

    /// Can the colliders of this body touch the colliders of `other`?
    ///
    /// At least one of the two bodies must be dynamic and no joint attaching them may forbid
    /// the collision.
    pub fn should_collide(
        &self,
        self_handle: BodyHandle,
        other: &RigidBody,
        other_handle: BodyHandle,
    ) -> bool {
        if self_handle == other_handle {
            return false;
        }

        if !self.is_dynamic() && !other.is_dynamic() {
            return false;
        }

        !self
            .joint_edges
            .iter()
            .any(|edge| edge.other == other_handle && !edge.collide_connected)
    }
}

/// The set of all the rigid-bodies of a world.
///
/// The handle of a removed body is never valid again, even once its slot is reused.
#[derive(Clone, Debug, Default)]
pub struct BodySet {
    bodies: Arena<RigidBody>,
}

impl BodySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a body built from its description.
    pub fn insert(&mut self, desc: &RigidBodyDesc) -> BodyHandle {
        BodyHandle(self.bodies.insert(RigidBody::new(desc)))
    }

    pub(crate) fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle.0)
    }

    /// The body identified by `handle`.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// The body identified by `handle`.
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    /// Does `handle` identify a body of this set?
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// The number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterates through all the bodies.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter().map(|(i, b)| (BodyHandle(i), b))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.bodies.iter_mut().map(|(i, b)| (BodyHandle(i), b))
    }

    /// Can the colliders of the bodies `a` and `b` touch each other?
    pub fn should_collide(&self, a: BodyHandle, b: BodyHandle) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(body_a), Some(body_b)) => body_a.should_collide(a, body_b, b),
            _ => false,
        }
    }
}

impl Index<BodyHandle> for BodySet {
    type Output = RigidBody;

    #[track_caller]
    fn index(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.0]
    }
}

impl IndexMut<BodyHandle> for BodySet {
    #[track_caller]
    fn index_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }
}
