use super::convex_contact::{evaluate_one_shot, intersection_test};
use super::{ConvexContact, Manifold, MeshContact};
use crate::dynamics::{
    BodySet, Collider, ColliderHandle, ColliderSet, ContactEdge, ContactListener, ContactSettings,
    MeshShape, ShapeType,
};
use crate::utils::{BlockAllocator, BlockHandle};
use parry::shape::Shape;
use smallvec::SmallVec;
use std::mem::size_of;

/// The handle of a contact owned by a contact manager.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ContactHandle(pub(crate) BlockHandle);

impl ContactHandle {
    /// The block of the contact allocator holding this contact.
    pub fn block(self) -> BlockHandle {
        self.0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Flags describing the state of a contact.
pub struct ContactFlags(u8);

bitflags::bitflags! {
    impl ContactFlags: u8 {
        /// The two colliders are touching.
        const OVERLAPPING = 1 << 0;
        /// At least one of the colliders is a sensor.
        const SENSOR = 1 << 1;
    }
}

/// The type of a contact, one per pair of shape types that can collide.
///
/// The first shape type of each pair is always greater or equal to the second one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum ContactType {
    /// Two spheres.
    Sphere,
    /// A capsule and a sphere.
    CapsuleAndSphere,
    /// Two capsules.
    Capsule,
    /// A convex hull and a sphere.
    HullAndSphere,
    /// A convex hull and a capsule.
    HullAndCapsule,
    /// Two convex hulls.
    Hull,
    /// A triangle and a sphere.
    TriangleAndSphere,
    /// A triangle and a capsule.
    TriangleAndCapsule,
    /// A triangle and a convex hull.
    TriangleAndHull,
    /// A mesh and a sphere.
    MeshAndSphere,
    /// A mesh and a capsule.
    MeshAndCapsule,
    /// A mesh and a convex hull.
    MeshAndHull,
}

/// How a contact stores the narrow-phase state it keeps from one step to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContactStorage {
    /// Nothing is kept: the narrow-phase runs from scratch each step.
    OneShot,
    /// A single [`super::CollisionCache`].
    Convex,
    /// One cache per overlapping mesh triangle.
    Mesh,
}

impl ContactType {
    /// All the contact types.
    pub const ALL: [ContactType; 12] = [
        ContactType::Sphere,
        ContactType::CapsuleAndSphere,
        ContactType::Capsule,
        ContactType::HullAndSphere,
        ContactType::HullAndCapsule,
        ContactType::Hull,
        ContactType::TriangleAndSphere,
        ContactType::TriangleAndCapsule,
        ContactType::TriangleAndHull,
        ContactType::MeshAndSphere,
        ContactType::MeshAndCapsule,
        ContactType::MeshAndHull,
    ];

    /// The contact type between two shapes, and whether the two shapes must be swapped to
    /// match its shape order.
    ///
    /// Returns `None` for pairs that never collide: triangle-triangle, mesh-triangle, and
    /// mesh-mesh.
    pub fn for_shapes(a: ShapeType, b: ShapeType) -> Option<(ContactType, bool)> {
        use ShapeType::*;

        let swapped = a < b;
        let (a, b) = if swapped { (b, a) } else { (a, b) };

        let contact_type = match (a, b) {
            (Sphere, Sphere) => ContactType::Sphere,
            (Capsule, Sphere) => ContactType::CapsuleAndSphere,
            (Capsule, Capsule) => ContactType::Capsule,
            (Hull, Sphere) => ContactType::HullAndSphere,
            (Hull, Capsule) => ContactType::HullAndCapsule,
            (Hull, Hull) => ContactType::Hull,
            (Triangle, Sphere) => ContactType::TriangleAndSphere,
            (Triangle, Capsule) => ContactType::TriangleAndCapsule,
            (Triangle, Hull) => ContactType::TriangleAndHull,
            (Mesh, Sphere) => ContactType::MeshAndSphere,
            (Mesh, Capsule) => ContactType::MeshAndCapsule,
            (Mesh, Hull) => ContactType::MeshAndHull,
            (Triangle, Triangle) | (Mesh, Triangle) | (Mesh, Mesh) => return None,
            _ => unreachable!("the shape types were sorted"),
        };

        Some((contact_type, swapped))
    }

    /// The types of the first and second shapes of this contact type.
    pub fn shape_types(self) -> (ShapeType, ShapeType) {
        use ShapeType::*;

        match self {
            ContactType::Sphere => (Sphere, Sphere),
            ContactType::CapsuleAndSphere => (Capsule, Sphere),
            ContactType::Capsule => (Capsule, Capsule),
            ContactType::HullAndSphere => (Hull, Sphere),
            ContactType::HullAndCapsule => (Hull, Capsule),
            ContactType::Hull => (Hull, Hull),
            ContactType::TriangleAndSphere => (Triangle, Sphere),
            ContactType::TriangleAndCapsule => (Triangle, Capsule),
            ContactType::TriangleAndHull => (Triangle, Hull),
            ContactType::MeshAndSphere => (Mesh, Sphere),
            ContactType::MeshAndCapsule => (Mesh, Capsule),
            ContactType::MeshAndHull => (Mesh, Hull),
        }
    }

    /// The storage used by contacts of this type.
    pub fn storage(self) -> ContactStorage {
        match self {
            ContactType::CapsuleAndSphere
            | ContactType::Capsule
            | ContactType::HullAndCapsule
            | ContactType::TriangleAndCapsule => ContactStorage::OneShot,
            ContactType::Sphere
            | ContactType::HullAndSphere
            | ContactType::Hull
            | ContactType::TriangleAndSphere
            | ContactType::TriangleAndHull => ContactStorage::Convex,
            ContactType::MeshAndSphere | ContactType::MeshAndCapsule | ContactType::MeshAndHull => {
                ContactStorage::Mesh
            }
        }
    }

    /// The size of the block allocated for contacts of this type: the common part of all
    /// contacts plus the storage of this type.
    pub fn block_size(self) -> usize {
        let header = size_of::<Contact>() - size_of::<ContactKind>();
        let storage = match self.storage() {
            ContactStorage::OneShot => 0,
            ContactStorage::Convex => size_of::<ConvexContact>(),
            ContactStorage::Mesh => size_of::<MeshContact>(),
        };
        header + storage
    }
}

/// The narrow-phase state of a contact.
#[derive(Clone, Debug)]
pub enum ContactKind {
    /// No state.
    OneShot,
    /// A single cache between two convex shapes.
    Convex(ConvexContact),
    /// Per-triangle caches between a mesh and a convex shape.
    Mesh(MeshContact),
}

/// The two colliders involved in a contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlappingPair {
    /// The first collider. Its shape type is the greatest of the two.
    pub collider_a: ColliderHandle,
    /// The second collider.
    pub collider_b: ColliderHandle,
}

impl OverlappingPair {
    /// Does this pair involve the colliders `a` and `b`, in any order?
    pub fn is_pair(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        (self.collider_a == a && self.collider_b == b)
            || (self.collider_a == b && self.collider_b == a)
    }

    /// The edges to register to the first and second colliders respectively.
    pub fn edges(&self, contact: ContactHandle) -> (ContactEdge, ContactEdge) {
        let edge_a = ContactEdge {
            contact,
            other: self.collider_b,
        };
        let edge_b = ContactEdge {
            contact,
            other: self.collider_a,
        };
        (edge_a, edge_b)
    }
}

/// A potential contact between two colliders with overlapping bounding boxes.
#[derive(Clone, Debug)]
pub struct Contact {
    contact_type: ContactType,
    pair: OverlappingPair,
    flags: ContactFlags,
    manifolds: SmallVec<[Manifold; 1]>,
    pub(crate) list_index: usize,
    kind: ContactKind,
}

impl Contact {
    /// Creates a contact of the given type.
    ///
    /// Panics if the shape types of the colliders don't match exactly the ones of
    /// `contact_type`, in order.
    pub fn new(
        contact_type: ContactType,
        collider_a: ColliderHandle,
        collider_b: ColliderHandle,
        colliders: &ColliderSet,
        bodies: &BodySet,
        settings: &ContactSettings,
    ) -> Self {
        let co_a = &colliders[collider_a];
        let co_b = &colliders[collider_b];
        assert_eq!(
            (co_a.shape_type(), co_b.shape_type()),
            contact_type.shape_types(),
            "the shapes don't match the contact type {:?}",
            contact_type
        );

        let kind = match contact_type.storage() {
            ContactStorage::OneShot => ContactKind::OneShot,
            ContactStorage::Convex => ContactKind::Convex(ConvexContact::default()),
            ContactStorage::Mesh => ContactKind::Mesh(MeshContact::new(
                bodies[co_a.body()].position(),
                co_b.shape(),
                bodies[co_b.body()].position(),
                settings,
            )),
        };

        let mut flags = ContactFlags::empty();
        flags.set(ContactFlags::SENSOR, co_a.is_sensor() || co_b.is_sensor());

        Self {
            contact_type,
            pair: OverlappingPair {
                collider_a,
                collider_b,
            },
            flags,
            manifolds: SmallVec::new(),
            list_index: usize::MAX,
            kind,
        }
    }

    /// Creates the contact between two colliders and stores it in `allocator`.
    ///
    /// The colliders are swapped if their shape types are not in the order expected by the
    /// contact type. Returns `None` if the two shapes cannot collide.
    pub fn create(
        collider_a: ColliderHandle,
        collider_b: ColliderHandle,
        colliders: &ColliderSet,
        bodies: &BodySet,
        settings: &ContactSettings,
        allocator: &mut BlockAllocator<Contact>,
    ) -> Option<ContactHandle> {
        let type_a = colliders[collider_a].shape_type();
        let type_b = colliders[collider_b].shape_type();

        let Some((contact_type, swapped)) = ContactType::for_shapes(type_a, type_b) else {
            log::debug!("No contact between the shape types {:?} and {:?}.", type_a, type_b);
            return None;
        };

        let (collider_a, collider_b) = if swapped {
            (collider_b, collider_a)
        } else {
            (collider_a, collider_b)
        };

        let contact = Contact::new(
            contact_type,
            collider_a,
            collider_b,
            colliders,
            bodies,
            settings,
        );
        let handle = ContactHandle(allocator.allocate(contact_type.block_size(), contact));
        log::trace!(
            "Created the contact {:?} of type {:?} between {:?} and {:?}.",
            handle,
            contact_type,
            collider_a,
            collider_b
        );
        Some(handle)
    }

    /// Removes a contact from `allocator`, giving back its block.
    pub fn destroy(handle: ContactHandle, allocator: &mut BlockAllocator<Contact>) -> Contact {
        let contact_type = allocator[handle.0].contact_type;
        log::trace!("Destroying the contact {:?} of type {:?}.", handle, contact_type);
        allocator.free(handle.0, contact_type.block_size())
    }

    /// The type of this contact.
    #[inline]
    pub fn contact_type(&self) -> ContactType {
        self.contact_type
    }

    /// The two colliders of this contact.
    #[inline]
    pub fn pair(&self) -> &OverlappingPair {
        &self.pair
    }

    /// The first collider of this contact.
    #[inline]
    pub fn collider_a(&self) -> ColliderHandle {
        self.pair.collider_a
    }

    /// The second collider of this contact.
    #[inline]
    pub fn collider_b(&self) -> ColliderHandle {
        self.pair.collider_b
    }

    /// The state flags of this contact.
    #[inline]
    pub fn flags(&self) -> ContactFlags {
        self.flags
    }

    /// Are the two colliders touching?
    #[inline]
    pub fn is_overlapping(&self) -> bool {
        self.flags.contains(ContactFlags::OVERLAPPING)
    }

    /// Is one of the two colliders a sensor?
    #[inline]
    pub fn is_sensor(&self) -> bool {
        self.flags.contains(ContactFlags::SENSOR)
    }

    /// The contact manifolds. Always empty for sensors.
    #[inline]
    pub fn manifolds(&self) -> &[Manifold] {
        &self.manifolds
    }

    /// The contact manifolds, for the solver to store its impulses.
    #[inline]
    pub fn manifolds_mut(&mut self) -> &mut [Manifold] {
        &mut self.manifolds
    }

    /// The total number of contact points.
    pub fn total_point_count(&self) -> usize {
        self.manifolds.iter().map(|m| m.len()).sum()
    }

    /// The narrow-phase state of this contact.
    #[inline]
    pub fn kind(&self) -> &ContactKind {
        &self.kind
    }

    /// Refreshes the bounds tracked by mesh contacts.
    pub fn synchronize(
        &mut self,
        colliders: &ColliderSet,
        bodies: &BodySet,
        settings: &ContactSettings,
    ) {
        if let ContactKind::Mesh(mesh_contact) = &mut self.kind {
            let co_a = &colliders[self.pair.collider_a];
            let co_b = &colliders[self.pair.collider_b];
            let body_a = &bodies[co_a.body()];
            let body_b = &bodies[co_b.body()];
            let displacement = body_b.displacement() - body_a.displacement();

            mesh_contact.synchronize(
                body_a.position(),
                co_b.shape(),
                body_b.position(),
                &displacement,
                settings,
            );
        }
    }

    /// Updates the set of mesh triangles tracked by mesh contacts.
    pub fn find_new_pairs(&mut self, colliders: &ColliderSet) {
        if let ContactKind::Mesh(mesh_contact) = &mut self.kind {
            mesh_contact.find_new_pairs(mesh_shape(&colliders[self.pair.collider_a]));
        }
    }

    /// Runs the narrow-phase and replaces the manifolds of this contact. Only the non-empty
    /// manifolds are kept.
    pub fn collide(
        &mut self,
        colliders: &ColliderSet,
        bodies: &BodySet,
        settings: &ContactSettings,
    ) {
        let co_a = &colliders[self.pair.collider_a];
        let co_b = &colliders[self.pair.collider_b];
        let pos_a = bodies[co_a.body()].position();
        let pos_b = bodies[co_b.body()].position();
        let prediction = settings.prediction_distance;

        match &mut self.kind {
            ContactKind::OneShot => {
                let mut manifold = Manifold::new();
                evaluate_one_shot(
                    &mut manifold,
                    convex_shape(co_a),
                    pos_a,
                    convex_shape(co_b),
                    pos_b,
                    prediction,
                );
                self.manifolds.clear();
                if !manifold.is_empty() {
                    self.manifolds.push(manifold);
                }
            }
            ContactKind::Convex(convex_contact) => {
                let mut manifold = Manifold::new();
                convex_contact.evaluate(
                    &mut manifold,
                    convex_shape(co_a),
                    pos_a,
                    convex_shape(co_b),
                    pos_b,
                    prediction,
                );
                self.manifolds.clear();
                if !manifold.is_empty() {
                    self.manifolds.push(manifold);
                }
            }
            ContactKind::Mesh(mesh_contact) => mesh_contact.collide(
                &mut self.manifolds,
                mesh_shape(co_a),
                pos_a,
                convex_shape(co_b),
                pos_b,
                prediction,
            ),
        }
    }

    /// Do the two colliders intersect?
    pub fn test_overlap(&self, colliders: &ColliderSet, bodies: &BodySet) -> bool {
        let co_a = &colliders[self.pair.collider_a];
        let co_b = &colliders[self.pair.collider_b];
        let pos_a = bodies[co_a.body()].position();
        let pos_b = bodies[co_b.body()].position();

        match &self.kind {
            ContactKind::Mesh(mesh_contact) => {
                mesh_contact.test_overlap(mesh_shape(co_a), pos_a, convex_shape(co_b), pos_b)
            }
            ContactKind::OneShot | ContactKind::Convex(_) => {
                intersection_test(convex_shape(co_a), pos_a, convex_shape(co_b), pos_b)
            }
        }
    }

    /// Recomputes the contact points of this contact and notifies `listener` of the changes.
    ///
    /// The impulses of the points that persist are kept. Sensors only test for intersection and
    /// never have manifolds.
    pub fn update(
        &mut self,
        colliders: &ColliderSet,
        bodies: &BodySet,
        settings: &ContactSettings,
        listener: Option<&mut dyn ContactListener>,
    ) {
        let was_overlapping = self.is_overlapping();
        let old_manifolds = std::mem::take(&mut self.manifolds);

        let overlapping = if self.is_sensor() {
            self.test_overlap(colliders, bodies)
        } else {
            self.collide(colliders, bodies, settings);
            for manifold in &mut self.manifolds {
                manifold.warm_start_from(&old_manifolds);
            }
            self.total_point_count() > 0
        };

        self.flags.set(ContactFlags::OVERLAPPING, overlapping);

        if let Some(listener) = listener {
            if overlapping && !was_overlapping {
                listener.begin_contact(self);
            }

            if !overlapping && was_overlapping {
                listener.end_contact(self);
            }

            if overlapping && !self.is_sensor() {
                listener.pre_solve(self, &old_manifolds);
            }
        }
    }
}

fn convex_shape(collider: &Collider) -> &dyn Shape {
    match collider.shape().as_convex() {
        Some(shape) => shape,
        None => panic!("expected a convex shape, found {:?}", collider.shape_type()),
    }
}

fn mesh_shape(collider: &Collider) -> &MeshShape {
    match collider.shape().as_mesh() {
        Some(mesh) => mesh,
        None => panic!("expected a mesh, found {:?}", collider.shape_type()),
    }
}
