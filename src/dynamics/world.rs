use crate::dynamics::{
    BodyHandle, BodySet, ColliderDesc, ColliderHandle, ColliderSet, ContactFilter,
    ContactHandle, ContactListener, ContactManager, ContactSettings, JointDef, JointEdge,
    JointHandle, JointSet, RigidBodyDesc, WorldError,
};
use crate::math::{Isometry, Real};

/// The owner of all the bodies, colliders, and joints, driving the contact manager one step at
/// a time.
///
/// # Example
///
/// ```
/// use rebound3d::dynamics::{ColliderDesc, ColliderShape, RigidBodyDesc, World};
/// use rebound3d::math::Vector;
///
/// let mut world = World::default();
/// let ground = world.insert_body(RigidBodyDesc::fixed());
/// let ball = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.0, 0.4, 0.0)));
///
/// world.insert_collider(ColliderDesc::new(ColliderShape::cuboid(10.0, 0.1, 10.0)), ground)?;
/// world.insert_collider(ColliderDesc::new(ColliderShape::ball(0.5)), ball)?;
///
/// world.step();
/// assert_eq!(world.contact_manager().contact_count(), 1);
/// # Ok::<(), rebound3d::dynamics::WorldError>(())
/// ```
#[derive(Debug, Default)]
pub struct World {
    bodies: BodySet,
    colliders: ColliderSet,
    joints: JointSet,
    contact_manager: ContactManager,
}

impl World {
    /// An empty world.
    pub fn new(settings: ContactSettings) -> Self {
        Self {
            bodies: BodySet::new(),
            colliders: ColliderSet::new(),
            joints: JointSet::new(),
            contact_manager: ContactManager::new(settings),
        }
    }

    /// The bodies of this world.
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// The colliders of this world.
    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// The joints of this world.
    pub fn joints(&self) -> &JointSet {
        &self.joints
    }

    /// The contact manager of this world.
    pub fn contact_manager(&self) -> &ContactManager {
        &self.contact_manager
    }

    /// The contact manager of this world.
    pub fn contact_manager_mut(&mut self) -> &mut ContactManager {
        &mut self.contact_manager
    }

    /// Sets the filter deciding which colliders can collide.
    pub fn set_contact_filter(&mut self, filter: Option<Box<dyn ContactFilter>>) {
        self.contact_manager.set_contact_filter(filter);
    }

    /// Sets the listener receiving the contact events.
    pub fn set_contact_listener(&mut self, listener: Option<Box<dyn ContactListener>>) {
        self.contact_manager.set_contact_listener(listener);
    }

    /// Removes the contact listener and returns it.
    pub fn take_contact_listener(&mut self) -> Option<Box<dyn ContactListener>> {
        self.contact_manager.take_contact_listener()
    }

    /// Inserts a new body.
    pub fn insert_body(&mut self, desc: RigidBodyDesc) -> BodyHandle {
        self.bodies.insert(&desc)
    }

    /// Removes a body, together with its joints, its colliders, and their contacts.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get(handle)
            .ok_or(WorldError::InvalidBody(handle))?;
        let joints: Vec<_> = body.joint_edges().iter().map(|edge| edge.joint).collect();
        let colliders = body.colliders().to_vec();

        for joint in joints {
            self.remove_joint(joint)?;
        }

        for collider in colliders {
            self.remove_collider(collider)?;
        }

        let _ = self.bodies.remove(handle);
        log::debug!("Removed the body {:?}.", handle);
        Ok(())
    }

    /// Attaches a new collider to the body `parent` and inserts it into the broad-phase.
    pub fn insert_collider(
        &mut self,
        desc: ColliderDesc,
        parent: BodyHandle,
    ) -> Result<ColliderHandle, WorldError> {
        if !self.bodies.contains(parent) {
            return Err(WorldError::InvalidBody(parent));
        }

        let handle = self.colliders.insert(desc, parent, &mut self.bodies);
        self.contact_manager
            .register_collider(handle, &mut self.colliders, &self.bodies);
        Ok(handle)
    }

    /// Removes a collider, destroying all its contacts.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<(), WorldError> {
        if !self.colliders.contains(handle) {
            return Err(WorldError::InvalidCollider(handle));
        }

        self.contact_manager
            .unregister_collider(handle, &mut self.colliders);
        let _ = self.colliders.remove(handle, &mut self.bodies);
        Ok(())
    }

    /// Creates a joint and links it to its two bodies.
    ///
    /// If the joint forbids the collision of its bodies, their existing contacts are destroyed
    /// at the next step.
    pub fn insert_joint(&mut self, def: JointDef) -> Result<JointHandle, WorldError> {
        for body in [def.body_a, def.body_b] {
            if !self.bodies.contains(body) {
                return Err(WorldError::InvalidBody(body));
            }
        }

        if def.body_a == def.body_b {
            return Err(WorldError::SelfJoint(def.body_a));
        }

        let handle = self.joints.insert(&def);
        self.bodies[def.body_a].joint_edges.push(JointEdge {
            joint: handle,
            other: def.body_b,
            collide_connected: def.collide_connected,
        });
        self.bodies[def.body_b].joint_edges.push(JointEdge {
            joint: handle,
            other: def.body_a,
            collide_connected: def.collide_connected,
        });

        Ok(handle)
    }

    /// Destroys a joint and unlinks it from its two bodies.
    ///
    /// If the joint prevented its bodies from colliding, the proxies of the second body are
    /// touched so the broad-phase reports their pairs again.
    pub fn remove_joint(&mut self, handle: JointHandle) -> Result<(), WorldError> {
        let joint = self
            .joints
            .remove(handle)
            .ok_or(WorldError::InvalidJoint(handle))?;

        for body in [joint.body_a(), joint.body_b()] {
            if let Some(body) = self.bodies.get_mut(body) {
                body.joint_edges.retain(|edge| edge.joint != handle);
                body.set_awake(true);
            }
        }

        if !joint.collide_connected() {
            if let Some(body_b) = self.bodies.get(joint.body_b()) {
                for collider in body_b.colliders() {
                    self.contact_manager
                        .touch_collider(*collider, &self.colliders);
                }
            }
        }

        Ok(())
    }

    /// Teleports a body and wakes it up. Its proxies are moved at the next step.
    pub fn set_body_position(
        &mut self,
        handle: BodyHandle,
        position: Isometry<Real>,
    ) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or(WorldError::InvalidBody(handle))?;
        body.set_position(position);
        body.set_awake(true);
        Ok(())
    }

    /// Wakes up or puts a body to sleep.
    pub fn set_body_awake(&mut self, handle: BodyHandle, awake: bool) -> Result<(), WorldError> {
        self.bodies
            .get_mut(handle)
            .ok_or(WorldError::InvalidBody(handle))?
            .set_awake(awake);
        Ok(())
    }

    /// Makes the contact filter run again on all the pairs of this collider at the next step.
    pub fn refilter_collider(&mut self, handle: ColliderHandle) -> Result<(), WorldError> {
        if !self.colliders.contains(handle) {
            return Err(WorldError::InvalidCollider(handle));
        }

        // Contacts rejected by the new filter are destroyed by `update_contacts`.
        let body = self.colliders[handle].body();
        self.bodies[body].set_awake(true);
        self.contact_manager.touch_collider(handle, &self.colliders);
        Ok(())
    }

    /// Creates the contact between two colliders immediately, without waiting for the
    /// broad-phase.
    pub fn add_pair(&mut self, a: ColliderHandle, b: ColliderHandle) -> Option<ContactHandle> {
        self.contact_manager
            .add_pair(a, b, &mut self.colliders, &mut self.bodies)
    }

    /// Runs one step of contact detection.
    pub fn step(&mut self) {
        for (_, body) in self.bodies.iter() {
            if body.is_active() || body.has_moved() {
                for collider in body.colliders() {
                    self.contact_manager
                        .synchronize_collider(*collider, &self.colliders, &self.bodies);
                }
            }
        }

        self.contact_manager
            .synchronize_shapes(&self.colliders, &self.bodies);
        self.contact_manager
            .find_new_contacts(&mut self.colliders, &mut self.bodies);
        self.contact_manager
            .update_contacts(&mut self.colliders, &self.bodies);

        for (_, body) in self.bodies.iter_mut() {
            body.finalize_move();
        }
    }
}
