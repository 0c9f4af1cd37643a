//! Bodies, colliders, contacts, and joints.
//!
//! A [`World`] owns every object. Each call to [`World::step`] lets the [`ContactManager`]
//! find the colliders whose enlarged bounds started overlapping, build one [`Contact`] per new
//! pair, and refresh or destroy the existing contacts.

pub use self::body::{BodyHandle, BodySet, BodyType, JointEdge, RigidBody, RigidBodyDesc};
pub use self::broad_phase::{BroadPhase, ProxyId};
pub use self::collider::{
    Collider, ColliderDesc, ColliderHandle, ColliderSet, ColliderShape, ContactEdge, Hull,
    ShapeType,
};
pub use self::contact_manager::ContactManager;
pub use self::contacts::*;
pub use self::error::{ShapeError, WorldError};
pub use self::joints::*;
pub use self::listeners::{ContactFilter, ContactListener};
pub use self::mesh_shape::MeshShape;
pub use self::settings::ContactSettings;
pub use self::world::World;

mod body;
mod broad_phase;
mod collider;
mod contact_manager;
pub mod contacts;
mod error;
pub mod joints;
mod listeners;
mod mesh_shape;
mod settings;
mod world;
