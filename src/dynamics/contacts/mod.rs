//! Contacts between pairs of colliders, one variant per pair of shape types.

pub use self::collision_cache::CollisionCache;
pub use self::contact::{
    Contact, ContactFlags, ContactHandle, ContactKind, ContactStorage, ContactType,
    OverlappingPair,
};
pub use self::convex_contact::ConvexContact;
pub use self::manifold::{ContactKey, Manifold, ManifoldPoint, MAX_MANIFOLD_POINTS};
pub use self::mesh_contact::{MeshContact, TriangleCache};

mod collision_cache;
mod contact;
mod convex_contact;
mod manifold;
mod mesh_contact;
