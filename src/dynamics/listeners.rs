use crate::dynamics::{Collider, Contact, Manifold};

/// Decides whether two colliders may collide, on top of the rules of their bodies.
///
/// The filter is queried when a new pair is found and again at each step for every existing
/// contact: a contact is destroyed as soon as its filter starts rejecting it.
pub trait ContactFilter {
    /// Can `collider_a` and `collider_b` touch each other?
    fn should_collide(&self, collider_a: &Collider, collider_b: &Collider) -> bool;
}

/// Receives the contact events.
///
/// The callbacks are called synchronously while the contacts are updated, and only get
/// read-only access to the contact.
pub trait ContactListener {
    /// The two colliders of `contact` started touching.
    fn begin_contact(&mut self, _contact: &Contact) {}

    /// The two colliders of `contact` stopped touching, or the contact is about to be destroyed
    /// while they were touching.
    fn end_contact(&mut self, _contact: &Contact) {}

    /// The contact points of a touching non-sensor contact were just recomputed.
    /// `old_manifolds` are the manifolds from the previous step.
    fn pre_solve(&mut self, _contact: &Contact, _old_manifolds: &[Manifold]) {}
}
