use super::{CollisionCache, Manifold};
use crate::math::{Isometry, Real};
use parry::query::{DefaultQueryDispatcher, QueryDispatcher};
use parry::shape::Shape;

/// The storage of a contact between two convex shapes, keeping the narrow-phase manifold of
/// the previous step.
#[derive(Clone, Debug, Default)]
pub struct ConvexContact {
    /// The narrow-phase cache of this pair.
    pub cache: CollisionCache,
}

impl ConvexContact {
    pub(crate) fn evaluate(
        &mut self,
        manifold: &mut Manifold,
        shape_a: &dyn Shape,
        pos_a: &Isometry<Real>,
        shape_b: &dyn Shape,
        pos_b: &Isometry<Real>,
        prediction: Real,
    ) {
        let pos12 = pos_a.inv_mul(pos_b);
        let contacts = self.cache.update(&pos12, shape_a, shape_b, prediction);
        manifold.set_from_contact_manifold(contacts, pos_a, 0, prediction);
    }
}

/// Runs the narrow-phase on two convex shapes from scratch.
pub(crate) fn evaluate_one_shot(
    manifold: &mut Manifold,
    shape_a: &dyn Shape,
    pos_a: &Isometry<Real>,
    shape_b: &dyn Shape,
    pos_b: &Isometry<Real>,
    prediction: Real,
) {
    let mut contact = ConvexContact::default();
    contact.evaluate(manifold, shape_a, pos_a, shape_b, pos_b, prediction);
}

/// Tests whether two convex shapes intersect.
pub(crate) fn intersection_test(
    shape_a: &dyn Shape,
    pos_a: &Isometry<Real>,
    shape_b: &dyn Shape,
    pos_b: &Isometry<Real>,
) -> bool {
    let pos12 = pos_a.inv_mul(pos_b);
    match DefaultQueryDispatcher.intersection_test(&pos12, shape_a, shape_b) {
        Ok(intersecting) => intersecting,
        Err(_) => {
            log::debug!("Unsupported intersection test between two convex shapes.");
            false
        }
    }
}
