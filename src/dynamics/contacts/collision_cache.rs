use crate::math::{Isometry, Real, Vector};
use parry::query::{ContactManifold, DefaultQueryDispatcher, PersistentQueryDispatcher};
use parry::shape::Shape;

/// The narrow-phase manifold of two convex shapes, kept from one step to the next.
///
/// Parry updates the contacts of a persistent manifold in place when the relative pose of the
/// shapes barely changed. When the shapes are apart, the normal of the manifold holds the last
/// separating direction found, which seeds the next query.
#[derive(Clone, Debug, Default)]
pub struct CollisionCache {
    pos12: Option<Isometry<Real>>,
    manifold: ContactManifold<(), ()>,
}

impl CollisionCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything.
    pub fn reset(&mut self) {
        self.pos12 = None;
        self.manifold.clear();
        self.manifold.local_n1 = Vector::zeros();
        self.manifold.local_n2 = Vector::zeros();
    }

    /// Was this cache never filled since its creation or last reset?
    pub fn is_empty(&self) -> bool {
        self.pos12.is_none()
    }

    /// The narrow-phase manifold computed last.
    pub fn manifold(&self) -> &ContactManifold<(), ()> {
        &self.manifold
    }

    /// The last separating direction found, in the local frame of the first shape, if the
    /// shapes were apart.
    pub fn separating_axis(&self) -> Option<&Vector<Real>> {
        let axis = &self.manifold.local_n1;
        (self.manifold.points.is_empty() && *axis != Vector::zeros()).then_some(axis)
    }

    /// Updates the manifold between `shape_a` and `shape_b` positioned at `pos12` relative to
    /// `shape_a`.
    pub fn update(
        &mut self,
        pos12: &Isometry<Real>,
        shape_a: &dyn Shape,
        shape_b: &dyn Shape,
        prediction: Real,
    ) -> &ContactManifold<(), ()> {
        let result = DefaultQueryDispatcher.contact_manifold_convex_convex(
            pos12,
            shape_a,
            shape_b,
            None,
            None,
            prediction,
            &mut self.manifold,
        );

        match result {
            Ok(()) => self.pos12 = Some(*pos12),
            Err(_) => {
                log::debug!("Unsupported contact manifold between two convex shapes.");
                self.reset();
            }
        }

        &self.manifold
    }
}
