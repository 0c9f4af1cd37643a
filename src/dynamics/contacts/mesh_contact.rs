use super::convex_contact::intersection_test;
use super::{CollisionCache, Manifold};
use crate::dynamics::broad_phase::predicted_aabb;
use crate::dynamics::{ColliderShape, ContactSettings, MeshShape};
use crate::math::{Isometry, Real, Vector};
use parry::bounding_volume::{Aabb, BoundingVolume};
use parry::shape::Shape;
use smallvec::SmallVec;

/// The narrow-phase cache of one mesh triangle.
#[derive(Clone, Debug, Default)]
pub struct TriangleCache {
    /// The index of the triangle in the mesh.
    pub index: u32,
    /// The narrow-phase cache between this triangle and the other shape.
    pub cache: CollisionCache,
}

/// The storage of a contact between a mesh and a convex shape.
///
/// It tracks an enlarged bounding box of the convex shape in the local frame of the mesh and
/// one [`TriangleCache`] per triangle overlapping it, sorted by triangle index.
#[derive(Clone, Debug)]
pub struct MeshContact {
    aabb_b: Aabb,
    aabb_b_moved: bool,
    triangles: Vec<TriangleCache>,
}

impl MeshContact {
    pub(crate) fn new(
        pos_a: &Isometry<Real>,
        shape_b: &ColliderShape,
        pos_b: &Isometry<Real>,
        settings: &ContactSettings,
    ) -> Self {
        let local_b = shape_b.compute_aabb(&pos_a.inv_mul(pos_b));
        Self {
            aabb_b: local_b.loosened(settings.aabb_extension),
            aabb_b_moved: true,
            triangles: Vec::new(),
        }
    }

    /// The caches of the triangles currently overlapping the bounds of the convex shape.
    pub fn triangles(&self) -> &[TriangleCache] {
        &self.triangles
    }

    /// The enlarged bounds of the convex shape, in the local frame of the mesh.
    pub fn fat_aabb(&self) -> &Aabb {
        &self.aabb_b
    }

    /// Recomputes the bounds of the convex shape, enlarging them only if they escaped the
    /// current ones.
    ///
    /// `displacement` is the world-space displacement of the convex shape relative to the mesh.
    pub(crate) fn synchronize(
        &mut self,
        pos_a: &Isometry<Real>,
        shape_b: &ColliderShape,
        pos_b: &Isometry<Real>,
        displacement: &Vector<Real>,
        settings: &ContactSettings,
    ) {
        let local_b = shape_b.compute_aabb(&pos_a.inv_mul(pos_b));
        if self.aabb_b.contains(&local_b) {
            return;
        }

        let local_displacement = pos_a.inverse_transform_vector(displacement);
        self.aabb_b = predicted_aabb(
            &local_b,
            &local_displacement,
            settings.aabb_extension,
            settings.aabb_multiplier,
        );
        self.aabb_b_moved = true;
    }

    /// Updates the set of triangles overlapping the bounds of the convex shape.
    ///
    /// Triangles that keep overlapping keep their cache.
    pub(crate) fn find_new_pairs(&mut self, mesh: &MeshShape) {
        if !self.aabb_b_moved {
            return;
        }
        self.aabb_b_moved = false;

        let found = mesh.triangles_intersecting(&self.aabb_b);
        let mut old = std::mem::take(&mut self.triangles).into_iter().peekable();
        self.triangles.reserve(found.len());

        for index in found {
            while old.next_if(|slot| slot.index < index).is_some() {}
            let cache = old
                .next_if(|slot| slot.index == index)
                .map(|slot| slot.cache)
                .unwrap_or_default();
            self.triangles.push(TriangleCache { index, cache });
        }
    }

    /// Computes the contact between the triangle cached at `cache_index` and the convex shape.
    pub(crate) fn evaluate(
        &mut self,
        manifold: &mut Manifold,
        mesh: &MeshShape,
        pos_a: &Isometry<Real>,
        shape_b: &dyn Shape,
        pos_b: &Isometry<Real>,
        prediction: Real,
        cache_index: usize,
    ) {
        let slot = &mut self.triangles[cache_index];
        let triangle = mesh.triangle(slot.index);
        let pos12 = pos_a.inv_mul(pos_b);

        let contacts = slot.cache.update(&pos12, &triangle, shape_b, prediction);
        manifold.set_from_contact_manifold(contacts, pos_a, slot.index, prediction);
    }

    pub(crate) fn collide(
        &mut self,
        manifolds: &mut SmallVec<[Manifold; 1]>,
        mesh: &MeshShape,
        pos_a: &Isometry<Real>,
        shape_b: &dyn Shape,
        pos_b: &Isometry<Real>,
        prediction: Real,
    ) {
        manifolds.clear();

        for cache_index in 0..self.triangles.len() {
            let mut manifold = Manifold::new();
            self.evaluate(
                &mut manifold,
                mesh,
                pos_a,
                shape_b,
                pos_b,
                prediction,
                cache_index,
            );

            if !manifold.is_empty() {
                manifolds.push(manifold);
            }
        }
    }

    pub(crate) fn test_overlap(
        &self,
        mesh: &MeshShape,
        pos_a: &Isometry<Real>,
        shape_b: &dyn Shape,
        pos_b: &Isometry<Real>,
    ) -> bool {
        self.triangles
            .iter()
            .any(|slot| intersection_test(&mesh.triangle(slot.index), pos_a, shape_b, pos_b))
    }
}
