use crate::math::{Isometry, Point, Real, Vector};
use arrayvec::ArrayVec;
use parry::query::{ContactManifold, TrackedContact};
use parry::shape::PackedFeatureId;

/// The maximum number of points of a single manifold.
pub const MAX_MANIFOLD_POINTS: usize = 4;

/// Identifies a manifold point from one step to the next.
///
/// For contacts involving a mesh, `triangle` is the index of the mesh triangle the point was
/// generated by. It is zero otherwise. `feature` packs the ids of the two shape features the
/// point lies on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ContactKey {
    /// The index of the mesh triangle involved.
    pub triangle: u32,
    /// The features of both shapes involved, the first one in the high bits.
    pub feature: u64,
}

impl ContactKey {
    /// The key of a point lying on the features `fid1` and `fid2`.
    pub fn new(triangle: u32, fid1: PackedFeatureId, fid2: PackedFeatureId) -> Self {
        Self {
            triangle,
            feature: ((fid1.0 as u64) << 32) | fid2.0 as u64,
        }
    }
}

/// A single contact point between two colliders.
///
/// The points are expressed in the local frame of each collider so they stay valid when the
/// colliders move. `dist` is negative when the colliders penetrate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ManifoldPoint {
    /// The contact point on the first collider, in its local frame.
    pub local_point_a: Point<Real>,
    /// The contact point on the second collider, in its local frame.
    pub local_point_b: Point<Real>,
    /// The signed distance between the two contact points.
    pub dist: Real,
    /// The persistent identifier of this point.
    pub key: ContactKey,
    /// The impulse applied along the normal, accumulated by the solver.
    pub normal_impulse: Real,
    /// The impulses applied along the two tangents, accumulated by the solver.
    pub tangent_impulse: [Real; 2],
}

impl ManifoldPoint {
    /// A point with zero accumulated impulse.
    pub fn new(
        local_point_a: Point<Real>,
        local_point_b: Point<Real>,
        dist: Real,
        key: ContactKey,
    ) -> Self {
        Self {
            local_point_a,
            local_point_b,
            dist,
            key,
            normal_impulse: 0.0,
            tangent_impulse: [0.0; 2],
        }
    }
}

/// A set of contact points sharing the same normal.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifold {
    /// The contact normal in world-space, pointing from the first collider toward the second.
    pub normal: Vector<Real>,
    /// The contact points.
    pub points: ArrayVec<ManifoldPoint, MAX_MANIFOLD_POINTS>,
}

impl Default for Manifold {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifold {
    /// An empty manifold.
    pub fn new() -> Self {
        Self {
            normal: Vector::zeros(),
            points: ArrayVec::new(),
        }
    }

    /// The number of points of this manifold.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does this manifold have no point?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Removes all the points of this manifold.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replaces the content of this manifold by the points of a narrow-phase manifold closer
    /// than `prediction`.
    ///
    /// `pos_a` is the world-space position of the first collider and `triangle` the mesh
    /// triangle the narrow-phase manifold was computed with. When there are more than
    /// [`MAX_MANIFOLD_POINTS`] candidates, the ones spanning the largest area are kept.
    pub fn set_from_contact_manifold(
        &mut self,
        contacts: &ContactManifold<(), ()>,
        pos_a: &Isometry<Real>,
        triangle: u32,
        prediction: Real,
    ) {
        self.points.clear();
        self.normal = pos_a * contacts.local_n1;

        let candidates: Vec<&TrackedContact<()>> = contacts
            .points
            .iter()
            .filter(|pt| pt.dist <= prediction)
            .collect();

        for i in reduce(&candidates, &contacts.local_n1) {
            let pt = candidates[i];
            let key = ContactKey::new(triangle, pt.fid1, pt.fid2);
            self.points
                .push(ManifoldPoint::new(pt.local_p1, pt.local_p2, pt.dist, key));
        }
    }

    /// Copies the accumulated impulses of the points of `old` with the same key as the points
    /// of this manifold.
    pub fn warm_start_from(&mut self, old: &[Manifold]) {
        for point in &mut self.points {
            let prev = old
                .iter()
                .flat_map(|m| m.points.iter())
                .find(|p| p.key == point.key);

            if let Some(prev) = prev {
                point.normal_impulse = prev.normal_impulse;
                point.tangent_impulse = prev.tangent_impulse;
            }
        }
    }
}

/// The index of the candidate not in `kept` with the highest score.
fn best_candidate(
    count: usize,
    kept: &[usize],
    score: impl Fn(usize) -> Real,
) -> Option<usize> {
    (0..count)
        .filter(|i| !kept.contains(i))
        .max_by(|a, b| score(*a).total_cmp(&score(*b)))
}

/// Selects at most [`MAX_MANIFOLD_POINTS`] candidates: the deepest one, the one farthest from
/// it, the one farthest from the line through both, then the one extending that triangle the
/// most.
fn reduce(
    candidates: &[&TrackedContact<()>],
    normal: &Vector<Real>,
) -> ArrayVec<usize, MAX_MANIFOLD_POINTS> {
    let mut kept = ArrayVec::new();
    let count = candidates.len();
    if count <= MAX_MANIFOLD_POINTS {
        kept.extend(0..count);
        return kept;
    }

    let p = |i: usize| candidates[i].local_p1;

    let Some(i0) = best_candidate(count, &kept, |i| -candidates[i].dist) else {
        return kept;
    };
    kept.push(i0);
    let p0 = p(i0);

    let Some(i1) = best_candidate(count, &kept, |i| (p(i) - p0).norm_squared()) else {
        return kept;
    };
    kept.push(i1);
    let edge = p(i1) - p0;

    let Some(i2) = best_candidate(count, &kept, |i| (p(i) - p0).cross(&edge).norm_squared())
    else {
        return kept;
    };
    kept.push(i2);

    // Signed area of the triangle so far, used to tell which side of each edge is outside.
    let sign = normal.dot(&edge.cross(&(p(i2) - p0))).signum();
    let corners = [p0, p(i1), p(i2)];
    let outside = |i: usize| {
        (0..3)
            .map(|k| {
                let a = corners[k];
                let b = corners[(k + 1) % 3];
                -sign * normal.dot(&(b - a).cross(&(p(i) - a)))
            })
            .fold(Real::MIN, Real::max)
    };

    if let Some(i3) = best_candidate(count, &kept, outside) {
        kept.push(i3);
    }

    kept
}
