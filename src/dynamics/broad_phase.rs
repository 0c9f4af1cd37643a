use crate::dynamics::{ColliderHandle, ContactSettings};
use crate::math::{Real, Vector};
use parry::bounding_volume::{Aabb, BoundingVolume};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use slab::Slab;
use std::fmt;

type ProxyBounds = GeomWithData<Rectangle<[Real; 3]>, ProxyId>;

/// The identifier of a broad-phase proxy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ProxyId(pub(crate) u32);

impl ProxyId {
    /// The identifier of no proxy.
    pub const INVALID: Self = Self(u32::MAX);

    /// The raw index of this proxy.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Proxy {
    fat_aabb: Aabb,
    collider: ColliderHandle,
}

/// A broad-phase tracking one enlarged bounding box per collider in an R-tree.
///
/// Only the proxies that moved since the last call to [`BroadPhase::find_pairs`] query the tree,
/// so a shape resting inside its enlarged box generates no pair report.
#[derive(Clone)]
pub struct BroadPhase {
    proxies: Slab<Proxy>,
    tree: RTree<ProxyBounds>,
    move_buffer: Vec<ProxyId>,
    aabb_extension: Real,
    aabb_multiplier: Real,
}

impl fmt::Debug for BroadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadPhase")
            .field("num_proxies", &self.proxies.len())
            .field("move_buffer", &self.move_buffer)
            .field("aabb_extension", &self.aabb_extension)
            .field("aabb_multiplier", &self.aabb_multiplier)
            .finish()
    }
}

fn proxy_bounds(aabb: &Aabb, id: ProxyId) -> ProxyBounds {
    GeomWithData::new(
        Rectangle::from_corners(aabb.mins.coords.into(), aabb.maxs.coords.into()),
        id,
    )
}

impl Default for BroadPhase {
    fn default() -> Self {
        Self::new(&ContactSettings::default())
    }
}

impl BroadPhase {
    /// Creates an empty broad-phase.
    pub fn new(settings: &ContactSettings) -> Self {
        Self {
            proxies: Slab::new(),
            tree: RTree::new(),
            move_buffer: Vec::new(),
            aabb_extension: settings.aabb_extension,
            aabb_multiplier: settings.aabb_multiplier,
        }
    }

    /// Creates the proxy of `collider` with a tight bounding box `aabb`.
    pub fn create_proxy(&mut self, aabb: &Aabb, collider: ColliderHandle) -> ProxyId {
        let fat_aabb = aabb.loosened(self.aabb_extension);
        let id = ProxyId(self.proxies.insert(Proxy { fat_aabb, collider }) as u32);
        self.tree.insert(proxy_bounds(&fat_aabb, id));
        self.move_buffer.push(id);
        id
    }

    /// Removes a proxy.
    pub fn destroy_proxy(&mut self, id: ProxyId) {
        if let Some(proxy) = self.proxies.try_remove(id.index()) {
            let _ = self.tree.remove(&proxy_bounds(&proxy.fat_aabb, id));
        }
        self.move_buffer.retain(|m| *m != id);
    }

    /// Updates the bounding box of a proxy.
    ///
    /// The enlarged box is recomputed only if `aabb` escapes it, in which case it is also
    /// stretched along the displacement and the proxy will be tested by the next
    /// [`BroadPhase::find_pairs`]. Returns `true` if the enlarged box changed.
    pub fn move_proxy(&mut self, id: ProxyId, aabb: &Aabb, displacement: &Vector<Real>) -> bool {
        let Some(proxy) = self.proxies.get_mut(id.index()) else {
            return false;
        };

        if proxy.fat_aabb.contains(aabb) {
            return false;
        }

        let _ = self.tree.remove(&proxy_bounds(&proxy.fat_aabb, id));
        proxy.fat_aabb = predicted_aabb(
            aabb,
            displacement,
            self.aabb_extension,
            self.aabb_multiplier,
        );
        self.tree.insert(proxy_bounds(&proxy.fat_aabb, id));
        self.move_buffer.push(id);
        true
    }

    /// Forces the pairs involving this proxy to be reported again by the next
    /// [`BroadPhase::find_pairs`].
    pub fn touch_proxy(&mut self, id: ProxyId) {
        if self.proxies.contains(id.index()) {
            self.move_buffer.push(id);
        }
    }

    /// Do the enlarged boxes of the proxies `a` and `b` overlap?
    pub fn test_overlap(&self, a: ProxyId, b: ProxyId) -> bool {
        match (self.proxies.get(a.index()), self.proxies.get(b.index())) {
            (Some(a), Some(b)) => a.fat_aabb.intersects(&b.fat_aabb),
            _ => false,
        }
    }

    /// The enlarged box of a proxy.
    pub fn fat_aabb(&self, id: ProxyId) -> Option<&Aabb> {
        self.proxies.get(id.index()).map(|p| &p.fat_aabb)
    }

    /// The collider a proxy was created for.
    pub fn collider(&self, id: ProxyId) -> Option<ColliderHandle> {
        self.proxies.get(id.index()).map(|p| p.collider)
    }

    /// The number of proxies.
    pub fn proxy_count(&self) -> usize {
        self.proxies.len()
    }

    /// Reports every overlapping pair of proxies involving at least one proxy that moved since
    /// the last call. Each pair is reported once.
    pub fn find_pairs(&mut self, mut callback: impl FnMut(ColliderHandle, ColliderHandle)) {
        let mut pairs = Vec::new();

        for id in &self.move_buffer {
            let Some(moved) = self.proxies.get(id.index()) else {
                continue;
            };

            let envelope = AABB::from_corners(
                moved.fat_aabb.mins.coords.into(),
                moved.fat_aabb.maxs.coords.into(),
            );
            for other in self.tree.locate_in_envelope_intersecting(&envelope) {
                if other.data != *id {
                    pairs.push((other.data.min(*id), other.data.max(*id)));
                }
            }
        }

        self.move_buffer.clear();
        pairs.sort_unstable();
        pairs.dedup();

        for (a, b) in pairs {
            callback(self.proxies[a.index()].collider, self.proxies[b.index()].collider);
        }
    }
}

/// Enlarges `aabb` by `extension` and stretches it along the predicted displacement.
pub(crate) fn predicted_aabb(
    aabb: &Aabb,
    displacement: &Vector<Real>,
    extension: Real,
    multiplier: Real,
) -> Aabb {
    let mut result = aabb.loosened(extension);
    let d = displacement * multiplier;

    for i in 0..3 {
        if d[i] < 0.0 {
            result.mins[i] += d[i];
        } else {
            result.maxs[i] += d[i];
        }
    }

    result
}
