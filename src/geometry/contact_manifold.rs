use crate::data::{ContactHandle, ContactPool};
use crate::dynamics::{BodyHandle, Contact};
use crate::math::{Isometry, Point, Real};
use arrayvec::ArrayVec;
use na::distance_squared;

/// The maximum number of contact points a persistent manifold retains.
pub const MAX_CONTACTS_IN_CACHE: usize = 4;

/// The largest distance, in the plane orthogonal to the contact normal,
/// allowed between the two anchors of a cached contact before it is dropped.
pub const PERSISTENT_CONTACT_DIST_THRESHOLD: Real = 0.02;

/// The squared distance between local anchors under which two contacts are
/// considered the same point.
pub const CONTACT_MATCH_SQ_TOLERANCE: Real = 1.0e-6;

/// The persistent cache of contact points between one pair of bodies.
///
/// Narrow phase runs every step, but feeding its raw output straight to the
/// solver makes stacks jitter: points appear and vanish from frame to frame
/// and the solver never warm-starts. This cache keeps up to
/// [`MAX_CONTACTS_IN_CACHE`] points alive across steps. New points that
/// duplicate a cached one are discarded, points invalidated by body motion
/// are swept out by [`update`](Self::update), and when the cache is full the
/// point whose removal leaves the largest tangential support area is evicted,
/// while the deepest point is protected.
///
/// Contacts are owned by a [`ContactPool`] borrowed at each call site; the
/// manifold stores their handles.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PersistentContactManifold {
    body1: BodyHandle,
    body2: BodyHandle,
    contacts: ArrayVec<ContactHandle, MAX_CONTACTS_IN_CACHE>,
}

impl PersistentContactManifold {
    /// Creates an empty manifold for the given pair of bodies.
    pub fn new(body1: BodyHandle, body2: BodyHandle) -> Self {
        Self {
            body1,
            body2,
            contacts: ArrayVec::new(),
        }
    }

    /// The first body of the pair this manifold belongs to.
    pub fn body1(&self) -> BodyHandle {
        self.body1
    }

    /// The second body of the pair this manifold belongs to.
    pub fn body2(&self) -> BodyHandle {
        self.body2
    }

    /// The number of live contacts in the cache, in `0..=4`.
    pub fn nb_contacts(&self) -> usize {
        self.contacts.len()
    }

    /// The handle of the `i`-th live contact.
    pub fn contact_handle(&self, i: usize) -> ContactHandle {
        self.contacts[i]
    }

    /// The `i`-th live contact.
    pub fn contact<'a>(&self, pool: &'a ContactPool, i: usize) -> &'a Contact {
        &pool[self.contacts[i]]
    }

    /// Inserts a freshly constructed contact into the cache.
    ///
    /// If the new point duplicates a cached point (same local anchor on the
    /// first body, within tolerance) the newcomer is released and the cache is
    /// left untouched. If the cache is full, one cached point is evicted: the
    /// candidate whose removal leaves the largest tangential area covered by
    /// the remaining points and the newcomer, never the point with the
    /// deepest penetration.
    pub fn add(&mut self, contact: ContactHandle, pool: &mut ContactPool) {
        let new_local_p1 = pool[contact].local_p1();

        // The first writer wins: a point already in the cache keeps its
        // accumulated solver state, so the newcomer is the one discarded.
        for &cached in &self.contacts {
            let dist_sq = distance_squared(&pool[cached].local_p1(), &new_local_p1);
            if dist_sq < CONTACT_MATCH_SQ_TOLERANCE {
                pool.release(contact);
                return;
            }
        }

        if self.contacts.is_full() {
            let protected = self.index_of_deepest_penetration(pool, contact);
            let evicted = self.index_to_remove(pool, protected, &new_local_p1);
            pool.release(self.contacts[evicted]);
            self.contacts[evicted] = contact;
            return;
        }

        self.contacts.push(contact);
    }

    /// Refreshes the cache after the bodies have moved.
    ///
    /// The world-space anchors of every cached contact are recomputed from
    /// the bodies' current transforms and the penetration depth is re-derived
    /// as `(world_p1 - world_p2) · normal`. Contacts whose depth became
    /// non-positive (the bodies separated there) and contacts whose anchors
    /// drifted apart in the tangent plane beyond
    /// [`PERSISTENT_CONTACT_DIST_THRESHOLD`] no longer describe the same
    /// physical touch and are removed.
    ///
    /// The normal is never recomputed: a point whose frozen normal became
    /// wrong accumulates tangential drift and is swept out by this very
    /// criterion.
    pub fn update(
        &mut self,
        pool: &mut ContactPool,
        transform1: &Isometry<Real>,
        transform2: &Isometry<Real>,
    ) {
        debug_assert!(transform_is_finite(transform1) && transform_is_finite(transform2));

        if self.contacts.is_empty() {
            return;
        }

        for &handle in &self.contacts {
            let contact = &mut pool[handle];
            contact.set_world_p1(transform1 * contact.local_p1());
            contact.set_world_p2(transform2 * contact.local_p2());

            let depth = (contact.world_p1() - contact.world_p2()).dot(&contact.normal());
            contact.set_penetration(depth);
        }

        // Iterate from the last contact so a swap-remove never skips a slot.
        for i in (0..self.contacts.len()).rev() {
            let contact = &pool[self.contacts[i]];
            let depth = contact.penetration();

            if depth <= 0.0 {
                self.remove(i, pool);
                continue;
            }

            // Distance between the two anchors in the plane orthogonal to
            // the contact normal.
            let proj_of_p1 = contact.world_p1() - contact.normal().into_inner() * depth;
            let proj_difference = contact.world_p2() - proj_of_p1;

            if proj_difference.norm_squared()
                > PERSISTENT_CONTACT_DIST_THRESHOLD * PERSISTENT_CONTACT_DIST_THRESHOLD
            {
                self.remove(i, pool);
            }
        }
    }

    /// Removes the `i`-th live contact, releasing it through the pool.
    ///
    /// This is a swap-remove: the last live contact takes slot `i`. The
    /// solver rebuilds its indexing every iteration, so the order of the
    /// survivors carries no meaning.
    pub fn remove(&mut self, i: usize, pool: &mut ContactPool) {
        assert!(i < self.contacts.len());
        pool.release(self.contacts.swap_remove(i));
    }

    /// Releases every live contact and empties the cache.
    pub fn clear(&mut self, pool: &mut ContactPool) {
        for handle in self.contacts.drain(..) {
            pool.release(handle);
        }
    }

    /// The index of the cached contact with a penetration depth strictly
    /// greater than every other's, the candidate contact's included.
    ///
    /// Returns `None` when the candidate itself is the deepest; the eviction
    /// search then runs over all four slots.
    fn index_of_deepest_penetration(
        &self,
        pool: &ContactPool,
        candidate: ContactHandle,
    ) -> Option<usize> {
        debug_assert!(self.contacts.is_full());

        let mut max_depth = pool[candidate].penetration();
        let mut deepest = None;

        for (i, &cached) in self.contacts.iter().enumerate() {
            if pool[cached].penetration() > max_depth {
                max_depth = pool[cached].penetration();
                deepest = Some(i);
            }
        }

        deepest
    }

    /// The index whose eviction, with `new_point` inserted, keeps the largest
    /// tangential area covered by the cache.
    ///
    /// Each candidate quadrilateral is scored by the squared cross product of
    /// two of its edges; the local anchors on the first body are used so the
    /// score does not change under rigid motion of that body. `protected` (the
    /// deepest point) is never evicted.
    fn index_to_remove(
        &self,
        pool: &ContactPool,
        protected: Option<usize>,
        new_point: &Point<Real>,
    ) -> usize {
        debug_assert!(self.contacts.is_full());

        let p = |i: usize| pool[self.contacts[i]].local_p1();

        let mut area0 = 0.0;
        let mut area1 = 0.0;
        let mut area2 = 0.0;
        let mut area3 = 0.0;

        if protected != Some(0) {
            // Area covered by contacts 1, 2, 3 and the new point.
            area0 = (new_point - p(1)).cross(&(p(3) - p(2))).norm_squared();
        }
        if protected != Some(1) {
            // Area covered by contacts 0, 2, 3 and the new point.
            area1 = (new_point - p(0)).cross(&(p(3) - p(2))).norm_squared();
        }
        if protected != Some(2) {
            // Area covered by contacts 0, 1, 3 and the new point.
            area2 = (new_point - p(0)).cross(&(p(3) - p(1))).norm_squared();
        }
        if protected != Some(3) {
            // Area covered by contacts 0, 1, 2 and the new point.
            area3 = (new_point - p(0)).cross(&(p(2) - p(1))).norm_squared();
        }

        max_area_index(area0, area1, area2, area3)
    }
}

/// The index of the largest of the four areas.
fn max_area_index(area0: Real, area1: Real, area2: Real, area3: Real) -> usize {
    if area0 < area1 {
        if area1 < area2 {
            if area2 < area3 {
                3
            } else {
                2
            }
        } else if area1 < area3 {
            3
        } else {
            1
        }
    } else if area0 < area2 {
        if area2 < area3 {
            3
        } else {
            2
        }
    } else if area0 < area3 {
        3
    } else {
        0
    }
}

fn transform_is_finite(transform: &Isometry<Real>) -> bool {
    transform.translation.vector.iter().all(|x| x.is_finite())
        && transform.rotation.coords.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod test {
    use super::max_area_index;

    #[test]
    fn max_area_index_picks_the_argmax() {
        assert_eq!(max_area_index(4.0, 1.0, 2.0, 3.0), 0);
        assert_eq!(max_area_index(1.0, 4.0, 2.0, 3.0), 1);
        assert_eq!(max_area_index(1.0, 2.0, 4.0, 3.0), 2);
        assert_eq!(max_area_index(1.0, 2.0, 3.0, 4.0), 3);
    }

    #[test]
    fn max_area_index_breaks_full_ties_downward() {
        assert_eq!(max_area_index(1.0, 1.0, 1.0, 1.0), 0);
    }
}
