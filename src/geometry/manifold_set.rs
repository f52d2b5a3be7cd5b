use crate::data::ContactPool;
use crate::dynamics::BodyHandle;
use crate::geometry::PersistentContactManifold;
use crate::utils::SortedPair;
use std::collections::HashMap;

/// The registry of persistent contact manifolds, keyed by body pair.
///
/// A manifold is created the first time a pair of bodies produces a contact
/// and destroyed when the pair is broken or one of its bodies is removed from
/// the world. The key is unordered: the pair `(a, b)` and the pair `(b, a)`
/// map to the same manifold.
#[derive(Clone, Debug, Default)]
pub struct ManifoldSet {
    manifolds: HashMap<SortedPair<BodyHandle>, PersistentContactManifold>,
}

impl ManifoldSet {
    /// Creates an empty manifold registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of manifolds in this registry.
    pub fn len(&self) -> usize {
        self.manifolds.len()
    }

    /// Is this registry empty?
    pub fn is_empty(&self) -> bool {
        self.manifolds.is_empty()
    }

    /// The manifold of the pair `(body1, body2)`, if it exists.
    pub fn get(&self, body1: BodyHandle, body2: BodyHandle) -> Option<&PersistentContactManifold> {
        self.manifolds.get(&SortedPair::new(body1, body2))
    }

    /// The mutable manifold of the pair `(body1, body2)`, if it exists.
    pub fn get_mut(
        &mut self,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> Option<&mut PersistentContactManifold> {
        self.manifolds.get_mut(&SortedPair::new(body1, body2))
    }

    /// The manifold of the pair `(body1, body2)`, created empty if the pair
    /// had none.
    pub fn get_or_insert(
        &mut self,
        body1: BodyHandle,
        body2: BodyHandle,
    ) -> &mut PersistentContactManifold {
        self.manifolds
            .entry(SortedPair::new(body1, body2))
            .or_insert_with(|| PersistentContactManifold::new(body1, body2))
    }

    /// Destroys the manifold of the pair `(body1, body2)`, releasing its
    /// contacts through the pool.
    pub fn remove(&mut self, body1: BodyHandle, body2: BodyHandle, pool: &mut ContactPool) {
        if let Some(mut manifold) = self.manifolds.remove(&SortedPair::new(body1, body2)) {
            manifold.clear(pool);
            log::debug!("removed the manifold of a broken body pair");
        }
    }

    /// Destroys every manifold attached to `body`, releasing their contacts
    /// through the pool.
    ///
    /// Called by the world when a body is destroyed.
    pub fn remove_body(&mut self, body: BodyHandle, pool: &mut ContactPool) {
        let mut removed = 0usize;

        self.manifolds.retain(|pair, manifold| {
            if pair.first() == body || pair.second() == body {
                manifold.clear(pool);
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            log::debug!("removed {} manifold(s) attached to a destroyed body", removed);
        }
    }

    /// Iterates over all the manifolds of this registry.
    pub fn iter(&self) -> impl Iterator<Item = &PersistentContactManifold> {
        self.manifolds.values()
    }

    /// Iterates mutably over all the manifolds of this registry.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PersistentContactManifold> {
        self.manifolds.values_mut()
    }
}
