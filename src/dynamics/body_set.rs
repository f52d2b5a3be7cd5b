use crate::dynamics::RigidBody;
use std::ops::{Index, IndexMut};

/// The index of a rigid body stored inside a [`BodySet`].
///
/// Handles are plain copyable indices: contacts and manifolds refer to bodies
/// through them instead of holding references, so nothing in the contact
/// pipeline can outlive or mutably alias the world's bodies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodyHandle(u32);

impl BodyHandle {
    /// The index of the body inside its set.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A stable arena of rigid bodies owned by the simulation world.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BodySet {
    bodies: Vec<RigidBody>,
}

impl BodySet {
    /// Creates an empty body set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bodies in this set.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Adds a body to this set and returns its handle.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    /// The body identified by `handle`, if it is part of this set.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    /// The mutable body identified by `handle`, if it is part of this set.
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.index())
    }

    /// Iterates over all the bodies of this set with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyHandle(i as u32), body))
    }
}

impl Index<BodyHandle> for BodySet {
    type Output = RigidBody;

    fn index(&self, handle: BodyHandle) -> &RigidBody {
        &self.bodies[handle.index()]
    }
}

impl IndexMut<BodyHandle> for BodySet {
    fn index_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.index()]
    }
}
