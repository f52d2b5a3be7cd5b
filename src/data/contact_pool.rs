use crate::dynamics::Contact;
use crate::geometry::ContactInfo;
use std::ops::{Index, IndexMut};

/// The index of a contact stored inside a [`ContactPool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactHandle(u32);

impl ContactHandle {
    /// The index of the contact slot inside its pool.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
enum Slot {
    Vacant { next_free: Option<u32> },
    Occupied(Contact),
}

/// A slab allocator for [`Contact`] objects.
///
/// Slots released by [`ContactPool::release`] are chained into a free list
/// and recycled by the next [`ContactPool::construct`], so a simulation in
/// steady state builds and drops contacts every step without touching the
/// general heap. Handles stay valid until their slot is released.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactPool {
    slots: Vec<Slot>,
    first_free: Option<u32>,
    len: usize,
}

impl ContactPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool with room for `capacity` contacts.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            first_free: None,
            len: 0,
        }
    }

    /// The number of live contacts in this pool.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is this pool devoid of live contacts?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The total number of slots (live and vacant) owned by this pool.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Builds a new [`Contact`] from `info` inside this pool.
    ///
    /// The most recently vacated slot is recycled if one exists; otherwise
    /// the pool grows by one slot.
    pub fn construct(&mut self, info: &ContactInfo) -> ContactHandle {
        let contact = Contact::new(info);
        self.len += 1;

        match self.first_free {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                match *slot {
                    Slot::Vacant { next_free } => self.first_free = next_free,
                    Slot::Occupied(_) => unreachable!("corrupt contact pool free list"),
                }
                *slot = Slot::Occupied(contact);
                ContactHandle(index)
            }
            None => {
                self.slots.push(Slot::Occupied(contact));
                ContactHandle(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Destroys the contact identified by `handle` and recycles its slot.
    ///
    /// Panics if `handle` does not identify a live contact of this pool.
    pub fn release(&mut self, handle: ContactHandle) {
        let slot = &mut self.slots[handle.index()];
        assert!(
            matches!(slot, Slot::Occupied(_)),
            "released a vacant contact slot"
        );

        *slot = Slot::Vacant {
            next_free: self.first_free,
        };
        self.first_free = Some(handle.0);
        self.len -= 1;
    }

    /// The contact identified by `handle`, if it is live.
    pub fn get(&self, handle: ContactHandle) -> Option<&Contact> {
        match self.slots.get(handle.index()) {
            Some(Slot::Occupied(contact)) => Some(contact),
            _ => None,
        }
    }

    /// The mutable contact identified by `handle`, if it is live.
    pub fn get_mut(&mut self, handle: ContactHandle) -> Option<&mut Contact> {
        match self.slots.get_mut(handle.index()) {
            Some(Slot::Occupied(contact)) => Some(contact),
            _ => None,
        }
    }
}

impl Index<ContactHandle> for ContactPool {
    type Output = Contact;

    fn index(&self, handle: ContactHandle) -> &Contact {
        self.get(handle).expect("stale contact handle")
    }
}

impl IndexMut<ContactHandle> for ContactPool {
    fn index_mut(&mut self, handle: ContactHandle) -> &mut Contact {
        self.get_mut(handle).expect("stale contact handle")
    }
}
