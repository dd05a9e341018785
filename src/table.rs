//! Per-node child index.
//!
//! A [`ChildTable`] maps the first atom of each child's prefix to the
//! child's [`NodeId`]. Siblings never share a first atom, so the table is
//! normally direct-mapped: bucket = `atom.bits() & (len - 1)`. When a new
//! atom lands on an occupied bucket the table grows to the smallest power
//! of two which separates the colliding pair.
//!
//! That size is capped at [`MAX_DIRECT_SIZE`]. Atoms which only differ in
//! high bits (`0` and `0x8000_0000` say) are instead placed by linear
//! probing from their bucket, and the table grows just enough to keep at
//! most half of its buckets occupied. Lookups scan forward until they hit the
//! atom or an empty bucket, which a direct-mapped table answers at once.

use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::atom::{least_uncolliding_size, TrieAtom};
use crate::node::NodeId;

/// An occupied bucket: the child's leading atom and the child itself.
pub(crate) type Edge<A> = (A, NodeId);

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct ChildTable<A> {
    slots: Vec<Option<Edge<A>>>,
}

impl<A> Default for ChildTable<A> {
    fn default() -> Self {
        Self { slots: vec![] }
    }
}

/// Largest table grown to separate a colliding pair.
pub(crate) const MAX_DIRECT_SIZE: usize = 1 << 10;

#[inline(always)]
fn bucket<A: TrieAtom>(atom: A, size: usize) -> usize {
    atom.bits() as usize & (size - 1)
}

impl<A: TrieAtom> ChildTable<A> {
    /// Number of buckets. Zero or a power of two.
    #[cfg(test)]
    pub(crate) fn size(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The bucket and child which start with `atom`.
    #[inline]
    pub(crate) fn find(&self, atom: A) -> Option<(usize, NodeId)> {
        let size = self.slots.len();
        if size == 0 {
            return None;
        }
        let mut slot = bucket(atom, size);
        for _ in 0..size {
            match self.slots[slot] {
                None => return None,
                Some((first, child)) if first == atom => return Some((slot, child)),
                Some(_) => slot = (slot + 1) & (size - 1),
            }
        }
        None
    }

    /// The first occupied bucket at or after `from`, and its child.
    pub(crate) fn next_child(&self, from: usize) -> Option<(usize, NodeId)> {
        self.slots
            .iter()
            .copied()
            .enumerate()
            .skip(from)
            .find_map(|(slot, edge)| edge.map(|(_, child)| (slot, child)))
    }

    /// Register a child whose prefix starts with `atom`.
    ///
    /// `atom` must not already be present.
    pub(crate) fn put(&mut self, atom: A, child: NodeId) {
        debug_assert!(self.find(atom).is_none(), "sibling atoms must be unique");
        if self.slots.is_empty() {
            self.slots = vec![None; 2];
        }
        let current = self.slots.len();
        let slot = bucket(atom, current);
        let Some((other, _)) = self.slots[slot] else {
            self.slots[slot] = Some((atom, child));
            return;
        };

        let wanted = least_uncolliding_size(atom, other);
        let mut size = match usize::try_from(wanted) {
            Ok(wanted) if wanted > current && wanted <= MAX_DIRECT_SIZE => wanted,
            _ => current,
        };
        // Probing needs free buckets.
        size = size.max(((self.len() + 1) * 2).next_power_of_two());

        if size == current {
            self.place(atom, child);
        } else {
            trace!(
                from = current,
                to = size,
                ?atom,
                ?other,
                "child table collision, resizing"
            );
            self.rebuild(size, (atom, child));
        }
    }

    /// Number of children.
    fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Put an edge in the first free bucket from its own. One must exist.
    fn place(&mut self, atom: A, child: NodeId) {
        let mask = self.slots.len() - 1;
        let mut slot = bucket(atom, self.slots.len());
        while self.slots[slot].is_some() {
            slot = (slot + 1) & mask;
        }
        self.slots[slot] = Some((atom, child));
    }

    /// Rebuild at `size` with every current edge plus `edge`.
    fn rebuild(&mut self, size: usize, edge: Edge<A>) {
        let edges: Vec<Edge<A>> = self
            .slots
            .iter()
            .flatten()
            .copied()
            .chain(std::iter::once(edge))
            .collect();
        self.slots = vec![None; size];
        for (atom, child) in edges {
            self.place(atom, child);
        }
    }
}
