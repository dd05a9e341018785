//! Value slots.
//!
//! Every node carries a slot which may or may not hold a value. A node
//! whose slot is empty is a junction: it exists only to factor a shared
//! prefix and is never reported as a stored key.
//!
//! Two strategies are provided:
//!  - [`Boxed`] owns an arbitrary value on the heap, for maps.
//!  - [`Counter`] embeds a count, for sets and multisets. Zero means
//!    absent, so no allocation is made per key.

use std::mem;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Storage strategy for the optional value held by a node.
pub trait ValueSlot: Default {
    /// The value type exposed to callers.
    type Value;

    /// Can a write through [`ValueSlot::get_mut`] leave the slot empty?
    const VACATED_BY_WRITES: bool = false;

    /// Does this slot hold a value?
    fn has_value(&self) -> bool;

    /// Borrow the value, if present.
    fn get(&self) -> Option<&Self::Value>;

    /// Mutably borrow the value, if present.
    fn get_mut(&mut self) -> Option<&mut Self::Value>;

    /// Replace the content of the slot, dropping any previous value.
    fn set(&mut self, value: Self::Value);

    /// Remove and return the value, leaving the slot empty.
    fn take(&mut self) -> Option<Self::Value>;

    /// Empty the slot.
    fn clear(&mut self) {
        self.take();
    }

    /// Exchange content with another slot.
    fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

/// A heap allocated, exclusively owned value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Boxed<V>(Option<Box<V>>);

// Derived Default would require V: Default.
impl<V> Default for Boxed<V> {
    fn default() -> Self {
        Boxed(None)
    }
}

impl<V> ValueSlot for Boxed<V> {
    type Value = V;

    #[inline(always)]
    fn has_value(&self) -> bool {
        self.0.is_some()
    }

    fn get(&self) -> Option<&V> {
        self.0.as_deref()
    }

    fn get_mut(&mut self) -> Option<&mut V> {
        self.0.as_deref_mut()
    }

    fn set(&mut self, value: V) {
        self.0 = Some(Box::new(value));
    }

    fn take(&mut self) -> Option<V> {
        self.0.take().map(|b| *b)
    }
}

/// An embedded occurrence count. Zero means the key is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Counter(usize);

impl ValueSlot for Counter {
    type Value = usize;

    // Writing zero.
    const VACATED_BY_WRITES: bool = true;

    #[inline(always)]
    fn has_value(&self) -> bool {
        self.0 != 0
    }

    fn get(&self) -> Option<&usize> {
        self.has_value().then_some(&self.0)
    }

    fn get_mut(&mut self) -> Option<&mut usize> {
        if self.has_value() {
            Some(&mut self.0)
        } else {
            None
        }
    }

    fn set(&mut self, value: usize) {
        self.0 = value;
    }

    fn take(&mut self) -> Option<usize> {
        let count = mem::take(&mut self.0);
        (count != 0).then_some(count)
    }
}
