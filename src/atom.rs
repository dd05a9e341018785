//! The atom contract.
//!
//! An atom is the smallest unit of a key: a byte, a `char`, a small
//! integer. Child tables index nodes by the first atom of their prefix,
//! so an atom must expose a stable bit pattern to hash on.

use std::fmt::Debug;

/// Atoms which we wish to store in a Trie must implement
/// TrieAtom.
///
/// `bits` must be injective: two distinct atoms must never share a bit
/// pattern, otherwise no child table size can separate them.
pub trait TrieAtom: Copy + Eq + Ord + Debug {
    /// The bit pattern used by child tables to place this atom.
    fn bits(self) -> u32;
}

macro_rules! unsigned_atom {
    ($($t:ty),*) => {
        $(
            impl TrieAtom for $t {
                #[inline(always)]
                fn bits(self) -> u32 {
                    self as u32
                }
            }
        )*
    };
}

macro_rules! signed_atom {
    ($($t:ty => $u:ty),*) => {
        $(
            impl TrieAtom for $t {
                #[inline(always)]
                fn bits(self) -> u32 {
                    self as $u as u32
                }
            }
        )*
    };
}

unsigned_atom!(u8, u16, u32);
signed_atom!(i8 => u8, i16 => u16, i32 => u32);

impl TrieAtom for char {
    #[inline(always)]
    fn bits(self) -> u32 {
        self as u32
    }
}

/// The smallest power of two table size at which `a` and `b` land in
/// different buckets, given that they collide at every smaller size.
///
/// This is twice the lowest bit in which the two atoms differ, up to
/// `1 << 32`, so it does not always fit a `usize`.
pub(crate) fn least_uncolliding_size<A: TrieAtom>(a: A, b: A) -> u64 {
    let v = u64::from(a.bits() ^ b.bits());
    debug_assert_ne!(v, 0, "distinct atoms must have distinct bits");
    (v & v.wrapping_neg()) << 1
}
