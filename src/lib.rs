//! Provides a compressed prefix trie (a radix or PATRICIA trie) for storing
//! keys composed of sequences of atoms, with an optional value per key.
//!
//! Keys may be supplied as anything which implements
//! `IntoIterator<Item = A>`, where `A` implements [`crate::atom::TrieAtom`]:
//! bytes, chars and small integers out of the box. Runs of atoms which are
//! not shared with any other key are stored once, in a single node, so
//! long keys with common prefixes are cheap to hold.
//!
//! The container can act as a map or as a (multi)set, depending on how a
//! node stores its value:
//!  - [`TrieMap`] / [`TrieString`] / [`TrieBytes`] hold a boxed value per key
//!  - [`TrieSet`] holds an occurrence count per key, with no allocation
//!
//! Besides the usual map operations, the trie can scope iteration to every
//! key sharing a prefix ([`crate::trie::Trie::find_prefix`]).
//!
//! Examples:
//! * trie : [`crate::trie`]
//! * iterator : [`crate::iterator`]
//!
//! Typical usages for this data structure:
//!  - Interning
//!  - Storing large numbers of keys with significant amounts of
//!    sub-key duplication (paths, URLs, dotted names)
//!  - Prefix matching keys
//!  - Counting word occurrences
//!
//! The trie is not thread safe and must not be modified while cursors over
//! it are alive; the borrow checker enforces the latter.

#[cfg(feature = "serde")]
extern crate serde_crate;

mod arena;
mod node;
mod table;

pub mod atom;

pub mod config;

pub mod error;

pub mod iterator;

pub mod trie;

pub mod value;

pub use atom::TrieAtom;
pub use config::TrieConfig;
pub use error::{Result, TrieError};
pub use iterator::{Cursor, KeyValueRef};
pub use trie::Trie;
pub use value::{Boxed, Counter, ValueSlot};

/// A trie mapping keys of `A` atoms to values of `V`.
pub type TrieMap<A, V> = Trie<A, Boxed<V>>;

/// A trie counting occurrences of keys of `A` atoms.
pub type TrieSet<A> = Trie<A, Counter>;

/// A trie mapping char keys to values of `V`.
pub type TrieString<V> = TrieMap<char, V>;

/// A trie mapping byte keys to values of `V`.
pub type TrieBytes<V> = TrieMap<u8, V>;
