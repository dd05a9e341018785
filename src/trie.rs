//! Provides a compressed prefix trie for storing keys composed of
//! sequences of atoms. A key may have an associated value.
//!
//! Atoms must support the [`TrieAtom`] trait. How a value is held is
//! chosen by the [`ValueSlot`] type parameter:
//!  - [`crate::value::Boxed`] for maps ([`crate::TrieMap`], [`crate::TrieString`])
//!  - [`crate::value::Counter`] for sets and multisets ([`crate::TrieSet`])
//!
//! Each node stores a whole run of atoms (its prefix), so a long key
//! shared by no other key costs a single node. Prefixes live in an
//! append-only arena, nodes in an append-only store, and children are
//! found through a small per-node hash table keyed on the first atom of
//! the child's prefix.
//!
//! Like the other methods, keys are anything which implements
//! `IntoIterator<Item = A>`.
//!
//! Example 1
//! ```
//! use patricia::TrieString;
//!
//! let mut trie = TrieString::new();
//! trie.insert("abc".chars(), 1);
//! trie.insert("abx".chars(), 2);
//!
//! assert_eq!(trie.get("abc".chars()), Some(&1));
//! assert_eq!(trie.get("abx".chars()), Some(&2));
//! assert_eq!(trie.get("ab".chars()), None);
//! assert!(trie.at("ab".chars()).is_err());
//! assert_eq!(trie.len(), 2);
//! ```
//!
//! Example 2
//! ```
//! use patricia::TrieString;
//!
//! let mut trie = TrieString::new();
//! trie.insert("/home/user1/audio".chars(), 10);
//! trie.insert("/home/user1/video".chars(), 11);
//! trie.insert("/home/user2/audio".chars(), 20);
//!
//! let (cursor, exact) = trie.find_prefix_exact("/home/user1".chars());
//! assert!(!exact);
//! let mut found: Vec<(String, i32)> = cursor
//!     .map(|kv| (kv.key.into_iter().collect(), *kv.value))
//!     .collect();
//! found.sort();
//! assert_eq!(
//!     found,
//!     vec![
//!         ("/home/user1/audio".to_string(), 10),
//!         ("/home/user1/video".to_string(), 11)
//!     ]
//! );
//! ```
//!
//! Example 3
//! ```
//! use patricia::TrieSet;
//!
//! let mut words = TrieSet::new();
//! for w in "the cat saw the other cat".split_whitespace() {
//!     words.add_key(w.bytes());
//! }
//! assert_eq!(words.get("cat".bytes()), Some(&2));
//! assert_eq!(words.get("saw".bytes()), Some(&1));
//! assert!(!words.contains("ca".bytes()));
//! assert_eq!(words.len(), 4);
//! ```

use std::ops::AddAssign;

use smallvec::SmallVec;
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::arena::AtomArena;
use crate::atom::TrieAtom;
use crate::config::TrieConfig;
use crate::error::{Result, TrieError};
use crate::iterator::{Cursor, KeyValueRef, Step};
use crate::node::{NodeId, NodeStore, ROOT};
use crate::value::{Counter, ValueSlot};

/// Query keys are collected here before searching.
pub(crate) type KeyBuf<A> = SmallVec<[A; 32]>;

/// Where a search stopped.
///
/// Offsets named `at` index into the node's prefix; offsets named `rest`
/// index into the query and mark its first unmatched atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Query and node prefix both consumed: `node` is the key's terminus.
    Exact { node: NodeId },
    /// Query consumed inside the node prefix.
    EndInMiddle { node: NodeId, at: usize },
    /// Query and node prefix diverge inside the node prefix.
    SplitInMiddle { node: NodeId, at: usize, rest: usize },
    /// Node prefix consumed but no child continues the query.
    NoEdge { node: NodeId, rest: usize },
}

/// A child entered by a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Descent {
    pub(crate) parent: NodeId,
    /// Bucket of `child` in the parent's child table.
    pub(crate) slot: usize,
    pub(crate) child: NodeId,
    /// Query offset of the child's first atom.
    pub(crate) rest: usize,
}

/// Stores keys of atoms as runs of atoms in a compressed trie.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Trie<A, S> {
    nodes: NodeStore<A, S>,
    atoms: AtomArena<A>,
    config: TrieConfig,
    count: usize,
    /// Set when a value was handed out mutably and writing through it may
    /// have emptied its slot. `count` is then recomputed on demand.
    stale: bool,
}

impl<A: TrieAtom, S: ValueSlot> Default for Trie<A, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TrieAtom, S: ValueSlot> Trie<A, S> {
    /// Create a new Trie.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Create a new Trie with the supplied config.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            nodes: NodeStore::default(),
            atoms: AtomArena::new(config.min_chunk_size),
            config,
            count: 0,
            stale: false,
        }
    }

    /// The config this Trie was created with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Clear the Trie.
    pub fn clear(&mut self) {
        debug!(
            keys = self.count,
            nodes = self.nodes.len(),
            chunks = self.atoms.chunk_count(),
            "clearing trie"
        );
        self.nodes.clear();
        self.atoms.clear();
        self.count = 0;
        self.stale = false;
    }

    /// How many keys does the Trie contain?
    #[inline(always)]
    pub fn len(&self) -> usize {
        if self.stale {
            self.present()
        } else {
            self.count
        }
    }

    /// Is the Trie empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many nodes, including junctions, does the Trie hold?
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// How many arena chunks hold the Trie's atoms?
    pub fn chunk_count(&self) -> usize {
        self.atoms.chunk_count()
    }

    /// Insert the key and value into the Trie. If the key is already present
    /// the value is replaced.
    pub fn insert<K: IntoIterator<Item = A>>(&mut self, key: K, value: S::Value) {
        self.insert_with(key, value, |old, new| *old = new)
    }

    /// Insert the key and value into the Trie. If the key is already present
    /// `combine` is called with the stored value and the incoming one.
    pub fn insert_with<K, F>(&mut self, key: K, value: S::Value, combine: F)
    where
        K: IntoIterator<Item = A>,
        F: FnOnce(&mut S::Value, S::Value),
    {
        let key: KeyBuf<A> = key.into_iter().collect();
        self.sync_count();

        if self.nodes.is_empty() {
            let prefix = self.atoms.push(&key, None);
            let root = self.nodes.push(prefix);
            self.fill(root, value);
            return;
        }

        match self.general_search(ROOT, 0, &key, |_| {}) {
            Outcome::Exact { node } => {
                let slot = &mut self.nodes.get_mut(node).slot;
                if let Some(existing) = slot.get_mut() {
                    combine(existing, value);
                    // A counter combined down to zero is gone.
                    if !slot.has_value() {
                        self.count -= 1;
                    }
                } else {
                    self.fill(node, value);
                }
            }
            Outcome::NoEdge { node, rest } => self.insert_leaf(node, &key[rest..], value),
            Outcome::EndInMiddle { node, at } => {
                self.split(node, at);
                self.fill(node, value);
            }
            Outcome::SplitInMiddle { node, at, rest } => {
                self.split(node, at);
                self.insert_leaf(node, &key[rest..], value);
            }
        }
    }

    /// Get a reference to a key's associated value.
    pub fn get<K: IntoIterator<Item = A>>(&self, key: K) -> Option<&S::Value> {
        let key: KeyBuf<A> = key.into_iter().collect();
        self.exact(&key)
            .and_then(|node| self.nodes.get(node).slot.get())
    }

    /// Get a mutable reference to a key's associated value.
    ///
    /// With a [`Counter`] slot, writing zero removes the key.
    pub fn get_mut<K: IntoIterator<Item = A>>(&mut self, key: K) -> Option<&mut S::Value> {
        let key: KeyBuf<A> = key.into_iter().collect();
        let node = self.exact(&key)?;
        self.value_mut(node)
    }

    /// Get a reference to a key's associated value, or a
    /// [`TrieError::NotFound`] error if the key is not stored.
    pub fn at<K: IntoIterator<Item = A>>(&self, key: K) -> Result<&S::Value> {
        let key: KeyBuf<A> = key.into_iter().collect();
        self.exact(&key)
            .and_then(|node| self.nodes.get(node).slot.get())
            .ok_or_else(|| TrieError::not_found(&key))
    }

    /// Get a mutable reference to a key's associated value, or a
    /// [`TrieError::NotFound`] error if the key is not stored.
    pub fn at_mut<K: IntoIterator<Item = A>>(&mut self, key: K) -> Result<&mut S::Value> {
        let key: KeyBuf<A> = key.into_iter().collect();
        self.exact(&key)
            .and_then(|node| self.value_mut(node))
            .ok_or_else(|| TrieError::not_found(&key))
    }

    /// Does the Trie contain the supplied key?
    pub fn contains<K: IntoIterator<Item = A>>(&self, key: K) -> bool {
        let key: KeyBuf<A> = key.into_iter().collect();
        self.exact(&key)
            .map_or(false, |node| self.nodes.get(node).slot.has_value())
    }

    /// Does the Trie contain a key starting with the supplied prefix?
    pub fn contains_prefix<P: IntoIterator<Item = A>>(&self, prefix: P) -> bool {
        !self.find_prefix(prefix).is_end()
    }

    /// A cursor positioned at the key, or the end cursor.
    ///
    /// Advancing the cursor continues through the rest of the Trie.
    pub fn find<K: IntoIterator<Item = A>>(&self, key: K) -> Cursor<'_, A, S> {
        if self.nodes.is_empty() {
            return Cursor::end();
        }
        let key: KeyBuf<A> = key.into_iter().collect();
        let mut path = vec![];
        match self.general_search(ROOT, 0, &key, |d| path.push(Step::from(d))) {
            Outcome::Exact { node } if self.nodes.get(node).slot.has_value() => {
                Cursor::with_path(self, ROOT, path, vec![])
            }
            _ => Cursor::end(),
        }
    }

    /// A cursor over every key starting with `prefix`, or the end cursor.
    pub fn find_prefix<P: IntoIterator<Item = A>>(&self, prefix: P) -> Cursor<'_, A, S> {
        self.find_prefix_exact(prefix).0
    }

    /// A cursor over every key starting with `prefix`, and whether
    /// `prefix` is itself a stored key.
    pub fn find_prefix_exact<P: IntoIterator<Item = A>>(
        &self,
        prefix: P,
    ) -> (Cursor<'_, A, S>, bool) {
        if self.nodes.is_empty() {
            return (Cursor::end(), false);
        }
        let prefix: KeyBuf<A> = prefix.into_iter().collect();
        self.scan_from(ROOT, 0, vec![], &prefix)
    }

    /// A cursor at the first key, or the end cursor if the Trie is empty.
    pub fn begin(&self) -> Cursor<'_, A, S> {
        if self.nodes.is_empty() {
            return Cursor::end();
        }
        Cursor::subtree(self, ROOT, vec![])
    }

    /// The end cursor. Every exhausted cursor compares equal to it.
    pub fn end(&self) -> Cursor<'_, A, S> {
        Cursor::end()
    }

    /// Create an iterator over the Trie.
    ///
    /// A key is always visited before any longer key it is a prefix of.
    /// Siblings are visited in table order, not sorted order.
    pub fn iter(&self) -> impl Iterator<Item = KeyValueRef<'_, A, S::Value>> {
        self.begin()
    }

    /// Create a sorted iterator over the Trie.
    pub fn iter_sorted(&self) -> impl Iterator<Item = KeyValueRef<'_, A, S::Value>> {
        let mut v = self.iter().collect::<Vec<KeyValueRef<'_, A, S::Value>>>();
        v.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        v.into_iter()
    }

    /// Walk from `start` matching `query`, skipping the first `skip` atoms
    /// of the start node's prefix. `on_edge` is called for every child
    /// descended into.
    pub(crate) fn general_search<F>(
        &self,
        start: NodeId,
        skip: usize,
        query: &[A],
        mut on_edge: F,
    ) -> Outcome
    where
        F: FnMut(Descent),
    {
        let mut node = start;
        let mut k = skip;
        let mut i = 0;

        loop {
            let current = self.nodes.get(node);
            let prefix = self.atoms.slice(current.prefix);

            while i < query.len() && k < prefix.len() && prefix[k] == query[i] {
                k += 1;
                i += 1;
            }

            if i == query.len() {
                if k == prefix.len() {
                    return Outcome::Exact { node };
                }
                return Outcome::EndInMiddle { node, at: k };
            }
            if k != prefix.len() {
                return Outcome::SplitInMiddle {
                    node,
                    at: k,
                    rest: i,
                };
            }

            match current.children.find(query[i]) {
                None => return Outcome::NoEdge { node, rest: i },
                Some((slot, child)) => {
                    on_edge(Descent {
                        parent: node,
                        slot,
                        child,
                        rest: i,
                    });
                    node = child;
                    // The table already matched the first atom.
                    k = 1;
                    i += 1;
                }
            }
        }
    }

    /// Prefix scan below `start`, after `skip` atoms of its prefix.
    ///
    /// `before` holds the key atoms preceding `start`'s prefix, so that the
    /// resulting cursor reconstructs full keys.
    pub(crate) fn scan_from(
        &self,
        start: NodeId,
        skip: usize,
        mut before: Vec<A>,
        query: &[A],
    ) -> (Cursor<'_, A, S>, bool) {
        let mut entered = None;
        let (node, exact) = match self.general_search(start, skip, query, |d| entered = Some(d.rest)) {
            Outcome::Exact { node } => (node, self.nodes.get(node).slot.has_value()),
            Outcome::EndInMiddle { node, .. } => (node, false),
            Outcome::SplitInMiddle { .. } | Outcome::NoEdge { .. } => {
                return (Cursor::end(), false)
            }
        };
        if let Some(rest) = entered {
            let skipped = &self.atoms.slice(self.nodes.get(start).prefix)[..skip];
            before.extend_from_slice(skipped);
            before.extend_from_slice(&query[..rest]);
        }
        (Cursor::subtree(self, node, before), exact)
    }

    #[inline(always)]
    pub(crate) fn nodes(&self) -> &NodeStore<A, S> {
        &self.nodes
    }

    #[inline(always)]
    pub(crate) fn atoms(&self) -> &AtomArena<A> {
        &self.atoms
    }

    fn exact(&self, key: &[A]) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        match self.general_search(ROOT, 0, key, |_| {}) {
            Outcome::Exact { node } => Some(node),
            _ => None,
        }
    }

    fn value_mut(&mut self, node: NodeId) -> Option<&mut S::Value> {
        let slot = &mut self.nodes.get_mut(node).slot;
        if S::VACATED_BY_WRITES && slot.has_value() {
            self.stale = true;
        }
        slot.get_mut()
    }

    /// Number of present slots, by walking every node.
    fn present(&self) -> usize {
        self.nodes.iter().filter(|node| node.slot.has_value()).count()
    }

    fn sync_count(&mut self) {
        if self.stale {
            self.count = self.present();
            self.stale = false;
        }
    }

    /// Store a value in an empty slot.
    fn fill(&mut self, node: NodeId, value: S::Value) {
        let slot = &mut self.nodes.get_mut(node).slot;
        debug_assert!(!slot.has_value());
        slot.set(value);
        if slot.has_value() {
            self.count += 1;
        }
    }

    fn insert_leaf(&mut self, parent: NodeId, suffix: &[A], value: S::Value) {
        debug_assert!(!suffix.is_empty());
        let hint = self.nodes.get(parent).prefix.chunk();
        let prefix = self.atoms.push(suffix, hint);
        let leaf = self.nodes.push(prefix);
        self.nodes.get_mut(parent).children.put(suffix[0], leaf);
        self.fill(leaf, value);
    }

    fn split(&mut self, node: NodeId, at: usize) -> NodeId {
        let first = self.atoms.slice(self.nodes.get(node).prefix)[at];
        self.nodes.split(node, at, first)
    }
}

impl<A: TrieAtom, S: ValueSlot> Trie<A, S>
where
    S::Value: AddAssign,
{
    /// Insert the key and value into the Trie. If the key is already present
    /// the value is added to the stored one.
    pub fn add<K: IntoIterator<Item = A>>(&mut self, key: K, value: S::Value) {
        self.insert_with(key, value, |old, new| *old += new)
    }
}

impl<A: TrieAtom> Trie<A, Counter> {
    /// Mark the key as present, resetting its count to one.
    pub fn insert_key<K: IntoIterator<Item = A>>(&mut self, key: K) {
        self.insert(key, 1)
    }

    /// Count one more occurrence of the key.
    pub fn add_key<K: IntoIterator<Item = A>>(&mut self, key: K) {
        self.add(key, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Boxed;

    type Map = Trie<char, Boxed<usize>>;

    fn search(trie: &Map, key: &str) -> Outcome {
        let key: Vec<char> = key.chars().collect();
        trie.general_search(ROOT, 0, &key, |_| {})
    }

    #[test]
    fn it_inserts_new_key() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 1);
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn it_finds_exact_key() {
        let mut trie = Map::new();
        let input = "abcdef".chars();
        trie.insert(input.clone(), 6);
        assert!(trie.contains(input.clone()));
        assert_eq!(trie.get(input), Some(&6));
    }

    #[test]
    fn it_cannot_find_longer_key() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 6);
        assert!(!trie.contains("abcdefg".chars()));
    }

    #[test]
    fn it_cannot_find_shorter_key() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 6);
        assert!(!trie.contains("abcde".chars()));
        assert!(trie.get("abcde".chars()).is_none());
    }

    #[test]
    fn it_classifies_search_outcomes() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("abx".chars(), 2);
        // root "ab" -> { "c", "x" }
        assert_eq!(search(&trie, "ab"), Outcome::Exact { node: ROOT });
        assert_eq!(search(&trie, "a"), Outcome::EndInMiddle { node: ROOT, at: 1 });
        assert_eq!(
            search(&trie, "az"),
            Outcome::SplitInMiddle {
                node: ROOT,
                at: 1,
                rest: 1
            }
        );
        assert_eq!(search(&trie, "abz"), Outcome::NoEdge { node: ROOT, rest: 2 });
        match search(&trie, "abc") {
            Outcome::Exact { node } => assert_ne!(node, ROOT),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn it_reports_every_edge_taken() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("abx".chars(), 2);
        trie.insert("abxyz".chars(), 3);
        let key: Vec<char> = "abxyz".chars().collect();
        let mut rests = vec![];
        trie.general_search(ROOT, 0, &key, |d| rests.push(d.rest));
        assert_eq!(rests, vec![2, 3]);
    }

    #[test]
    fn it_splits_without_losing_keys() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("abx".chars(), 2);
        assert_eq!(trie.get("abc".chars()), Some(&1));
        assert_eq!(trie.get("abx".chars()), Some(&2));
        assert_eq!(trie.len(), 2);
        // root "ab", children "c" and "x"
        assert_eq!(trie.node_count(), 3);
    }

    #[test]
    fn it_splits_when_key_ends_inside_prefix() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 6);
        trie.insert("abc".chars(), 3);
        assert_eq!(trie.get("abcdef".chars()), Some(&6));
        assert_eq!(trie.get("abc".chars()), Some(&3));
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn it_splits_the_root_at_its_first_atom() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("xyz".chars(), 2);
        trie.insert("".chars(), 0);
        assert_eq!(trie.get("abc".chars()), Some(&1));
        assert_eq!(trie.get("xyz".chars()), Some(&2));
        assert_eq!(trie.get("".chars()), Some(&0));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn it_counts_a_value_stored_on_a_junction() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("abx".chars(), 2);
        assert!(!trie.contains("ab".chars()));
        trie.insert("ab".chars(), 3);
        assert_eq!(trie.get("ab".chars()), Some(&3));
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.node_count(), 3);
    }

    #[test]
    fn it_overwrites_by_default() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        trie.insert("abc".chars(), 2);
        assert_eq!(trie.get("abc".chars()), Some(&2));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn it_accumulates_with_add() {
        let mut trie = Map::new();
        trie.add("abc".chars(), 1);
        trie.add("abc".chars(), 2);
        assert_eq!(trie.get("abc".chars()), Some(&3));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn it_applies_custom_combine_policy() {
        let mut trie: Trie<u8, Boxed<Vec<u32>>> = Trie::new();
        let keep_longest = |old: &mut Vec<u32>, new: Vec<u32>| {
            if new.len() > old.len() {
                *old = new;
            }
        };
        trie.insert_with(*b"k", vec![1, 2], keep_longest);
        trie.insert_with(*b"k", vec![3], keep_longest);
        assert_eq!(trie.get(*b"k"), Some(&vec![1, 2]));
    }

    #[test]
    fn it_reports_missing_key_from_at() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        assert_eq!(trie.at("abc".chars()), Ok(&1));
        assert_eq!(
            trie.at("ab".chars()),
            Err(TrieError::NotFound {
                key: "['a', 'b']".to_string()
            })
        );
        *trie.at_mut("abc".chars()).unwrap() = 5;
        assert_eq!(trie.get("abc".chars()), Some(&5));
        assert!(trie.at_mut("abd".chars()).is_err());
    }

    #[test]
    fn it_mutates_through_get_mut() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        if let Some(v) = trie.get_mut("abc".chars()) {
            *v += 10;
        }
        assert_eq!(trie.get("abc".chars()), Some(&11));
        assert!(trie.get_mut("abcd".chars()).is_none());
    }

    #[test]
    fn it_can_find_prefix_keys() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 6);
        assert!(trie.contains_prefix("abc".chars()));
        assert!(trie.contains_prefix("abcdef".chars()));
        assert!(trie.contains_prefix("".chars()));
        assert!(!trie.contains_prefix("abd".chars()));
        assert!(!trie.contains_prefix("abcdefg".chars()));
    }

    #[test]
    fn it_handles_the_empty_trie() {
        let trie = Map::new();
        assert!(trie.is_empty());
        assert_eq!(trie.get("something".chars()), None);
        assert_eq!(trie.get("".chars()), None);
        assert!(!trie.contains("".chars()));
        assert!(trie.at("".chars()).is_err());
        assert!(trie.find("".chars()) == trie.end());
        assert!(trie.find_prefix("".chars()) == trie.end());
        assert!(trie.find("something".chars()) == trie.end());
        assert!(trie.find_prefix("something".chars()) == trie.end());
        assert!(trie.begin() == trie.end());
    }

    #[test]
    fn it_can_clear_a_trie() {
        let mut trie = Map::new();
        trie.insert("abcdef".chars(), 1);
        trie.insert("abc".chars(), 2);
        trie.clear();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 0);
        assert_eq!(trie.chunk_count(), 0);
        assert!(!trie.contains("abcdef".chars()));
        trie.insert("xyz".chars(), 3);
        assert_eq!(trie.get("xyz".chars()), Some(&3));
    }

    #[test]
    fn it_packs_fragments_when_configured() {
        let mut packed: Map = Trie::with_config(TrieConfig::new().with_min_chunk_size(64));
        let mut loose = Map::new();
        for (i, w) in ["code", "coder", "coding", "codec", "codex", "cod"].iter().enumerate() {
            packed.insert(w.chars(), i);
            loose.insert(w.chars(), i);
        }
        assert_eq!(packed.chunk_count(), 1);
        assert!(loose.chunk_count() > 1);
        for (i, w) in ["code", "coder", "coding", "codec", "codex", "cod"].iter().enumerate() {
            assert_eq!(packed.get(w.chars()), Some(&i));
            assert_eq!(loose.get(w.chars()), Some(&i));
        }
    }

    #[test]
    fn it_counts_set_membership() {
        let mut set: Trie<char, Counter> = Trie::new();
        set.insert_key("a".chars());
        set.insert_key("a".chars());
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a".chars()), Some(&1));
        set.add_key("a".chars());
        set.add_key("a".chars());
        assert_eq!(set.get("a".chars()), Some(&3));
        assert!(set.contains("a".chars()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn it_does_not_count_zero_as_present() {
        let mut set: Trie<char, Counter> = Trie::new();
        set.insert("ab".chars(), 0);
        assert!(!set.contains("ab".chars()));
        assert_eq!(set.len(), 0);
        set.add_key("ab".chars());
        assert!(set.contains("ab".chars()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn it_uncounts_keys_overwritten_with_zero() {
        let mut set: Trie<char, Counter> = Trie::new();
        set.insert_key("a".chars());
        set.insert_key("ab".chars());
        set.insert("a".chars(), 0);
        assert!(!set.contains("a".chars()));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().count(), 1);

        // A combine policy which empties the slot.
        set.insert_with("ab".chars(), 5, |old, new| *old = old.saturating_sub(new));
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);

        set.add_key("a".chars());
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a".chars()), Some(&1));
    }

    #[test]
    fn it_uncounts_keys_zeroed_in_place() {
        let mut set: Trie<char, Counter> = Trie::new();
        set.insert_key("a".chars());
        set.insert_key("b".chars());
        set.insert_key("c".chars());

        *set.get_mut("a".chars()).unwrap() = 0;
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().count(), 2);

        *set.at_mut("b".chars()).unwrap() = 0;
        assert_eq!(set.len(), 1);
        assert!(set.at_mut("b".chars()).is_err());

        // Later inserts see the corrected count.
        set.insert_key("a".chars());
        set.insert_key("d".chars());
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().count(), 3);

        *set.get_mut("c".chars()).unwrap() += 1;
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn it_keeps_count_when_boxed_values_are_mutated() {
        let mut trie = Map::new();
        trie.insert("abc".chars(), 1);
        *trie.get_mut("abc".chars()).unwrap() = 0;
        assert_eq!(trie.len(), 1);
        assert!(!trie.stale);
        assert_eq!(trie.get("abc".chars()), Some(&0));
    }

    #[test]
    fn it_stores_atoms_differing_in_the_top_bit() {
        let mut trie: Trie<u32, Boxed<u8>> = Trie::new();
        trie.insert([0, 0], 1);
        trie.insert([0, 0x8000_0000], 2);
        trie.insert([0, 0x4000_0000], 3);
        assert_eq!(trie.get([0, 0]), Some(&1));
        assert_eq!(trie.get([0, 0x8000_0000]), Some(&2));
        assert_eq!(trie.get([0, 0x4000_0000]), Some(&3));
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.iter().count(), 3);

        let mut trie: Trie<i32, Boxed<u8>> = Trie::new();
        trie.insert([-1], 1);
        trie.insert([i32::MAX], 2);
        assert_eq!(trie.get([-1]), Some(&1));
        assert_eq!(trie.get([i32::MAX]), Some(&2));

        let mut trie: Trie<char, Boxed<u8>> = Trie::new();
        trie.insert("xa".chars(), 1);
        trie.insert("x\u{100061}".chars(), 2);
        assert_eq!(trie.get("xa".chars()), Some(&1));
        assert_eq!(trie.get("x\u{100061}".chars()), Some(&2));
    }

    // u32 unit tests
    #[test]
    fn it_finds_exact_u32_key() {
        let mut trie: Trie<u32, Boxed<()>> = Trie::new();
        let input = [0, 1, 2, 3, 4, 5, 6];
        trie.insert(input, ());
        assert!(trie.contains(input));
        assert!(!trie.contains([0, 1, 2, 3, 4, 5]));
    }

    // serialization test
    #[test]
    fn it_serializes_trie_to_json() {
        let mut t1: Trie<u32, Boxed<u32>> = Trie::new();
        t1.insert([0, 1, 2, 3, 4, 5, 6], 7);
        t1.insert([0, 1, 2, 9], 4);
        // Round trip via serde to create a new trie and then
        // check for equality
        let t_str = serde_json::to_string(&t1).expect("serializing");
        let t2: Trie<u32, Boxed<u32>> = serde_json::from_str(&t_str).expect("deserializing");
        assert_eq!(t1, t2);
        assert_eq!(t2.get([0, 1, 2, 9]), Some(&4));
    }
}
