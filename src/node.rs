//! Trie nodes and the store which owns them.
//!
//! Nodes never hold references to each other. Children are addressed by
//! [`NodeId`], an index into the [`NodeStore`], which only ever grows, so
//! an id stays valid for the lifetime of the trie. Node `0` is the root.

use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::arena::Prefix;
use crate::atom::TrieAtom;
use crate::table::ChildTable;
use crate::value::ValueSlot;

/// Index of a node in its [`NodeStore`].
pub(crate) type NodeId = usize;

/// The id of the root node of a non-empty trie.
pub(crate) const ROOT: NodeId = 0;

/// A prefix, an optional value and the children which extend the prefix.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct Node<A, S> {
    pub(crate) prefix: Prefix,
    pub(crate) slot: S,
    pub(crate) children: ChildTable<A>,
}

impl<A: TrieAtom, S: ValueSlot> Node<A, S> {
    fn new(prefix: Prefix) -> Self {
        Self {
            prefix,
            slot: S::default(),
            children: ChildTable::default(),
        }
    }
}

/// Append-only node storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct NodeStore<A, S> {
    nodes: Vec<Node<A, S>>,
}

impl<A, S> Default for NodeStore<A, S> {
    fn default() -> Self {
        Self { nodes: vec![] }
    }
}

impl<A: TrieAtom, S: ValueSlot> NodeStore<A, S> {
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node<A, S>> {
        self.nodes.iter()
    }

    /// Allocate a node with an empty slot and no children.
    pub(crate) fn push(&mut self, prefix: Prefix) -> NodeId {
        self.nodes.push(Node::new(prefix));
        self.nodes.len() - 1
    }

    #[inline(always)]
    pub(crate) fn get(&self, id: NodeId) -> &Node<A, S> {
        &self.nodes[id]
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<A, S> {
        &mut self.nodes[id]
    }

    /// Split node `id` after `at` atoms of its prefix.
    ///
    /// A new node receives the tail of the prefix, the whole child table
    /// and the value slot; `id` keeps the head of its prefix and gets the
    /// new node as its only child. `first` is the leading atom of the tail,
    /// i.e. atom `at` of the prefix before the split. Returns the new node.
    pub(crate) fn split(&mut self, id: NodeId, at: usize, first: A) -> NodeId {
        let node = &mut self.nodes[id];
        debug_assert!(at < node.prefix.len(), "split must leave a non-empty tail");
        let (head, tail) = node.prefix.split_at(at);
        node.prefix = head;
        let tail = Node {
            prefix: tail,
            slot: std::mem::take(&mut node.slot),
            children: std::mem::take(&mut node.children),
        };
        self.nodes.push(tail);
        let next = self.nodes.len() - 1;
        self.nodes[id].children.put(first, next);
        trace!(node = id, at, tail = next, "split node");
        next
    }
}
