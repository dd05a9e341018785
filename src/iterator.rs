//! Provides Trie cursors and iterators.
//!
//! Nodes do not know their parents, so a [`Cursor`] carries the whole path
//! from the root of its scope down to its position: one step per level,
//! each remembering which child table bucket it went through. Keys are
//! rebuilt from that path on demand.
//!
//! A cursor borrows its trie, so the trie cannot be modified while any
//! cursor over it is alive.
use crate::atom::TrieAtom;
use crate::node::{Node, NodeId};
use crate::trie::{Descent, KeyBuf, Trie};
use crate::value::ValueSlot;

/// Iterator Item
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValueRef<'a, A, V> {
    pub key: Vec<A>,
    pub value: &'a V,
}

/// One level of a cursor's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    parent: NodeId,
    slot: usize,
    node: NodeId,
}

impl From<Descent> for Step {
    fn from(d: Descent) -> Self {
        Step {
            parent: d.parent,
            slot: d.slot,
            node: d.child,
        }
    }
}

/// A position in a trie, or the end.
///
/// A cursor is scoped to the subtree it was created for: [`Trie::begin`]
/// and [`Trie::find`] walk the whole trie, [`Trie::find_prefix`] only the
/// keys below the prefix. Advancing past the last key of the scope turns
/// the cursor into the end cursor.
///
/// Keys are visited depth first: a key always comes before the longer
/// keys it is a prefix of. Siblings are not sorted.
///
/// Two cursors are equal when both are at the end, or both are at the
/// same node. Comparing cursors over different tries is meaningless.
#[derive(Debug)]
pub struct Cursor<'a, A, S> {
    /// `None` once the cursor is at the end.
    trie: Option<&'a Trie<A, S>>,
    root: NodeId,
    path: Vec<Step>,
    /// Key atoms preceding the root's prefix.
    base: Vec<A>,
}

impl<A: Copy, S> Clone for Cursor<'_, A, S> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie,
            root: self.root,
            path: self.path.clone(),
            base: self.base.clone(),
        }
    }
}

impl<'a, A: TrieAtom, S: ValueSlot> Cursor<'a, A, S> {
    /// The end cursor.
    pub fn end() -> Self {
        Self {
            trie: None,
            root: 0,
            path: vec![],
            base: vec![],
        }
    }

    /// A cursor over the subtree at `root`, on its first key.
    pub(crate) fn subtree(trie: &'a Trie<A, S>, root: NodeId, base: Vec<A>) -> Self {
        Self::with_path(trie, root, vec![], base)
    }

    /// A cursor over the subtree at `root`, at the end of `path`.
    pub(crate) fn with_path(
        trie: &'a Trie<A, S>,
        root: NodeId,
        path: Vec<Step>,
        base: Vec<A>,
    ) -> Self {
        let mut cursor = Self {
            trie: Some(trie),
            root,
            path,
            base,
        };
        cursor.normalize();
        cursor
    }

    /// Is this the end cursor?
    pub fn is_end(&self) -> bool {
        self.trie.is_none()
    }

    /// The key at the cursor, or `None` at the end.
    ///
    /// Rebuilt from the path on every call.
    pub fn key(&self) -> Option<Vec<A>> {
        let trie = self.trie?;
        let mut key = self.base.clone();
        key.extend_from_slice(self.atoms_of(trie, self.root));
        for step in &self.path {
            key.extend_from_slice(self.atoms_of(trie, step.node));
        }
        Some(key)
    }

    /// The value at the cursor, or `None` at the end.
    pub fn value(&self) -> Option<&'a S::Value> {
        self.current_node()?.slot.get()
    }

    /// Move to the next key in scope. Returns `false` once at the end.
    pub fn advance_to_value(&mut self) -> bool {
        loop {
            self.advance();
            match self.current_node() {
                None => return false,
                Some(node) if node.slot.has_value() => return true,
                Some(_) => {}
            }
        }
    }

    /// A cursor over the keys which extend this cursor's key by `prefix`,
    /// and whether that extended key is itself stored.
    ///
    /// Unlike [`Trie::find_prefix`], `prefix` is not matched from the
    /// start of the key: matching begins right after the current node's
    /// prefix, so `prefix` holds only the atoms beyond the current key.
    /// An empty `prefix` scans the current node's whole subtree. Keys
    /// yielded are still full keys.
    ///
    /// Returns the end cursor when nothing matches or this cursor is at
    /// the end.
    pub fn find_prefix<P: IntoIterator<Item = A>>(&self, prefix: P) -> (Cursor<'a, A, S>, bool) {
        let (Some(trie), Some(node)) = (self.trie, self.current()) else {
            return (Cursor::end(), false);
        };
        let query: KeyBuf<A> = prefix.into_iter().collect();

        // Atoms of everything above the current node.
        let mut before = self.base.clone();
        if let Some((_, above)) = self.path.split_last() {
            before.extend_from_slice(self.atoms_of(trie, self.root));
            for step in above {
                before.extend_from_slice(self.atoms_of(trie, step.node));
            }
        }

        let skip = trie.nodes().get(node).prefix.len();
        trie.scan_from(node, skip, before, &query)
    }

    /// Descend into the first child of the current node.
    pub(crate) fn step_down(&mut self) -> bool {
        let (Some(trie), Some(parent)) = (self.trie, self.current()) else {
            return false;
        };
        match trie.nodes().get(parent).children.next_child(0) {
            Some((slot, node)) => {
                self.path.push(Step { parent, slot, node });
                true
            }
            None => false,
        }
    }

    /// Move to the next sibling of the current node.
    pub(crate) fn step_fore(&mut self) -> bool {
        let Some(trie) = self.trie else {
            return false;
        };
        let Some(step) = self.path.last_mut() else {
            return false;
        };
        match trie.nodes().get(step.parent).children.next_child(step.slot + 1) {
            Some((slot, node)) => {
                step.slot = slot;
                step.node = node;
                true
            }
            None => false,
        }
    }

    /// Move to the next sibling of the parent.
    pub(crate) fn step_up(&mut self) -> bool {
        self.path.pop();
        self.step_fore()
    }

    /// Move to the next node in pre-order, whether it holds a value or not.
    pub(crate) fn advance(&mut self) {
        if self.trie.is_none() {
            return;
        }
        if self.step_down() || self.step_fore() {
            return;
        }
        while !self.path.is_empty() {
            if self.step_up() {
                return;
            }
        }
        *self = Self::end();
    }

    /// Skip forward from a junction to the first key.
    fn normalize(&mut self) {
        if matches!(self.current_node(), Some(node) if !node.slot.has_value()) {
            self.advance_to_value();
        }
    }

    fn current(&self) -> Option<NodeId> {
        self.trie?;
        Some(self.path.last().map_or(self.root, |step| step.node))
    }

    fn current_node(&self) -> Option<&'a Node<A, S>> {
        let trie = self.trie?;
        self.current().map(|id| trie.nodes().get(id))
    }

    fn atoms_of(&self, trie: &'a Trie<A, S>, id: NodeId) -> &'a [A] {
        trie.atoms().slice(trie.nodes().get(id).prefix)
    }
}

impl<A: TrieAtom, S: ValueSlot> PartialEq for Cursor<'_, A, S> {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

impl<'a, A: TrieAtom, S: ValueSlot> Iterator for Cursor<'a, A, S> {
    type Item = KeyValueRef<'a, A, S::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value()?;
        let key = self.key()?;
        self.advance_to_value();
        Some(KeyValueRef { key, value })
    }
}

// Iterator
impl<'a, A: TrieAtom, S: ValueSlot> IntoIterator for &'a Trie<A, S> {
    type Item = KeyValueRef<'a, A, S::Value>;
    type IntoIter = Cursor<'a, A, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}
