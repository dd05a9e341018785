//! Append-only storage for key fragments.
//!
//! Every node's share of a key lives in a chunk of the [`AtomArena`]. A
//! chunk is allocated with room for `min_chunk_size` atoms and is only ever
//! appended to, so a [`Prefix`] written into it stays valid for the
//! lifetime of the trie.

use tracing::trace;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::atom::TrieAtom;

/// A node's prefix: `(chunk, begin, end)` into the arena.
///
/// The default value is the empty prefix, which references no chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct Prefix {
    chunk: usize,
    begin: usize,
    end: usize,
}

impl Prefix {
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The chunk new fragments below this prefix should try first.
    pub(crate) fn chunk(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.chunk)
    }

    /// Split into `[begin, begin + at)` and `[begin + at, end)`.
    pub(crate) fn split_at(self, at: usize) -> (Prefix, Prefix) {
        debug_assert!(at <= self.len());
        let mid = self.begin + at;
        (
            Prefix {
                chunk: self.chunk,
                begin: self.begin,
                end: mid,
            },
            Prefix {
                chunk: self.chunk,
                begin: mid,
                end: self.end,
            },
        )
    }
}

/// Chunked, append-only atom storage.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub(crate) struct AtomArena<A> {
    chunks: Vec<Vec<A>>,
    min_chunk_size: usize,
}

impl<A: TrieAtom> AtomArena<A> {
    pub(crate) fn new(min_chunk_size: usize) -> Self {
        Self {
            chunks: vec![],
            min_chunk_size,
        }
    }

    /// The atoms a prefix refers to.
    #[inline(always)]
    pub(crate) fn slice(&self, prefix: Prefix) -> &[A] {
        if prefix.is_empty() {
            return &[];
        }
        &self.chunks[prefix.chunk][prefix.begin..prefix.end]
    }

    /// Append a fragment and return its prefix.
    ///
    /// Placement order: the `hint` chunk (usually the parent node's), then
    /// the most recent chunk, then a fresh one. Shared placement is only
    /// attempted when `min_chunk_size` is positive.
    pub(crate) fn push(&mut self, fragment: &[A], hint: Option<usize>) -> Prefix {
        if fragment.is_empty() {
            return Prefix::default();
        }
        let len = fragment.len();
        let target = match hint.filter(|&chunk| self.fits(chunk, len)) {
            Some(chunk) => chunk,
            None => match self
                .chunks
                .len()
                .checked_sub(1)
                .filter(|&chunk| self.fits(chunk, len))
            {
                Some(chunk) => chunk,
                None => self.new_chunk(len),
            },
        };
        let chunk = &mut self.chunks[target];
        let begin = chunk.len();
        chunk.extend_from_slice(fragment);
        Prefix {
            chunk: target,
            begin,
            end: chunk.len(),
        }
    }

    pub(crate) fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub(crate) fn clear(&mut self) {
        self.chunks.clear();
    }

    fn fits(&self, chunk: usize, len: usize) -> bool {
        self.min_chunk_size > 0 && self.chunks[chunk].len() + len <= self.min_chunk_size
    }

    fn new_chunk(&mut self, len: usize) -> usize {
        let capacity = self.min_chunk_size.max(len);
        trace!(chunk = self.chunks.len(), capacity, "allocating atom chunk");
        self.chunks.push(Vec::with_capacity(capacity));
        self.chunks.len() - 1
    }
}
