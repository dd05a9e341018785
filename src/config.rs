//! Trie configuration parameters.

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Configuration for a [`crate::trie::Trie`].
///
/// Controls how key fragments are packed into the atom arena. This is a
/// layout knob only: lookups, inserts and iteration behave identically
/// whatever the setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct TrieConfig {
    /// Capacity, in atoms, of each shared arena chunk.
    ///
    /// `0` stores every fragment in a chunk of its own. Positive values
    /// pack fragments into shared chunks of this size, preferring the
    /// parent node's chunk so that a key's fragments sit close together.
    /// Fragments longer than this still get a dedicated chunk.
    pub min_chunk_size: usize,
}

impl TrieConfig {
    /// Default chunk size: one fragment per chunk.
    pub const DEFAULT_MIN_CHUNK_SIZE: usize = 0;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            min_chunk_size: Self::DEFAULT_MIN_CHUNK_SIZE,
        }
    }

    /// Set the shared chunk size.
    pub fn with_min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.min_chunk_size = min_chunk_size;
        self
    }

    /// Does this config pack fragments into shared chunks?
    pub fn is_packed(&self) -> bool {
        self.min_chunk_size > 0
    }
}
