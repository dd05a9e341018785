//! Error types for patricia.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, TrieError>;

/// Errors reported by trie lookups.
///
/// Only lookups which promise a value fail; everything else reports
/// absence through `Option` or an end cursor.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum TrieError {
    /// The key is not stored in the trie.
    #[error("key not found: {key}")]
    NotFound {
        /// Debug rendering of the missing key.
        key: String,
    },
}

impl TrieError {
    /// Create a not found error for the given key atoms.
    pub fn not_found<A: std::fmt::Debug>(key: &[A]) -> Self {
        TrieError::NotFound {
            key: format!("{key:?}"),
        }
    }
}
