//! Shared resources and the graph-scoped resource registry
//!
//! Kernels that cooperate on a named hash table never exchange references
//! directly; they exchange a 32-bit identity derived from the table name and
//! resolve it through the [`ResourceRegistry`] owned by the enclosing graph.

pub mod hashtable;
pub mod registry;

// Re-exports for convenience
pub use hashtable::{HashtableResource, HashtableStore};
pub use registry::ResourceRegistry;

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Derive the 32-bit resource identity for a table name
///
/// Pure and deterministic: the same name yields the same identity in every
/// process, so handles serialized by tooling stay meaningful. Distinct names
/// are expected but not guaranteed to yield distinct identities; the registry
/// detects collisions by recording the name alongside each entry.
pub fn resource_identity(name: &str) -> i32 {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    // Keep the low 32 bits of the digest.
    hasher.finish() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_deterministic() {
        let first = resource_identity("embedding_table");
        for _ in 0..10 {
            assert_eq!(resource_identity("embedding_table"), first);
        }
    }

    #[test]
    fn test_distinct_names_usually_distinct() {
        // Not a guaranteed property of a 32-bit hash, but these must not
        // collide for the handle scheme to be usable at all.
        assert_ne!(resource_identity("t1"), resource_identity("t2"));
        assert_ne!(resource_identity("vocab"), resource_identity("inverse_vocab"));
    }

    #[test]
    fn test_empty_name_still_hashes() {
        // Prepare rejects empty names; the hash itself is total.
        let _ = resource_identity("");
    }
}
