//! Graph-scoped resource registry with idempotent creation
//!
//! The registry maps 32-bit resource identities to shared hash-table
//! resources. It is owned by the graph (or a set of related graphs), not by
//! any kernel instance, so entries outlive the kernels that created them.
//!
//! `create_if_absent` is the only mutating operation kernels in this crate
//! use. Its probe-and-insert runs under a single mutex acquisition, so two
//! evals racing on the same identity from different threads create exactly
//! one entry and neither observes a partially constructed resource.

use crate::error::{KernelError, Result};
use crate::resource::hashtable::HashtableResource;
use crate::types::TensorType;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::{debug, trace};

/// Shared mapping from resource identity to hash-table resource
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    entries: Mutex<FxHashMap<i32, Arc<HashtableResource>>>,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the table for `identity` if no entry exists, otherwise verify
    /// the existing entry and leave it untouched
    ///
    /// Idempotent: calling any number of times with the same arguments has no
    /// observable effect after the first successful call. An existing entry
    /// whose recorded name or declared types differ from the request is a
    /// [`KernelError::ResourceConflict`]; that covers both a name re-declared
    /// with different types and two distinct names colliding on one identity.
    pub fn create_if_absent(
        &self,
        identity: i32,
        name: &str,
        key_type: TensorType,
        value_type: TensorType,
    ) -> Result<Arc<HashtableResource>> {
        let mut entries = self.entries.lock();
        match entries.entry(identity) {
            Entry::Occupied(existing) => {
                let resource = existing.get();
                if !resource.matches(name, key_type, value_type) {
                    return Err(KernelError::ResourceConflict {
                        identity,
                        reason: format!(
                            "entry created for table '{}' as ({:?}, {:?}), requested for table '{}' as ({:?}, {:?})",
                            resource.name(),
                            resource.key_type(),
                            resource.value_type(),
                            name,
                            key_type,
                            value_type
                        ),
                    });
                }
                trace!(identity, table = name, "hashtable resource already registered");
                Ok(Arc::clone(resource))
            }
            Entry::Vacant(slot) => {
                let resource = Arc::new(HashtableResource::new(name, key_type, value_type)?);
                debug!(
                    identity,
                    table = name,
                    ?key_type,
                    ?value_type,
                    "registered hashtable resource"
                );
                slot.insert(Arc::clone(&resource));
                Ok(resource)
            }
        }
    }

    /// Look up the resource registered under `identity`
    pub fn get(&self, identity: i32) -> Option<Arc<HashtableResource>> {
        self.entries.lock().get(&identity).cloned()
    }

    /// Whether an entry exists for `identity`
    pub fn contains(&self, identity: i32) -> bool {
        self.entries.lock().contains_key(&identity)
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_reuse() {
        let registry = ResourceRegistry::new();

        let first = registry
            .create_if_absent(42, "vocab", TensorType::Int64, TensorType::Str)
            .unwrap();
        let second = registry
            .create_if_absent(42, "vocab", TensorType::Int64, TensorType::Str)
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_conflict_on_different_types() {
        let registry = ResourceRegistry::new();
        registry
            .create_if_absent(42, "vocab", TensorType::Int64, TensorType::Str)
            .unwrap();

        let err = registry
            .create_if_absent(42, "vocab", TensorType::Str, TensorType::Int64)
            .unwrap_err();
        assert!(matches!(err, KernelError::ResourceConflict { identity: 42, .. }));

        // The original entry is untouched.
        assert_eq!(registry.get(42).unwrap().key_type(), TensorType::Int64);
    }

    #[test]
    fn test_conflict_on_identity_collision() {
        // Two different names forced onto one identity must not alias.
        let registry = ResourceRegistry::new();
        registry
            .create_if_absent(7, "first", TensorType::Int64, TensorType::Str)
            .unwrap();

        let err = registry
            .create_if_absent(7, "second", TensorType::Int64, TensorType::Str)
            .unwrap_err();
        assert!(matches!(err, KernelError::ResourceConflict { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_create_yields_one_entry() {
        let registry = Arc::new(ResourceRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry
                        .create_if_absent(1, "shared", TensorType::Str, TensorType::Int64)
                        .unwrap()
                })
            })
            .collect();

        let resources: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(registry.len(), 1);
        for resource in &resources[1..] {
            assert!(Arc::ptr_eq(&resources[0], resource));
        }
    }
}
