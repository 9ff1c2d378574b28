//! The hash-table resource object registered under a resource identity
//!
//! This crate only ever creates empty tables; lookup, import and size kernels
//! operate on the store through the registry. The entry records the table
//! name it was created for so the registry can tell a legitimate reuse from a
//! 32-bit identity collision.

use crate::error::{KernelError, Result};
use crate::types::TensorType;
use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;

/// Key/value storage for the two supported table layouts
#[derive(Debug)]
pub enum HashtableStore {
    /// `Int64` keys mapping to `Str` values
    I64ToStr(FxHashMap<i64, String>),
    /// `Str` keys mapping to `Int64` values
    StrToI64(FxHashMap<String, i64>),
}

impl HashtableStore {
    /// Construct an empty store for the declared key/value types
    ///
    /// Exactly two combinations are supported: (`Int64`, `Str`) and
    /// (`Str`, `Int64`).
    pub fn for_types(key_type: TensorType, value_type: TensorType) -> Result<Self> {
        match (key_type, value_type) {
            (TensorType::Int64, TensorType::Str) => Ok(Self::I64ToStr(FxHashMap::default())),
            (TensorType::Str, TensorType::Int64) => Ok(Self::StrToI64(FxHashMap::default())),
            (key, value) => Err(KernelError::UnsupportedTypePair(key, value)),
        }
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        match self {
            Self::I64ToStr(map) => map.len(),
            Self::StrToI64(map) => map.len(),
        }
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A shared hash-table resource
///
/// Owned by the registry (and through it, the enclosing graph). Kernel
/// instances hold it only transiently via `Arc`, so releasing a kernel never
/// tears down a table other kernels still reference.
#[derive(Debug)]
pub struct HashtableResource {
    /// Table name the entry was created for
    name: String,

    /// Declared key element type
    key_type: TensorType,

    /// Declared value element type
    value_type: TensorType,

    /// The table contents, guarded for concurrent graph invocations
    store: Mutex<HashtableStore>,
}

impl HashtableResource {
    /// Create an empty table resource for the declared types
    pub fn new(name: &str, key_type: TensorType, value_type: TensorType) -> Result<Self> {
        Ok(Self {
            name: name.to_owned(),
            key_type,
            value_type,
            store: Mutex::new(HashtableStore::for_types(key_type, value_type)?),
        })
    }

    /// Table name recorded at creation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared key element type
    pub fn key_type(&self) -> TensorType {
        self.key_type
    }

    /// Declared value element type
    pub fn value_type(&self) -> TensorType {
        self.value_type
    }

    /// Whether this entry matches a creation request
    pub fn matches(&self, name: &str, key_type: TensorType, value_type: TensorType) -> bool {
        self.name == name && self.key_type == key_type && self.value_type == value_type
    }

    /// Lock the table contents for access by paired kernels
    pub fn store(&self) -> MutexGuard<'_, HashtableStore> {
        self.store.lock()
    }
}
