//! Tensor element types shared across the kernel runtime
//!
//! Serialized models refer to element types by integer code; kernels work
//! with the semantic [`TensorType`] enumeration. The codes follow the
//! graph-model schema and must not be renumbered.

use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// Element type of a tensor
///
/// Only the types that hashtable-family kernels can declare are listed here;
/// the wire codes leave room for the rest of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TensorType {
    /// 32-bit floating point
    Float32,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// Variable-length UTF-8 text
    Str,
    /// Boolean
    Bool,
    /// Handle to a shared resource, stored as a 32-bit identity
    Resource,
}

impl TensorType {
    /// Convert a serialized type code into a semantic type tag
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Self::Float32),
            2 => Ok(Self::Int32),
            4 => Ok(Self::Int64),
            5 => Ok(Self::Str),
            6 => Ok(Self::Bool),
            13 => Ok(Self::Resource),
            other => Err(KernelError::UnknownTypeCode(other)),
        }
    }

    /// The serialized type code for this tag
    pub fn code(self) -> i32 {
        match self {
            Self::Float32 => 0,
            Self::Int32 => 2,
            Self::Int64 => 4,
            Self::Str => 5,
            Self::Bool => 6,
            Self::Resource => 13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for ty in [
            TensorType::Float32,
            TensorType::Int32,
            TensorType::Int64,
            TensorType::Str,
            TensorType::Bool,
            TensorType::Resource,
        ] {
            assert_eq!(TensorType::from_code(ty.code()).unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = TensorType::from_code(99).unwrap_err();
        assert!(matches!(err, KernelError::UnknownTypeCode(99)));
    }
}
