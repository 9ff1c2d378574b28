//! Error types for kernel lifecycle and resource management

use crate::types::TensorType;
use thiserror::Error;

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;

/// Errors that can occur across a kernel's lifecycle
///
/// The host runtime treats any error from `prepare` or `eval` as a failed
/// graph run; the variants exist so callers can tell a bad model file apart
/// from a resource conflict discovered at execution time.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("Failed to decode kernel config: {0}")]
    ConfigDecode(#[from] serde_json::Error),

    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid attribute value: {0}")]
    InvalidAttribute(String),

    #[error("Unknown tensor type code: {0}")]
    UnknownTypeCode(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unsupported key/value type pair: ({0:?}, {1:?})")]
    UnsupportedTypePair(TensorType, TensorType),

    #[error("Tensor error: {0}")]
    Tensor(String),

    #[error("Resource conflict for identity {identity}: {reason}")]
    ResourceConflict { identity: i32, reason: String },
}
