//! Host-owned tensor storage
//!
//! A deliberately small tensor abstraction: an element type, a shape, and a
//! flat byte buffer. Kernels in this crate only ever publish a single 32-bit
//! handle through it, so there is no columnar data path; the host runtime
//! owns allocation and hands kernels mutable references during prepare/eval.

use crate::error::{KernelError, Result};
use crate::types::TensorType;

/// A tensor owned by the host runtime
///
/// Prepare-time callbacks may resize the backing storage and replace the
/// shape; eval-time callbacks only write element data.
#[derive(Debug, Clone)]
pub struct Tensor {
    /// Element type
    dtype: TensorType,

    /// Tensor shape (dimensions)
    dims: Vec<i64>,

    /// Flat backing storage
    data: Vec<u8>,
}

impl Tensor {
    /// Create a tensor with the given element type and shape, zero-filled
    /// with `byte_len` bytes of storage
    pub fn new(dtype: TensorType, dims: Vec<i64>, byte_len: usize) -> Self {
        Self {
            dtype,
            dims,
            data: vec![0; byte_len],
        }
    }

    /// Element type
    pub fn dtype(&self) -> TensorType {
        self.dtype
    }

    /// Tensor shape
    pub fn dims(&self) -> &[i64] {
        &self.dims
    }

    /// Size of the backing storage in bytes
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Resize the backing storage to exactly `byte_len` bytes
    ///
    /// Newly added bytes are zeroed. Shrinking discards trailing bytes.
    pub fn resize_bytes(&mut self, byte_len: usize) {
        self.data.resize(byte_len, 0);
    }

    /// Replace the shape, discarding any prior dimensions
    pub fn set_dims(&mut self, dims: Vec<i64>) {
        self.dims = dims;
    }

    /// Write a single `i32` element into the tensor's storage
    ///
    /// The storage must hold exactly one 32-bit element.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        if self.data.len() != std::mem::size_of::<i32>() {
            return Err(KernelError::Tensor(format!(
                "Expected 4 bytes of storage for an i32 element, have {}",
                self.data.len()
            )));
        }
        self.data.copy_from_slice(&value.to_ne_bytes());
        Ok(())
    }

    /// Read the tensor's storage as a single `i32` element
    pub fn as_i32(&self) -> Result<i32> {
        let bytes: [u8; 4] = self.data.as_slice().try_into().map_err(|_| {
            KernelError::Tensor(format!(
                "Expected 4 bytes of storage for an i32 element, have {}",
                self.data.len()
            ))
        })?;
        Ok(i32::from_ne_bytes(bytes))
    }
}
