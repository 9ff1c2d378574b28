//! # Lumigraph Kernels
//!
//! Resource kernels for the Lumigraph tensor-graph runtime.
//!
//! ## Overview
//!
//! This crate implements the hashtable handle kernel: given a table name and
//! declared key/value element types from a serialized graph model, it
//! deterministically derives a 32-bit resource identity, creates the shared
//! hash-table resource in the graph's registry on first execution, and
//! publishes the identity through its single output tensor so downstream
//! kernels can find the table.
//!
//! ## Architecture
//!
//! - **Kernel lifecycle**: init → prepare → eval* → drop, driven by the host
//!   runtime ([`kernel`])
//! - **Resource identity**: deterministic name → i32 hash ([`resource`])
//! - **Resource registry**: graph-scoped, mutex-guarded map with atomic
//!   create-if-absent semantics ([`resource::ResourceRegistry`])
//!
//! ## Example
//!
//! ```
//! use lumigraph_kernels::{
//!     register_hashtable, Kernel, KernelContext, Node, ResourceRegistry, Tensor, TensorType,
//! };
//! use std::sync::Arc;
//!
//! # fn main() -> lumigraph_kernels::Result<()> {
//! let registry = Arc::new(ResourceRegistry::new());
//! let ctx = KernelContext::new(Arc::clone(&registry));
//!
//! let config = serde_json::json!({
//!     "shared_name": "vocab",
//!     "key_dtype": TensorType::Int64.code(),
//!     "value_dtype": TensorType::Str.code(),
//! });
//!
//! let mut kernel = register_hashtable().create();
//! let mut node = Node::new(vec![], vec![Tensor::new(TensorType::Resource, vec![], 0)]);
//!
//! kernel.init(&ctx, &serde_json::to_vec(&config)?)?;
//! kernel.prepare(&ctx, &mut node)?;
//! kernel.eval(&ctx, &mut node)?;
//!
//! let handle = node.output(0)?.as_i32()?;
//! assert!(registry.get(handle).is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod kernel;
pub mod resource;
pub mod tensor;
pub mod types;

// Re-exports for the host runtime
pub use error::{KernelError, Result};
pub use kernel::{
    register_hashtable, HashtableKernel, HashtableParams, Kernel, KernelContext,
    KernelRegistration, Node, OP_HASHTABLE,
};
pub use resource::{resource_identity, HashtableResource, HashtableStore, ResourceRegistry};
pub use tensor::Tensor;
pub use types::TensorType;
