//! Kernel lifecycle contract
//!
//! A kernel is a single computational node in a Lumigraph graph, driven by
//! the host runtime through a fixed lifecycle:
//!
//! ```text
//! init     once per instantiation   decode config into typed private state
//! prepare  once after graph build   validate config, fix output shapes
//! eval     once per graph run       compute, repeatable any number of times
//! drop     once                     release private state
//! ```
//!
//! State the kernel needs across callbacks lives on the kernel struct itself;
//! there is no opaque user-data pointer to cast. Shared collaborators such as
//! the resource registry are injected through [`KernelContext`] instead of
//! being recovered from the runtime's internals.

pub mod hashtable;

// Re-exports
pub use hashtable::{HashtableKernel, HashtableParams, OP_HASHTABLE};

use crate::error::{KernelError, Result};
use crate::resource::ResourceRegistry;
use crate::tensor::Tensor;
use std::sync::Arc;

/// Per-invocation context handed to every lifecycle callback
///
/// Carries the graph-scoped collaborators a kernel may touch. Cloning is
/// cheap; the registry handle is shared.
#[derive(Debug, Clone)]
pub struct KernelContext {
    registry: Arc<ResourceRegistry>,
}

impl KernelContext {
    /// Create a context over the graph's resource registry
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self { registry }
    }

    /// The resource registry owned by the enclosing graph
    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }
}

/// A node's declared tensors, as wired by the graph loader
#[derive(Debug)]
pub struct Node {
    inputs: Vec<Tensor>,
    outputs: Vec<Tensor>,
}

impl Node {
    /// Create a node with the given input and output tensors
    pub fn new(inputs: Vec<Tensor>, outputs: Vec<Tensor>) -> Self {
        Self { inputs, outputs }
    }

    /// Number of declared inputs
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Number of declared outputs
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Input tensor at `index`
    pub fn input(&self, index: usize) -> Result<&Tensor> {
        self.inputs
            .get(index)
            .ok_or_else(|| KernelError::Validation(format!("No input tensor at index {index}")))
    }

    /// Output tensor at `index`
    pub fn output(&self, index: usize) -> Result<&Tensor> {
        self.outputs
            .get(index)
            .ok_or_else(|| KernelError::Validation(format!("No output tensor at index {index}")))
    }

    /// Mutable output tensor at `index`
    pub fn output_mut(&mut self, index: usize) -> Result<&mut Tensor> {
        self.outputs
            .get_mut(index)
            .ok_or_else(|| KernelError::Validation(format!("No output tensor at index {index}")))
    }
}

/// Lifecycle contract implemented by every kernel
///
/// The runtime drives a single boxed instance through the callbacks in
/// order, so the state `init` builds is exactly the state `prepare` and
/// `eval` observe. Releasing is `Drop`.
pub trait Kernel: Send {
    /// Operation name this kernel implements
    fn op_name(&self) -> &'static str;

    /// Decode the serialized config and store it as private state
    fn init(&mut self, ctx: &KernelContext, raw_config: &[u8]) -> Result<()>;

    /// Validate the configuration and fix the node's output shapes
    ///
    /// Runs exactly once, after every kernel in the graph has been
    /// instantiated. Must not touch shared resources.
    fn prepare(&mut self, ctx: &KernelContext, node: &mut Node) -> Result<()>;

    /// Execute for one graph invocation
    ///
    /// Called once per graph run, any number of times over the kernel's
    /// life. Must be idempotent with respect to shared resources.
    fn eval(&mut self, ctx: &KernelContext, node: &mut Node) -> Result<()>;
}

/// Factory descriptor the runtime registers kernels under
///
/// Separates plan-time registration from runtime instances: the graph loader
/// looks up the descriptor by operation name and calls the factory once per
/// node that references it.
pub struct KernelRegistration {
    /// Operation name in the graph model
    pub op_name: &'static str,

    /// Construct a fresh, uninitialized kernel instance
    pub factory: fn() -> Box<dyn Kernel>,
}

impl KernelRegistration {
    /// Instantiate a kernel for one graph node
    pub fn create(&self) -> Box<dyn Kernel> {
        (self.factory)()
    }
}

/// Registration descriptor for the hashtable kernel
pub fn register_hashtable() -> KernelRegistration {
    KernelRegistration {
        op_name: OP_HASHTABLE,
        factory: || Box::new(HashtableKernel::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TensorType;

    #[test]
    fn test_registration_creates_named_kernel() {
        let registration = register_hashtable();
        assert_eq!(registration.op_name, OP_HASHTABLE);

        let kernel = registration.create();
        assert_eq!(kernel.op_name(), OP_HASHTABLE);
    }

    #[test]
    fn test_node_tensor_access() {
        let mut node = Node::new(vec![], vec![Tensor::new(TensorType::Int32, vec![1], 4)]);

        assert_eq!(node.num_inputs(), 0);
        assert_eq!(node.num_outputs(), 1);
        assert!(node.input(0).is_err());
        assert!(node.output(0).is_ok());
        assert!(node.output_mut(1).is_err());
    }
}
