//! Hashtable handle kernel
//!
//! Publishes a 32-bit resource identity for a named hash table and creates
//! the table in the graph's resource registry on first eval. Downstream
//! lookup/import kernels consume the identity from this kernel's single
//! output tensor; the table itself is shared by every kernel (in any graph
//! over the same registry) that declares the same name.
//!
//! The kernel declares zero inputs and one output. Its serialized config is
//! a self-describing map with three required entries:
//!
//! - `"shared_name"`: table name (non-empty string)
//! - `"key_dtype"`: key element type code
//! - `"value_dtype"`: value element type code
//!
//! Exactly two key/value declarations are supported: (`Int64`, `Str`) and
//! (`Str`, `Int64`).

use crate::error::{KernelError, Result};
use crate::kernel::{Kernel, KernelContext, Node};
use crate::resource::resource_identity;
use crate::types::TensorType;
use serde_json::Value;
use tracing::debug;

/// Operation name in the graph model
pub const OP_HASHTABLE: &str = "Hashtable";

/// Output slot carrying the resource handle
const RESOURCE_HANDLE_OUTPUT: usize = 0;

const SHARED_NAME_ATTR: &str = "shared_name";
const KEY_DTYPE_ATTR: &str = "key_dtype";
const VALUE_DTYPE_ATTR: &str = "value_dtype";

/// Decoded kernel configuration
///
/// Built once at init time and owned by the kernel instance until release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtableParams {
    /// Shared table name
    pub table_name: String,

    /// Declared key element type
    pub key_type: TensorType,

    /// Declared value element type
    pub value_type: TensorType,
}

impl HashtableParams {
    /// Decode the serialized config map
    ///
    /// A missing or empty buffer is a decode error, not a panic: a malformed
    /// model file must fail the load, not abort the process.
    pub fn decode(raw_config: &[u8]) -> Result<Self> {
        if raw_config.is_empty() {
            return Err(KernelError::MissingAttribute(
                "hashtable kernel config buffer".to_owned(),
            ));
        }

        let attrs: serde_json::Map<String, Value> = serde_json::from_slice(raw_config)?;

        let table_name = require_attr(&attrs, SHARED_NAME_ATTR)?
            .as_str()
            .ok_or_else(|| {
                KernelError::InvalidAttribute(format!("'{SHARED_NAME_ATTR}' must be a string"))
            })?
            .to_owned();

        let key_type = TensorType::from_code(attr_type_code(&attrs, KEY_DTYPE_ATTR)?)?;
        let value_type = TensorType::from_code(attr_type_code(&attrs, VALUE_DTYPE_ATTR)?)?;

        Ok(Self {
            table_name,
            key_type,
            value_type,
        })
    }

    /// Whether the declared key/value pair is one of the supported layouts
    pub fn has_supported_types(&self) -> bool {
        matches!(
            (self.key_type, self.value_type),
            (TensorType::Int64, TensorType::Str) | (TensorType::Str, TensorType::Int64)
        )
    }
}

fn require_attr<'a>(attrs: &'a serde_json::Map<String, Value>, key: &str) -> Result<&'a Value> {
    attrs
        .get(key)
        .ok_or_else(|| KernelError::MissingAttribute(key.to_owned()))
}

fn attr_type_code(attrs: &serde_json::Map<String, Value>, key: &str) -> Result<i32> {
    let value = require_attr(attrs, key)?;
    value
        .as_i64()
        .and_then(|code| i32::try_from(code).ok())
        .ok_or_else(|| {
            KernelError::InvalidAttribute(format!("'{key}' must be a tensor type code, got {value}"))
        })
}

/// Kernel publishing the handle to a named hash-table resource
#[derive(Debug, Default)]
pub struct HashtableKernel {
    params: Option<HashtableParams>,
}

impl HashtableKernel {
    /// Create an uninitialized kernel
    pub fn new() -> Self {
        Self::default()
    }

    fn params(&self) -> Result<&HashtableParams> {
        self.params
            .as_ref()
            .ok_or_else(|| KernelError::Validation("Hashtable kernel was never initialized".to_owned()))
    }
}

impl Kernel for HashtableKernel {
    fn op_name(&self) -> &'static str {
        OP_HASHTABLE
    }

    fn init(&mut self, _ctx: &KernelContext, raw_config: &[u8]) -> Result<()> {
        let params = HashtableParams::decode(raw_config)?;
        debug!(
            table = %params.table_name,
            key_type = ?params.key_type,
            value_type = ?params.value_type,
            "configured hashtable kernel"
        );
        self.params = Some(params);
        Ok(())
    }

    fn prepare(&mut self, _ctx: &KernelContext, node: &mut Node) -> Result<()> {
        if node.num_inputs() != 0 {
            return Err(KernelError::Validation(format!(
                "Hashtable kernel declares no inputs, node has {}",
                node.num_inputs()
            )));
        }
        if node.num_outputs() != 1 {
            return Err(KernelError::Validation(format!(
                "Hashtable kernel declares exactly one output, node has {}",
                node.num_outputs()
            )));
        }

        let params = self.params()?;
        if params.table_name.is_empty() {
            return Err(KernelError::Validation(
                "Hashtable kernel requires a non-empty table name".to_owned(),
            ));
        }
        if !params.has_supported_types() {
            return Err(KernelError::UnsupportedTypePair(
                params.key_type,
                params.value_type,
            ));
        }

        let handle_dtype = node.output(RESOURCE_HANDLE_OUTPUT)?.dtype();
        if handle_dtype != TensorType::Resource && handle_dtype != TensorType::Int32 {
            return Err(KernelError::Validation(format!(
                "Resource handle output must be Resource or Int32, got {handle_dtype:?}"
            )));
        }

        // All checks passed; only now touch the output tensor. The handle is
        // one i32, whatever shape the loader gave the tensor before.
        let output = node.output_mut(RESOURCE_HANDLE_OUTPUT)?;
        output.resize_bytes(std::mem::size_of::<i32>());
        output.set_dims(vec![1]);
        Ok(())
    }

    fn eval(&mut self, ctx: &KernelContext, node: &mut Node) -> Result<()> {
        let params = self.params()?;
        let identity = resource_identity(&params.table_name);

        node.output_mut(RESOURCE_HANDLE_OUTPUT)?.write_i32(identity)?;

        ctx.registry().create_if_absent(
            identity,
            &params.table_name,
            params.key_type,
            params.value_type,
        )?;
        Ok(())
    }
}
