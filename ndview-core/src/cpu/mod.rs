//! # Reference CPU runtime
//!
//! A small host-memory runtime serving every primitive the engine can
//! request. Device contexts are labels here: data always lives in host
//! memory, but requests mixing contexts are rejected exactly as a real
//! multi-device runtime would, so cross-context writes must go through an
//! explicit `CopyTo`.
//!
//! Reads return fresh contiguous tensors; only the assignment primitives
//! mutate their target.

pub mod buffer;
mod kernels;
mod tensor;

pub use buffer::Buffer;
pub use tensor::{CpuTensor, TensorData};

use log::trace;

use crate::error::NdViewError;
use crate::runtime::{Invoker, OpRequest, TensorMeta};

/// The reference runtime. Stateless; every request is served synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRuntime;

impl CpuRuntime {
    pub fn new() -> Self {
        CpuRuntime
    }
}

impl Invoker for CpuRuntime {
    type Tensor = CpuTensor;

    fn invoke(&self, request: OpRequest<'_, CpuTensor>) -> Result<CpuTensor, NdViewError> {
        trace!("cpu runtime: {}", request.primitive().name());
        match request {
            OpRequest::IndexAt { input, index } => kernels::index_at(input, index),
            OpRequest::SliceAxis { input, begin, end } => kernels::slice_axis(input, begin, end),
            OpRequest::StridedSlice { input, axes } => kernels::strided_slice(input, axes),
            OpRequest::Reshape { input, shape } => kernels::reshape(input, shape),
            OpRequest::SliceAssign { target, value, axes } => {
                if value.dtype() != target.dtype() {
                    return Err(NdViewError::DataTypeMismatch {
                        expected: target.dtype(),
                        actual: value.dtype(),
                        operation: "_slice_assign".to_string(),
                    });
                }
                kernels::slice_assign(target, value, axes)
            }
            OpRequest::SliceAssignScalar { target, scalar, axes } => {
                kernels::slice_assign_scalar(target, scalar, axes)
            }
            OpRequest::Fill { target, value } => kernels::fill(target, value),
            OpRequest::BroadcastTo { input, shape } => kernels::broadcast_to(input, shape),
            OpRequest::Cast { input, dtype } => kernels::cast(input, dtype),
            OpRequest::CopyTo { input, context } => kernels::copy_to(input, context),
        }
    }
}

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
