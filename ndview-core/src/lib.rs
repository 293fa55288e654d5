//! # ndview-core
//!
//! A tensor view indexing and slice-assignment engine.
//!
//! Keys (an integer, a stepped range, or a list of both) are normalized into
//! per-axis descriptors, turned into a view shape and served by the
//! cheapest primitive of an [`Invoker`]. Assignments are planned fully
//! before any primitive is requested, then carried out with a single
//! in-place write after device, dtype and shape coercion of the value.
//!
//! The engine is runtime-agnostic; [`cpu::CpuRuntime`] is a host-memory
//! reference runtime.

pub mod cpu;
pub mod device;
pub mod error;
pub mod indexer;
pub mod ops;
pub mod runtime;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cpu::{CpuRuntime, CpuTensor};
pub use device::{Context, DeviceKind};
pub use error::NdViewError;
pub use indexer::{read, write, Indexer, IndexerOptions};
pub use ops::assign::{coerce, plan_assignment, AssignmentPlan, Value, WriteAction};
pub use ops::view::{
    normalize, normalize_axis, view_shape, AxisDescriptor, AxisKey, IndexKey, RangeKey, ViewShape,
};
pub use runtime::{Invoker, OpRequest, Primitive, TensorMeta};
pub use types::DType;

// Re-export traits required by public functions
pub use num_traits;
