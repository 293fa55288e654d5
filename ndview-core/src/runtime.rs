//! # Runtime seam
//!
//! The indexing engine never touches tensor buffers. It reads metadata
//! through [`TensorMeta`] and asks an [`Invoker`] to run named primitives.
//! A runtime owns the tensors and decides how each primitive is computed.

use log::trace;

use crate::device::Context;
use crate::error::NdViewError;
use crate::ops::view::AxisDescriptor;
use crate::types::DType;

/// Metadata every tensor handle must expose to the engine.
///
/// Handles are expected to be cheap to clone (reference counted); cloning
/// must not copy the underlying buffer.
pub trait TensorMeta: Clone {
    fn shape(&self) -> Vec<usize>;
    fn dtype(&self) -> DType;
    fn context(&self) -> Context;
    /// Whether both handles refer to the same underlying buffer.
    fn same_storage(&self, other: &Self) -> bool;

    fn ndim(&self) -> usize {
        self.shape().len()
    }

    fn numel(&self) -> usize {
        self.shape().iter().product()
    }
}

/// The primitives the engine may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    IndexAt,
    SliceAxis,
    StridedSlice,
    Reshape,
    SliceAssign,
    SliceAssignScalar,
    Fill,
    BroadcastTo,
    Cast,
    CopyTo,
}

impl Primitive {
    /// Canonical operator name.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::IndexAt => "_at",
            Primitive::SliceAxis => "_slice",
            Primitive::StridedSlice => "slice",
            Primitive::Reshape => "reshape",
            Primitive::SliceAssign => "_slice_assign",
            Primitive::SliceAssignScalar => "_slice_assign_scalar",
            Primitive::Fill => "_full",
            Primitive::BroadcastTo => "broadcast_to",
            Primitive::Cast => "cast",
            Primitive::CopyTo => "_copyto",
        }
    }

    /// Primitives that write into their target in place.
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            Primitive::SliceAssign | Primitive::SliceAssignScalar | Primitive::Fill
        )
    }
}

/// One primitive request with fully normalized arguments.
///
/// Read-style requests return a new tensor. Mutating requests write into
/// `target` and return the target handle.
#[derive(Debug)]
pub enum OpRequest<'a, T> {
    /// Select index `index` along axis 0, dropping that axis.
    IndexAt { input: &'a T, index: usize },
    /// Contiguous `begin..end` slice along axis 0.
    SliceAxis { input: &'a T, begin: usize, end: usize },
    /// Strided slice over the leading `axes.len()` axes.
    StridedSlice { input: &'a T, axes: &'a [AxisDescriptor] },
    Reshape { input: &'a T, shape: &'a [usize] },
    /// `value` must already have the unsqueezed region shape.
    SliceAssign {
        target: &'a T,
        value: &'a T,
        axes: &'a [AxisDescriptor],
    },
    SliceAssignScalar {
        target: &'a T,
        scalar: f64,
        axes: &'a [AxisDescriptor],
    },
    /// Fill the whole target with `value`.
    Fill { target: &'a T, value: f64 },
    BroadcastTo { input: &'a T, shape: &'a [usize] },
    Cast { input: &'a T, dtype: DType },
    /// Copy `input` into a new tensor on `context`.
    CopyTo { input: &'a T, context: Context },
}

impl<T> OpRequest<'_, T> {
    pub fn primitive(&self) -> Primitive {
        match self {
            OpRequest::IndexAt { .. } => Primitive::IndexAt,
            OpRequest::SliceAxis { .. } => Primitive::SliceAxis,
            OpRequest::StridedSlice { .. } => Primitive::StridedSlice,
            OpRequest::Reshape { .. } => Primitive::Reshape,
            OpRequest::SliceAssign { .. } => Primitive::SliceAssign,
            OpRequest::SliceAssignScalar { .. } => Primitive::SliceAssignScalar,
            OpRequest::Fill { .. } => Primitive::Fill,
            OpRequest::BroadcastTo { .. } => Primitive::BroadcastTo,
            OpRequest::Cast { .. } => Primitive::Cast,
            OpRequest::CopyTo { .. } => Primitive::CopyTo,
        }
    }
}

/// The operator-invocation interface.
pub trait Invoker {
    type Tensor: TensorMeta;

    fn invoke(&self, request: OpRequest<'_, Self::Tensor>) -> Result<Self::Tensor, NdViewError>;
}

/// Sends one request to `invoker`, tracing the primitive name.
pub(crate) fn dispatch<R: Invoker + ?Sized>(
    invoker: &R,
    request: OpRequest<'_, R::Tensor>,
) -> Result<R::Tensor, NdViewError> {
    let primitive = request.primitive();
    if primitive.is_mutating() {
        trace!("invoking primitive '{}' in place", primitive.name());
    } else {
        trace!("invoking primitive '{}'", primitive.name());
    }
    invoker.invoke(request)
}

impl<R: Invoker + ?Sized> Invoker for &R {
    type Tensor = R::Tensor;

    fn invoke(&self, request: OpRequest<'_, Self::Tensor>) -> Result<Self::Tensor, NdViewError> {
        (**self).invoke(request)
    }
}
