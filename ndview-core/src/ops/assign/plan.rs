use std::fmt::{self, Debug};

use log::debug;
use num_traits::ToPrimitive;

use crate::error::NdViewError;
use crate::indexer::IndexerOptions;
use crate::ops::view::shape::{check_consistency, region_shape, view_shape};
use crate::ops::view::{is_whole, normalize, AxisDescriptor, IndexKey};
use crate::runtime::TensorMeta;

use super::coerce::check_broadcast;

/// The right-hand side of an assignment.
pub enum Value<'a, T> {
    /// A numeric scalar, written to every selected element.
    Scalar(f64),
    /// A tensor, broadcast over the selection.
    Tensor(&'a T),
    /// Booleans are not numeric values and are rejected by the planner.
    Bool(bool),
}

impl<'a, T> Value<'a, T> {
    /// Converts any numeric scalar; fails with `UnsupportedValueType` when
    /// the value has no `f64` representation.
    pub fn scalar<S: ToPrimitive + Debug>(value: S) -> Result<Self, NdViewError> {
        value.to_f64().map(Value::Scalar).ok_or_else(|| {
            NdViewError::UnsupportedValueType(format!("{:?} is not representable as f64", value))
        })
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Tensor(_) => "tensor",
            Value::Bool(_) => "bool",
        }
    }
}

impl<T> Clone for Value<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Value<'_, T> {}

impl<T: Debug> Debug for Value<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Value::Tensor(t) => f.debug_tuple("Tensor").field(t).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
        }
    }
}

impl<'a, T> From<&'a T> for Value<'a, T> {
    fn from(tensor: &'a T) -> Self {
        Value::Tensor(tensor)
    }
}

impl<T> From<bool> for Value<'_, T> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_numeric {
    ($($t:ty),*) => {
        $(
            impl<T> From<$t> for Value<'_, T> {
                fn from(v: $t) -> Self {
                    Value::Scalar(v as f64)
                }
            }
        )*
    };
}

impl_from_numeric!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// What the write path will request.
#[derive(Debug)]
pub enum WriteAction<'a, T> {
    /// Self-assignment over the whole tensor; nothing to do.
    Noop,
    /// Fill the entire tensor with a scalar.
    FillAll(f64),
    /// Fill the selected region with a scalar.
    FillRegion(f64),
    /// Coerce `value` to `shape`, then copy it into the region.
    Copy { value: &'a T, shape: Vec<usize> },
}

/// A fully validated assignment.
#[derive(Debug)]
pub struct AssignmentPlan<'a, T> {
    pub descriptors: Vec<AxisDescriptor>,
    /// Shape of the written region, scalar-indexed axes kept as length 1.
    pub out_shape: Vec<usize>,
    /// Shape of the region with scalar-indexed axes squeezed away (`[1]` if
    /// none remain); tensor values are broadcast against it.
    pub value_shape: Vec<usize>,
    /// The selection covers the whole tensor in natural order.
    pub whole: bool,
    pub action: WriteAction<'a, T>,
}

/// Validates `key` and `value` against `tensor` and decides how to write.
///
/// Nothing is requested from the runtime here; every error an assignment
/// can raise from its inputs is raised by this function.
pub fn plan_assignment<'a, T: TensorMeta>(
    tensor: &T,
    key: &IndexKey,
    value: Value<'a, T>,
    options: &IndexerOptions,
) -> Result<AssignmentPlan<'a, T>, NdViewError> {
    let shape = tensor.shape();
    let descriptors = normalize(key, &shape)?;
    let view = view_shape(&descriptors, &shape);
    let out_shape = region_shape(&descriptors, &shape);
    if options.verify_view_size {
        check_consistency(&view, &out_shape)?;
    }
    let value_shape = view.dims;
    let whole = is_whole(&descriptors, &shape);

    let action = match value {
        Value::Scalar(v) if whole && options.fast_paths => WriteAction::FillAll(v),
        Value::Scalar(v) => WriteAction::FillRegion(v),
        Value::Tensor(src)
            if whole && src.same_storage(tensor) && src.context() == tensor.context() =>
        {
            WriteAction::Noop
        }
        Value::Tensor(src) => {
            let src_shape = src.shape();
            // A value already in region form is accepted as is; otherwise it
            // is broadcast against the squeezed shape.
            let target = if src_shape == out_shape {
                out_shape.clone()
            } else {
                check_broadcast(&src_shape, &value_shape)?;
                value_shape.clone()
            };
            WriteAction::Copy { value: src, shape: target }
        }
        other => return Err(NdViewError::UnsupportedValueType(other.type_name().to_string())),
    };

    debug!(
        "plan_assignment: key {:?} on shape {:?} -> out {:?}, value {:?}, whole={}",
        key, shape, out_shape, value_shape, whole
    );
    Ok(AssignmentPlan {
        descriptors,
        out_shape,
        value_shape,
        whole,
        action,
    })
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
