use log::debug;

use crate::device::Context;
use crate::error::NdViewError;
use crate::runtime::{dispatch, Invoker, OpRequest, TensorMeta};
use crate::types::DType;

/// Checks that `value` can be broadcast to `target`: equal rank, and every
/// axis either equal or of length 1 in `value`.
pub fn check_broadcast(value: &[usize], target: &[usize]) -> Result<(), NdViewError> {
    let compatible = value.len() == target.len()
        && value
            .iter()
            .zip(target)
            .all(|(&v, &t)| v == t || v == 1);
    if compatible {
        Ok(())
    } else {
        Err(NdViewError::ShapeMismatch {
            expected: target.to_vec(),
            actual: value.to_vec(),
            operation: "broadcast".to_string(),
        })
    }
}

/// Returns `tensor` itself when it already lives on `context`, otherwise a
/// copy on `context`.
pub fn as_in_context<R: Invoker + ?Sized>(
    invoker: &R,
    tensor: &R::Tensor,
    context: Context,
) -> Result<R::Tensor, NdViewError> {
    if tensor.context() == context {
        return Ok(tensor.clone());
    }
    dispatch(invoker, OpRequest::CopyTo { input: tensor, context })
}

/// Brings `value` onto `target_context`, into `target_dtype` and up to
/// `target_shape`, in that order.
///
/// Compatibility is checked before any request is made, so a failing
/// coercion costs nothing.
pub fn coerce<R: Invoker + ?Sized>(
    invoker: &R,
    value: &R::Tensor,
    target_shape: &[usize],
    target_dtype: DType,
    target_context: Context,
) -> Result<R::Tensor, NdViewError> {
    let shape = value.shape();
    if shape != target_shape {
        check_broadcast(&shape, target_shape)?;
    }

    let mut coerced = as_in_context(invoker, value, target_context)?;
    if coerced.dtype() != target_dtype {
        debug!("coerce: cast {} -> {}", coerced.dtype(), target_dtype);
        coerced = dispatch(invoker, OpRequest::Cast { input: &coerced, dtype: target_dtype })?;
    }
    if shape != target_shape {
        debug!("coerce: broadcast {:?} -> {:?}", shape, target_shape);
        coerced = dispatch(
            invoker,
            OpRequest::BroadcastTo {
                input: &coerced,
                shape: target_shape,
            },
        )?;
    }
    Ok(coerced)
}
