//! # Assignment (`ops::assign`)
//!
//! Writing a value into the region a key selects happens in two phases:
//!
//! - [`plan_assignment`] normalizes the key, computes the region and value
//!   shapes and classifies the value. It issues no request, so every input
//!   error surfaces here.
//! - [`assign_op`] carries the plan out: coercion of the value
//!   ([`coerce`]), an optional `Reshape` to the region shape, then exactly
//!   one mutating request.

pub mod coerce;
pub mod plan;

pub use coerce::{as_in_context, check_broadcast, coerce};
pub use plan::{plan_assignment, AssignmentPlan, Value, WriteAction};

use log::debug;

use crate::error::NdViewError;
use crate::indexer::IndexerOptions;
use crate::ops::view::IndexKey;
use crate::runtime::{dispatch, Invoker, OpRequest, TensorMeta};

/// Writes `value` into the region of `tensor` selected by `key`.
///
/// The target is mutated in place by the runtime; on error it is left
/// untouched.
pub(crate) fn assign_op<R: Invoker + ?Sized>(
    invoker: &R,
    tensor: &R::Tensor,
    key: &IndexKey,
    value: Value<'_, R::Tensor>,
    options: &IndexerOptions,
) -> Result<(), NdViewError> {
    let plan = plan_assignment(tensor, key, value, options)?;

    match plan.action {
        WriteAction::Noop => {
            debug!("write: whole-tensor self assignment, nothing to do");
        }
        WriteAction::FillAll(scalar) => {
            debug!("write: fill whole tensor with {}", scalar);
            dispatch(invoker, OpRequest::Fill { target: tensor, value: scalar })?;
        }
        WriteAction::FillRegion(scalar) => {
            debug!("write: fill region {:?} with {}", plan.out_shape, scalar);
            dispatch(
                invoker,
                OpRequest::SliceAssignScalar {
                    target: tensor,
                    scalar,
                    axes: &plan.descriptors,
                },
            )?;
        }
        WriteAction::Copy { value, shape } => {
            debug!("write: copy {:?} into region {:?}", value.shape(), plan.out_shape);
            let mut coerced =
                coerce::coerce(invoker, value, &shape, tensor.dtype(), tensor.context())?;
            if shape != plan.out_shape {
                coerced = dispatch(
                    invoker,
                    OpRequest::Reshape {
                        input: &coerced,
                        shape: &plan.out_shape,
                    },
                )?;
            }
            dispatch(
                invoker,
                OpRequest::SliceAssign {
                    target: tensor,
                    value: &coerced,
                    axes: &plan.descriptors,
                },
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "assign_test.rs"]
mod tests;
