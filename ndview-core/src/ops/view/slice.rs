// ndview-core/src/ops/view/slice.rs

use log::debug;

use crate::error::NdViewError;
use crate::indexer::IndexerOptions;
use crate::runtime::{dispatch, Invoker, OpRequest, TensorMeta};

use super::key::IndexKey;
use super::normalize::normalize;
use super::shape::{check_consistency, region_shape, view_shape};

/// Produces the view of `tensor` selected by `key`.
///
/// This is a crate-internal function, typically called via
/// [`Indexer::read`](crate::indexer::Indexer::read). It picks the cheapest
/// primitive able to produce the view, in priority order:
///
/// 1. identity key (`..`): the handle itself, no request issued;
/// 2. scalar key: `IndexAt` on axis 0;
/// 3. unit-step range: `SliceAxis` on axis 0;
/// 4. anything else: `StridedSlice` over all indexed axes, followed by a
///    `Reshape` to the squeezed view shape when scalar entries dropped axes.
///
/// With `options.fast_paths` disabled every key takes path 4.
///
/// # Example
///
/// ```rust,ignore
/// // t has shape [4, 5]
/// let row = slice_op(&runtime, &t, &IndexKey::Scalar(-1), &options)?; // shape [5]
/// let cols = slice_op(&runtime, &t, &idx![.., 1..4], &options)?;     // shape [4, 3]
/// let corner = slice_op(&runtime, &t, &idx![0, 0], &options)?;        // shape [1]
/// ```
pub(crate) fn slice_op<R: Invoker + ?Sized>(
    invoker: &R,
    tensor: &R::Tensor,
    key: &IndexKey,
    options: &IndexerOptions,
) -> Result<R::Tensor, NdViewError> {
    let shape = tensor.shape();

    if options.fast_paths {
        match key {
            IndexKey::Range(range) if range.is_identity() => {
                debug!("read: identity key on shape {:?}, returning the tensor itself", shape);
                return Ok(tensor.clone());
            }
            IndexKey::Scalar(_) => {
                let axis = normalize(key, &shape)?[0];
                debug!("read: index {} of axis 0 on shape {:?}", axis.start, shape);
                return dispatch(invoker, OpRequest::IndexAt { input: tensor, index: axis.start });
            }
            IndexKey::Range(range) if range.effective_step() == 1 => {
                let axis = normalize(key, &shape)?[0];
                let (begin, end) = (axis.start, axis.start + axis.len());
                debug!("read: contiguous slice {}..{} of axis 0 on shape {:?}", begin, end, shape);
                return dispatch(invoker, OpRequest::SliceAxis { input: tensor, begin, end });
            }
            _ => {}
        }
    }

    let descriptors = normalize(key, &shape)?;
    let view = view_shape(&descriptors, &shape);
    if options.verify_view_size {
        check_consistency(&view, &region_shape(&descriptors, &shape))?;
    }
    debug!(
        "read: strided slice of {} axes on shape {:?} -> view {:?}",
        descriptors.len(),
        shape,
        view.dims
    );

    let sliced = dispatch(invoker, OpRequest::StridedSlice { input: tensor, axes: &descriptors })?;
    if !view.is_squeezed(shape.len()) {
        return Ok(sliced);
    }
    dispatch(invoker, OpRequest::Reshape { input: &sliced, shape: &view.dims })
}

/// Iterator over the axis-0 sub-views of a tensor.
///
/// Each item is produced by reading the tensor at the next scalar index.
pub struct Rows<'a, R: Invoker + ?Sized> {
    invoker: &'a R,
    tensor: &'a R::Tensor,
    options: IndexerOptions,
    next: usize,
    len: usize,
}

impl<'a, R: Invoker + ?Sized> Rows<'a, R> {
    pub(crate) fn new(invoker: &'a R, tensor: &'a R::Tensor, options: IndexerOptions) -> Self {
        let len = tensor.shape().first().copied().unwrap_or(0);
        Rows {
            invoker,
            tensor,
            options,
            next: 0,
            len,
        }
    }
}

impl<R: Invoker + ?Sized> Iterator for Rows<'_, R> {
    type Item = Result<R::Tensor, NdViewError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let key = IndexKey::Scalar(self.next as isize);
        self.next += 1;
        Some(slice_op(self.invoker, self.tensor, &key, &self.options))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl<R: Invoker + ?Sized> ExactSizeIterator for Rows<'_, R> {}

// Link the external tests file
#[cfg(test)]
#[path = "slice_test.rs"]
mod tests;
