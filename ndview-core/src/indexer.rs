//! # Indexer facade
//!
//! [`Indexer`] bundles an invoker with [`IndexerOptions`] and exposes the
//! read and write paths. The free functions [`read`] and [`write`] use the
//! default options.

use log::debug;

use crate::error::NdViewError;
use crate::ops::assign::{assign_op, plan_assignment, AssignmentPlan, Value};
use crate::ops::view::{slice_op, IndexKey, Rows};
use crate::runtime::Invoker;

/// Behaviour switches for the indexing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerOptions {
    /// Use `IndexAt`/`SliceAxis` for single-axis reads, return the handle
    /// for identity reads and `Fill` for whole-tensor scalar writes.
    pub fast_paths: bool,
    /// Check that the view and region element counts agree.
    pub verify_view_size: bool,
}

impl Default for IndexerOptions {
    fn default() -> Self {
        IndexerOptions {
            fast_paths: true,
            verify_view_size: true,
        }
    }
}

impl IndexerOptions {
    pub fn with_fast_paths(mut self, enabled: bool) -> Self {
        self.fast_paths = enabled;
        self
    }

    pub fn with_verify_view_size(mut self, enabled: bool) -> Self {
        self.verify_view_size = enabled;
        self
    }
}

/// Reads and writes tensors of one runtime.
///
/// ```
/// use ndview_core::{idx, CpuRuntime, CpuTensor, Indexer, TensorMeta};
///
/// let runtime = CpuRuntime::new();
/// let indexer = Indexer::new(&runtime);
/// let t = CpuTensor::arange(&[4, 5]).unwrap();
///
/// let view = indexer.read(&t, &idx![1..3, 0]).unwrap();
/// assert_eq!(view.shape(), vec![2]);
///
/// indexer.write(&t, &idx![.., 0], 7.0).unwrap();
/// assert_eq!(indexer.read(&t, &idx![3, 0]).unwrap().as_scalar().unwrap(), 7.0);
/// ```
#[derive(Debug)]
pub struct Indexer<'r, R: Invoker + ?Sized> {
    invoker: &'r R,
    options: IndexerOptions,
}

impl<R: Invoker + ?Sized> Clone for Indexer<'_, R> {
    fn clone(&self) -> Self {
        Indexer {
            invoker: self.invoker,
            options: self.options.clone(),
        }
    }
}

impl<'r, R: Invoker + ?Sized> Indexer<'r, R> {
    pub fn new(invoker: &'r R) -> Self {
        Indexer::with_options(invoker, IndexerOptions::default())
    }

    pub fn with_options(invoker: &'r R, options: IndexerOptions) -> Self {
        debug!("indexer created with {:?}", options);
        Indexer { invoker, options }
    }

    pub fn options(&self) -> &IndexerOptions {
        &self.options
    }

    /// The view of `tensor` selected by `key`.
    pub fn read(&self, tensor: &R::Tensor, key: &IndexKey) -> Result<R::Tensor, NdViewError> {
        slice_op(self.invoker, tensor, key, &self.options)
    }

    /// Writes `value` into the region of `tensor` selected by `key`.
    pub fn write<'v>(
        &self,
        tensor: &R::Tensor,
        key: &IndexKey,
        value: impl Into<Value<'v, R::Tensor>>,
    ) -> Result<(), NdViewError>
    where
        R::Tensor: 'v,
    {
        assign_op(self.invoker, tensor, key, value.into(), &self.options)
    }

    /// The plan [`write`](Self::write) would execute, without executing it.
    pub fn plan<'v>(
        &self,
        tensor: &R::Tensor,
        key: &IndexKey,
        value: impl Into<Value<'v, R::Tensor>>,
    ) -> Result<AssignmentPlan<'v, R::Tensor>, NdViewError>
    where
        R::Tensor: 'v,
    {
        plan_assignment(tensor, key, value.into(), &self.options)
    }

    /// Iterates over the axis-0 sub-views of `tensor`.
    pub fn rows<'a>(&'a self, tensor: &'a R::Tensor) -> Rows<'a, R> {
        Rows::new(self.invoker, tensor, self.options.clone())
    }
}

/// Reads the view of `tensor` selected by `key` with default options.
pub fn read<R: Invoker + ?Sized>(
    invoker: &R,
    tensor: &R::Tensor,
    key: &IndexKey,
) -> Result<R::Tensor, NdViewError> {
    Indexer::new(invoker).read(tensor, key)
}

/// Writes `value` into `tensor` at `key` with default options.
pub fn write<'v, R: Invoker + ?Sized>(
    invoker: &R,
    tensor: &R::Tensor,
    key: &IndexKey,
    value: impl Into<Value<'v, R::Tensor>>,
) -> Result<(), NdViewError>
where
    R::Tensor: 'v,
{
    Indexer::new(invoker).write(tensor, key, value)
}
