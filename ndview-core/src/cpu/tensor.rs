use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::device::Context;
use crate::error::NdViewError;
use crate::runtime::TensorMeta;
use crate::types::DType;

use super::buffer::Buffer;

/// Storage and metadata behind a [`CpuTensor`].
///
/// The buffer is always contiguous and row-major; `shape` describes how it
/// is laid out.
#[derive(Debug)]
pub struct TensorData {
    pub(crate) buffer: Buffer,
    pub(crate) shape: Vec<usize>,
    pub(crate) context: Context,
}

impl TensorData {
    pub fn new(buffer: Buffer, shape: Vec<usize>, context: Context) -> Result<Self, NdViewError> {
        let numel: usize = shape.iter().product();
        if buffer.len() != numel {
            return Err(NdViewError::TensorCreationError {
                data_len: buffer.len(),
                shape,
            });
        }
        Ok(TensorData {
            buffer,
            shape,
            context,
        })
    }

    pub fn numel(&self) -> usize {
        self.buffer.len()
    }
}

/// Tensor handle of the reference CPU runtime.
///
/// `CpuTensor` wraps `Arc<RwLock<TensorData>>`: clones share the same
/// storage, and in-place primitives mutate it through the lock.
#[derive(Clone)]
pub struct CpuTensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl CpuTensor {
    pub fn new(buffer: Buffer, shape: Vec<usize>, context: Context) -> Result<Self, NdViewError> {
        Ok(CpuTensor::from_data(TensorData::new(buffer, shape, context)?))
    }

    pub(crate) fn from_data(data: TensorData) -> Self {
        CpuTensor {
            data: Arc::new(RwLock::new(data)),
        }
    }

    pub fn from_vec_f32(data: Vec<f32>, shape: Vec<usize>) -> Result<Self, NdViewError> {
        CpuTensor::new(Buffer::F32(data), shape, Context::cpu())
    }

    pub fn from_vec_f64(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, NdViewError> {
        CpuTensor::new(Buffer::F64(data), shape, Context::cpu())
    }

    pub fn from_vec_i32(data: Vec<i32>, shape: Vec<usize>) -> Result<Self, NdViewError> {
        CpuTensor::new(Buffer::I32(data), shape, Context::cpu())
    }

    pub fn from_vec_i64(data: Vec<i64>, shape: Vec<usize>) -> Result<Self, NdViewError> {
        CpuTensor::new(Buffer::I64(data), shape, Context::cpu())
    }

    /// A tensor of `shape` with every element set to `value`.
    pub fn full(
        shape: &[usize],
        value: f64,
        dtype: DType,
        context: Context,
    ) -> Result<Self, NdViewError> {
        let numel = shape.iter().product();
        CpuTensor::new(Buffer::filled(dtype, numel, value)?, shape.to_vec(), context)
    }

    pub fn zeros(shape: &[usize], dtype: DType, context: Context) -> Result<Self, NdViewError> {
        CpuTensor::full(shape, 0.0, dtype, context)
    }

    /// An `F32` tensor holding `0, 1, .., numel-1` laid out as `shape`.
    pub fn arange(shape: &[usize]) -> Result<Self, NdViewError> {
        let numel: usize = shape.iter().product();
        CpuTensor::from_vec_f32((0..numel).map(|x| x as f32).collect(), shape.to_vec())
    }

    /// Acquires a read lock on the tensor's data.
    pub fn read_data(&self) -> Result<RwLockReadGuard<'_, TensorData>, NdViewError> {
        self.data.read().map_err(|e| NdViewError::LockError {
            lock_type: "read".to_string(),
            reason: e.to_string(),
        })
    }

    /// Acquires a write lock on the tensor's data.
    pub fn write_data(&self) -> Result<RwLockWriteGuard<'_, TensorData>, NdViewError> {
        self.data.write().map_err(|e| NdViewError::LockError {
            lock_type: "write".to_string(),
            reason: e.to_string(),
        })
    }

    /// Metadata access never fails: a poisoned lock still holds valid metadata.
    fn meta(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn to_f64_vec(&self) -> Result<Vec<f64>, NdViewError> {
        Ok(self.read_data()?.buffer.to_f64_vec())
    }

    /// Returns the data as `Vec<f32>`; the tensor must be `F32`.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, NdViewError> {
        let guard = self.read_data()?;
        match &guard.buffer {
            Buffer::F32(values) => Ok(values.clone()),
            other => Err(NdViewError::DataTypeMismatch {
                expected: DType::F32,
                actual: other.dtype(),
                operation: "get_f32_data".to_string(),
            }),
        }
    }

    /// The single value of a `[1]`-shaped tensor.
    pub fn as_scalar(&self) -> Result<f64, NdViewError> {
        let guard = self.read_data()?;
        if guard.shape != [1] {
            return Err(NdViewError::ShapeMismatch {
                expected: vec![1],
                actual: guard.shape.clone(),
                operation: "as_scalar".to_string(),
            });
        }
        Ok(guard.buffer.to_f64_vec()[0])
    }
}

impl TensorMeta for CpuTensor {
    fn shape(&self) -> Vec<usize> {
        self.meta().shape.clone()
    }

    fn dtype(&self) -> DType {
        self.meta().buffer.dtype()
    }

    fn context(&self) -> Context {
        self.meta().context
    }

    fn same_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for CpuTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.meta();
        let shape_info = guard
            .shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("x");
        write!(
            f,
            "<CpuTensor {} {} @{}> {:?}",
            shape_info,
            guard.buffer.dtype(),
            guard.context,
            guard.buffer.to_f64_vec()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_checks_length() {
        let result = CpuTensor::from_vec_f32(vec![1.0, 2.0, 3.0], vec![2, 2]);
        assert!(matches!(result, Err(NdViewError::TensorCreationError { data_len: 3, .. })));
    }

    #[test]
    fn test_metadata() -> Result<(), NdViewError> {
        let t = CpuTensor::full(&[2, 3], 1.5, DType::F64, Context::gpu(1))?;
        assert_eq!(t.shape(), vec![2, 3]);
        assert_eq!(t.dtype(), DType::F64);
        assert_eq!(t.context(), Context::gpu(1));
        assert_eq!(t.ndim(), 2);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.to_f64_vec()?, vec![1.5; 6]);
        Ok(())
    }

    #[test]
    fn test_clones_share_storage() -> Result<(), NdViewError> {
        let a = CpuTensor::arange(&[4])?;
        let b = a.clone();
        let c = CpuTensor::arange(&[4])?;
        assert!(a.same_storage(&b));
        assert!(!a.same_storage(&c));
        Ok(())
    }

    #[test]
    fn test_as_scalar() -> Result<(), NdViewError> {
        assert_eq!(CpuTensor::from_vec_i32(vec![7], vec![1])?.as_scalar()?, 7.0);
        assert!(matches!(
            CpuTensor::arange(&[2])?.as_scalar(),
            Err(NdViewError::ShapeMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_debug_format() -> Result<(), NdViewError> {
        let t = CpuTensor::arange(&[2, 2])?;
        assert_eq!(format!("{:?}", t), "<CpuTensor 2x2 float32 @cpu(0)> [0.0, 1.0, 2.0, 3.0]");
        Ok(())
    }
}
