use num_traits::AsPrimitive;

use crate::error::NdViewError;
use crate::types::DType;

/// Typed host storage backing a [`CpuTensor`](super::CpuTensor).
///
/// Elements are stored flat in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

macro_rules! map_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            Buffer::F32($values) => Buffer::F32($body),
            Buffer::F64($values) => Buffer::F64($body),
            Buffer::I32($values) => Buffer::I32($body),
            Buffer::I64($values) => Buffer::I64($body),
        }
    };
}

macro_rules! with_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            Buffer::F32($values) => $body,
            Buffer::F64($values) => $body,
            Buffer::I32($values) => $body,
            Buffer::I64($values) => $body,
        }
    };
}

impl Buffer {
    /// An all-zero buffer of `len` elements.
    pub fn zeros(dtype: DType, len: usize) -> Result<Self, NdViewError> {
        Buffer::filled(dtype, len, 0.0)
    }

    /// A buffer of `len` copies of `value`, converted to `dtype`.
    pub fn filled(dtype: DType, len: usize, value: f64) -> Result<Self, NdViewError> {
        Ok(match dtype {
            DType::F32 => Buffer::F32(vec![value as f32; len]),
            DType::F64 => Buffer::F64(vec![value; len]),
            DType::I32 => Buffer::I32(vec![value as i32; len]),
            DType::I64 => Buffer::I64(vec![value as i64; len]),
            other => return Err(unsupported_dtype(other)),
        })
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::F32(_) => DType::F32,
            Buffer::F64(_) => DType::F64,
            Buffer::I32(_) => DType::I32,
            Buffer::I64(_) => DType::I64,
        }
    }

    pub fn len(&self) -> usize {
        with_buffer!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every element widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values_as::<f64>()
    }

    fn values_as<T>(&self) -> Vec<T>
    where
        T: Copy + 'static,
        f32: AsPrimitive<T>,
        f64: AsPrimitive<T>,
        i32: AsPrimitive<T>,
        i64: AsPrimitive<T>,
    {
        with_buffer!(self, values => values.iter().map(|&v| v.as_()).collect())
    }

    /// Element-wise conversion to `dtype` with `as` semantics.
    pub fn cast(&self, dtype: DType) -> Result<Self, NdViewError> {
        Ok(match dtype {
            DType::F32 => Buffer::F32(self.values_as()),
            DType::F64 => Buffer::F64(self.values_as()),
            DType::I32 => Buffer::I32(self.values_as()),
            DType::I64 => Buffer::I64(self.values_as()),
            other => return Err(unsupported_dtype(other)),
        })
    }

    /// New buffer holding the elements at `indices`, in order.
    pub fn gather(&self, indices: &[usize]) -> Self {
        map_buffer!(self, values => indices.iter().map(|&i| values[i]).collect())
    }

    /// Writes `src[k]` to position `indices[k]`. Both buffers must share a dtype.
    pub fn scatter(&mut self, indices: &[usize], src: &Buffer) -> Result<(), NdViewError> {
        if indices.len() != src.len() {
            return Err(NdViewError::ShapeMismatch {
                expected: vec![indices.len()],
                actual: vec![src.len()],
                operation: "scatter".to_string(),
            });
        }
        match (self, src) {
            (Buffer::F32(dst), Buffer::F32(src)) => scatter_into(dst, indices, src),
            (Buffer::F64(dst), Buffer::F64(src)) => scatter_into(dst, indices, src),
            (Buffer::I32(dst), Buffer::I32(src)) => scatter_into(dst, indices, src),
            (Buffer::I64(dst), Buffer::I64(src)) => scatter_into(dst, indices, src),
            (dst, src) => {
                return Err(NdViewError::DataTypeMismatch {
                    expected: dst.dtype(),
                    actual: src.dtype(),
                    operation: "scatter".to_string(),
                })
            }
        }
        Ok(())
    }

    /// Sets the elements at `indices` to `value`, or every element when
    /// `indices` is `None`.
    pub fn fill(&mut self, indices: Option<&[usize]>, value: f64) {
        match self {
            Buffer::F32(values) => fill_into(values, indices, value as f32),
            Buffer::F64(values) => fill_into(values, indices, value),
            Buffer::I32(values) => fill_into(values, indices, value as i32),
            Buffer::I64(values) => fill_into(values, indices, value as i64),
        }
    }
}

fn scatter_into<T: Copy>(dst: &mut [T], indices: &[usize], src: &[T]) {
    for (&i, &v) in indices.iter().zip(src) {
        dst[i] = v;
    }
}

fn fill_into<T: Copy>(values: &mut [T], indices: Option<&[usize]>, value: T) {
    match indices {
        Some(indices) => indices.iter().for_each(|&i| values[i] = value),
        None => values.fill(value),
    }
}

fn unsupported_dtype(dtype: DType) -> NdViewError {
    NdViewError::UnsupportedOperation(format!("cpu runtime has no storage for dtype {}", dtype))
}
