use crate::device::Context;
use crate::types::DType;
use thiserror::Error;

/// Error type for the ndview indexing engine and its reference runtime.
///
/// The first group of variants is produced by key normalization and
/// assignment planning; the second group is reported by runtimes while
/// serving primitive requests.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NdViewError {
    #[error("Index {index} is out of range for axis {axis} with size {axis_length}")]
    IndexOutOfRange {
        index: isize,
        axis: usize,
        axis_length: usize,
    },

    #[error("Slice step cannot be zero (axis {axis})")]
    InvalidStep { axis: usize },

    #[error("Indexing dimensions exceed tensor dimensions: {index_len} vs {rank}")]
    DimensionOverflow { index_len: usize, rank: usize },

    #[error("Index list cannot be empty")]
    EmptyIndex,

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Unsupported value type for assignment: {0}")]
    UnsupportedValueType(String),

    #[error(
        "Internal error: view shape {view:?} has a different size than the selected region {region:?}"
    )]
    InternalShapeInconsistency {
        view: Vec<usize>,
        region: Vec<usize>,
    },

    #[error("Device mismatch for operation '{operation}': expected {expected}, got {actual}")]
    DeviceMismatch {
        expected: Context,
        actual: Context,
        operation: String,
    },

    #[error("Data type mismatch for operation '{operation}': expected {expected}, got {actual}")]
    DataTypeMismatch {
        expected: DType,
        actual: DType,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Unknown dtype: {0}")]
    UnknownDType(String),

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },
}
