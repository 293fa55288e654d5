use std::fmt;
use std::str::FromStr;

use crate::error::NdViewError;

/// Defines the element data types a tensor can carry.
///
/// The engine only compares and reports dtypes; it never interprets raw
/// bytes. The numeric ids follow the runtime's type-flag numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type.
    F32,
    /// 64-bit floating-point type.
    F64,
    /// 16-bit floating-point type.
    F16,
    /// 8-bit unsigned integer type.
    U8,
    /// 32-bit integer type.
    I32,
    /// 8-bit signed integer type.
    I8,
    /// 64-bit integer type.
    I64,
}

const REGISTRY: [(DType, &str, u32); 7] = [
    (DType::F32, "float32", 0),
    (DType::F64, "float64", 1),
    (DType::F16, "float16", 2),
    (DType::U8, "uint8", 3),
    (DType::I32, "int32", 4),
    (DType::I8, "int8", 5),
    (DType::I64, "int64", 6),
];

impl DType {
    /// Canonical name, e.g. `"float32"`.
    pub fn name(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(dtype, _, _)| *dtype == self)
            .map(|(_, name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Numeric type id.
    pub fn id(self) -> u32 {
        match self {
            DType::F32 => 0,
            DType::F64 => 1,
            DType::F16 => 2,
            DType::U8 => 3,
            DType::I32 => 4,
            DType::I8 => 5,
            DType::I64 => 6,
        }
    }

    pub fn from_name(name: &str) -> Result<Self, NdViewError> {
        REGISTRY
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(dtype, _, _)| *dtype)
            .ok_or_else(|| NdViewError::UnknownDType(name.to_string()))
    }

    pub fn from_id(id: u32) -> Result<Self, NdViewError> {
        REGISTRY
            .iter()
            .find(|(_, _, i)| *i == id)
            .map(|(dtype, _, _)| *dtype)
            .ok_or_else(|| NdViewError::UnknownDType(format!("id {}", id)))
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = NdViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::from_name(s)
    }
}
