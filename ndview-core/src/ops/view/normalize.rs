use log::trace;

use crate::error::NdViewError;

use super::key::{AxisKey, IndexKey};
use super::utils::{normalize_axis, AxisDescriptor};

/// Maps an indexing key onto one descriptor per indexed leading axis.
///
/// Axes beyond the returned descriptors are implicitly kept whole.
pub fn normalize(key: &IndexKey, shape: &[usize]) -> Result<Vec<AxisDescriptor>, NdViewError> {
    let rank = shape.len();
    let descriptors = match key {
        IndexKey::Scalar(index) => {
            let axis_length = leading_axis(shape, 1)?;
            vec![normalize_axis(&AxisKey::Index(*index), 0, axis_length)?]
        }
        IndexKey::Range(range) => {
            let axis_length = leading_axis(shape, 1)?;
            vec![normalize_axis(&AxisKey::Range(*range), 0, axis_length)?]
        }
        IndexKey::List(keys) => {
            if keys.is_empty() {
                return Err(NdViewError::EmptyIndex);
            }
            if keys.len() > rank {
                return Err(NdViewError::DimensionOverflow {
                    index_len: keys.len(),
                    rank,
                });
            }
            keys.iter()
                .zip(shape)
                .enumerate()
                .map(|(axis, (sub_key, &axis_length))| normalize_axis(sub_key, axis, axis_length))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    trace!("normalize: key {:?} on shape {:?} -> {:?}", key, shape, descriptors);
    Ok(descriptors)
}

fn leading_axis(shape: &[usize], index_len: usize) -> Result<usize, NdViewError> {
    shape.first().copied().ok_or(NdViewError::DimensionOverflow {
        index_len,
        rank: 0,
    })
}

/// Whether the descriptors select the entire tensor in its natural order.
pub fn is_whole(descriptors: &[AxisDescriptor], shape: &[usize]) -> bool {
    descriptors
        .iter()
        .zip(shape)
        .all(|(d, &axis_length)| d.is_whole(axis_length))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
