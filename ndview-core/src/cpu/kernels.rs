//! Host implementations of the engine primitives.

use crate::device::Context;
use crate::error::NdViewError;
use crate::ops::view::AxisDescriptor;
use crate::types::DType;

use super::tensor::{CpuTensor, TensorData};

/// Row-major strides of a contiguous tensor of `shape`.
///
/// shape = [2, 3] -> strides = [3, 1]
pub(crate) fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Calls `f` with every coordinate of `counts`, last axis fastest.
fn for_each_coord(counts: &[usize], mut f: impl FnMut(&[usize])) {
    let total: usize = counts.iter().product();
    let mut coord = vec![0; counts.len()];
    for _ in 0..total {
        f(&coord);
        for axis in (0..counts.len()).rev() {
            coord[axis] += 1;
            if coord[axis] < counts[axis] {
                break;
            }
            coord[axis] = 0;
        }
    }
}

/// Flat source positions of the region selected by `axes`, in row-major
/// region order. Axes past `axes.len()` are taken whole.
pub(crate) fn region_indices(shape: &[usize], axes: &[AxisDescriptor]) -> Vec<usize> {
    let strides = calculate_strides(shape);
    let full: Vec<AxisDescriptor> = shape
        .iter()
        .enumerate()
        .map(|(axis, &len)| axes.get(axis).copied().unwrap_or_else(|| AxisDescriptor::whole(len)))
        .collect();
    let counts: Vec<usize> = full.iter().map(AxisDescriptor::len).collect();

    let mut indices = Vec::with_capacity(counts.iter().product());
    for_each_coord(&counts, |coord| {
        let flat = coord
            .iter()
            .zip(&full)
            .zip(&strides)
            .map(|((&c, d), &stride)| d.position(c) * stride)
            .sum::<usize>();
        indices.push(flat);
    });
    indices
}

/// Flat source positions when broadcasting `src_shape` up to `dst_shape`.
fn broadcast_indices(src_shape: &[usize], dst_shape: &[usize]) -> Vec<usize> {
    let strides = calculate_strides(src_shape);
    let mut indices = Vec::with_capacity(dst_shape.iter().product());
    for_each_coord(dst_shape, |coord| {
        let flat = coord
            .iter()
            .zip(src_shape)
            .zip(&strides)
            .map(|((&c, &len), &stride)| if len == 1 { 0 } else { c * stride })
            .sum::<usize>();
        indices.push(flat);
    });
    indices
}

fn check_axes(
    shape: &[usize],
    axes: &[AxisDescriptor],
    operation: &str,
) -> Result<(), NdViewError> {
    if axes.len() > shape.len() {
        return Err(NdViewError::DimensionOverflow {
            index_len: axes.len(),
            rank: shape.len(),
        });
    }
    for (axis, (d, &len)) in axes.iter().zip(shape).enumerate() {
        if d.step == 0 {
            return Err(NdViewError::InvalidStep { axis });
        }
        let count = d.len();
        if count > 0 && (d.start >= len || d.position(count - 1) >= len) {
            return Err(NdViewError::IndexOutOfRange {
                index: d.start as isize,
                axis,
                axis_length: len,
            });
        }
        log::trace!("{}: axis {} selects {} of {}", operation, axis, count, len);
    }
    Ok(())
}

fn region_shape(shape: &[usize], axes: &[AxisDescriptor]) -> Vec<usize> {
    axes.iter()
        .map(AxisDescriptor::len)
        .chain(shape.iter().skip(axes.len()).copied())
        .collect()
}

pub(crate) fn index_at(input: &CpuTensor, index: usize) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    let axis_length = guard.shape.first().copied().unwrap_or(0);
    if index >= axis_length {
        return Err(NdViewError::IndexOutOfRange {
            index: index as isize,
            axis: 0,
            axis_length,
        });
    }
    let inner: usize = guard.shape[1..].iter().product();
    let indices: Vec<usize> = (index * inner..(index + 1) * inner).collect();
    let mut shape = guard.shape[1..].to_vec();
    if shape.is_empty() {
        shape.push(1);
    }
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.gather(&indices),
        shape,
        guard.context,
    )?))
}

pub(crate) fn slice_axis(
    input: &CpuTensor,
    begin: usize,
    end: usize,
) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    if guard.shape.is_empty() {
        return Err(NdViewError::DimensionOverflow { index_len: 1, rank: 0 });
    }
    let axis_length = guard.shape[0];
    if begin > end || end > axis_length {
        return Err(NdViewError::IndexOutOfRange {
            index: end as isize,
            axis: 0,
            axis_length,
        });
    }
    let inner: usize = guard.shape[1..].iter().product();
    let indices: Vec<usize> = (begin * inner..end * inner).collect();
    let mut shape = guard.shape.clone();
    shape[0] = end - begin;
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.gather(&indices),
        shape,
        guard.context,
    )?))
}

pub(crate) fn strided_slice(
    input: &CpuTensor,
    axes: &[AxisDescriptor],
) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    check_axes(&guard.shape, axes, "slice")?;
    let indices = region_indices(&guard.shape, axes);
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.gather(&indices),
        region_shape(&guard.shape, axes),
        guard.context,
    )?))
}

pub(crate) fn reshape(input: &CpuTensor, shape: &[usize]) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    if shape.iter().product::<usize>() != guard.numel() {
        return Err(NdViewError::ShapeMismatch {
            expected: guard.shape.clone(),
            actual: shape.to_vec(),
            operation: "reshape".to_string(),
        });
    }
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.clone(),
        shape.to_vec(),
        guard.context,
    )?))
}

pub(crate) fn slice_assign(
    target: &CpuTensor,
    value: &CpuTensor,
    axes: &[AxisDescriptor],
) -> Result<CpuTensor, NdViewError> {
    // Copy the source out before locking the target: both may share storage.
    let (src, src_shape, src_context) = {
        let guard = value.read_data()?;
        (guard.buffer.clone(), guard.shape.clone(), guard.context)
    };

    let mut guard = target.write_data()?;
    if src_context != guard.context {
        return Err(NdViewError::DeviceMismatch {
            expected: guard.context,
            actual: src_context,
            operation: "_slice_assign".to_string(),
        });
    }
    check_axes(&guard.shape, axes, "_slice_assign")?;
    let region = region_shape(&guard.shape, axes);
    if region != src_shape {
        return Err(NdViewError::ShapeMismatch {
            expected: region,
            actual: src_shape,
            operation: "_slice_assign".to_string(),
        });
    }
    let indices = region_indices(&guard.shape, axes);
    guard.buffer.scatter(&indices, &src)?;
    drop(guard);
    Ok(target.clone())
}

pub(crate) fn slice_assign_scalar(
    target: &CpuTensor,
    scalar: f64,
    axes: &[AxisDescriptor],
) -> Result<CpuTensor, NdViewError> {
    let mut guard = target.write_data()?;
    check_axes(&guard.shape, axes, "_slice_assign_scalar")?;
    let indices = region_indices(&guard.shape, axes);
    guard.buffer.fill(Some(&indices), scalar);
    drop(guard);
    Ok(target.clone())
}

pub(crate) fn fill(target: &CpuTensor, value: f64) -> Result<CpuTensor, NdViewError> {
    target.write_data()?.buffer.fill(None, value);
    Ok(target.clone())
}

pub(crate) fn broadcast_to(input: &CpuTensor, shape: &[usize]) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    let compatible = guard.shape.len() == shape.len()
        && guard
            .shape
            .iter()
            .zip(shape)
            .all(|(&src, &dst)| src == dst || src == 1);
    if !compatible {
        return Err(NdViewError::ShapeMismatch {
            expected: shape.to_vec(),
            actual: guard.shape.clone(),
            operation: "broadcast_to".to_string(),
        });
    }
    let indices = broadcast_indices(&guard.shape, shape);
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.gather(&indices),
        shape.to_vec(),
        guard.context,
    )?))
}

pub(crate) fn cast(input: &CpuTensor, dtype: DType) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.cast(dtype)?,
        guard.shape.clone(),
        guard.context,
    )?))
}

pub(crate) fn copy_to(input: &CpuTensor, context: Context) -> Result<CpuTensor, NdViewError> {
    let guard = input.read_data()?;
    Ok(CpuTensor::from_data(TensorData::new(
        guard.buffer.clone(),
        guard.shape.clone(),
        context,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(start: usize, stop: isize, step: isize) -> AxisDescriptor {
        AxisDescriptor { start, stop, step, kept: true }
    }

    #[test]
    fn test_calculate_strides() {
        assert_eq!(calculate_strides(&[2, 3]), vec![3, 1]);
        assert_eq!(calculate_strides(&[2, 2, 2]), vec![4, 2, 1]);
        assert!(calculate_strides(&[]).is_empty());
    }

    #[test]
    fn test_region_indices_strided_and_reversed() {
        // [[0, 1, 2], [3, 4, 5]]
        let shape = [2, 3];
        assert_eq!(region_indices(&shape, &[descriptor(1, 2, 1)]), vec![3, 4, 5]);
        assert_eq!(
            region_indices(&shape, &[descriptor(0, 2, 1), descriptor(2, -1, -2)]),
            vec![2, 0, 5, 3]
        );
        assert!(region_indices(&shape, &[descriptor(1, 1, 1)]).is_empty());
    }

    #[test]
    fn test_broadcast_indices() {
        assert_eq!(broadcast_indices(&[1, 3], &[2, 3]), vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(broadcast_indices(&[2, 1], &[2, 2]), vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_check_axes_rejects_positions_past_the_axis() {
        assert!(check_axes(&[3], &[descriptor(0, 5, 1)], "test").is_err());
        assert!(check_axes(&[3], &[descriptor(2, -1, -1)], "test").is_ok());
    }
}
