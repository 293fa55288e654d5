use crate::error::NdViewError;

use super::utils::AxisDescriptor;

/// Output shape of a read, together with the source axes that survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewShape {
    pub dims: Vec<usize>,
    /// Source axes contributing to `dims`, in order. Empty when the view is
    /// the `[1]` placeholder of an all-scalar selection.
    pub kept_axes: Vec<usize>,
}

impl ViewShape {
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Whether any source axis was squeezed away.
    pub fn is_squeezed(&self, rank: usize) -> bool {
        self.kept_axes.len() != rank
    }
}

/// Computes the view shape of `descriptors` applied to a tensor of `shape`.
///
/// Scalar-indexed axes are dropped; axes beyond the descriptors keep their
/// length. A selection that drops every axis yields `[1]`, never `[]`.
pub fn view_shape(descriptors: &[AxisDescriptor], shape: &[usize]) -> ViewShape {
    let mut dims = Vec::with_capacity(shape.len());
    let mut kept_axes = Vec::with_capacity(shape.len());
    for (axis, d) in descriptors.iter().enumerate() {
        if d.kept {
            dims.push(d.len());
            kept_axes.push(axis);
        }
    }
    for (axis, &axis_length) in shape.iter().enumerate().skip(descriptors.len()) {
        dims.push(axis_length);
        kept_axes.push(axis);
    }
    if dims.is_empty() {
        dims.push(1);
    }
    ViewShape { dims, kept_axes }
}

/// Shape of the selected region before squeezing: scalar-indexed axes count
/// as length 1.
pub fn region_shape(descriptors: &[AxisDescriptor], shape: &[usize]) -> Vec<usize> {
    descriptors
        .iter()
        .map(AxisDescriptor::len)
        .chain(shape.iter().skip(descriptors.len()).copied())
        .collect()
}

/// Checks that a view and the region it was squeezed from hold the same
/// number of elements.
pub fn check_consistency(view: &ViewShape, region: &[usize]) -> Result<(), NdViewError> {
    if view.numel() != region.iter().product::<usize>() {
        return Err(NdViewError::InternalShapeInconsistency {
            view: view.dims.clone(),
            region: region.to_vec(),
        });
    }
    Ok(())
}
