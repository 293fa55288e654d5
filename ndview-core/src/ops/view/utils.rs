use crate::error::NdViewError;

use super::key::{AxisKey, RangeKey};

/// Normalized selection along one axis.
///
/// `start` is always a valid position on the axis. `stop` is exclusive; for
/// negative steps a `stop` of `-1` means "through index 0".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDescriptor {
    pub start: usize,
    pub stop: isize,
    pub step: isize,
    /// `false` when the axis was consumed by a scalar index.
    pub kept: bool,
}

impl AxisDescriptor {
    /// The descriptor selecting a whole axis of length `axis_length`.
    pub fn whole(axis_length: usize) -> Self {
        AxisDescriptor {
            start: 0,
            stop: axis_length as isize,
            step: 1,
            kept: true,
        }
    }

    /// Number of positions selected along the axis.
    pub fn len(&self) -> usize {
        selected_count(self.start as isize, self.stop, self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Source position of the `i`-th selected element.
    pub fn position(&self, i: usize) -> usize {
        (self.start as isize + i as isize * self.step) as usize
    }

    /// Whether this descriptor covers the axis front to back with unit step.
    pub fn is_whole(&self, axis_length: usize) -> bool {
        self.kept && self.start == 0 && self.step == 1 && self.stop == axis_length as isize
    }
}

/// Element count of `start..stop` walked with `step` (ceiling division,
/// clamped at zero).
pub fn selected_count(start: isize, stop: isize, step: isize) -> usize {
    let span = if step > 0 { stop - start } else { start - stop };
    if span <= 0 {
        return 0;
    }
    // Any nonzero step is valid, including isize::MIN.
    (span as usize - 1) / step.unsigned_abs() + 1
}

/// Resolves one per-axis key against an axis of `axis_length`.
///
/// `axis` is only used for error reporting.
pub fn normalize_axis(
    key: &AxisKey,
    axis: usize,
    axis_length: usize,
) -> Result<AxisDescriptor, NdViewError> {
    match key {
        AxisKey::Index(index) => normalize_index(*index, axis, axis_length),
        AxisKey::Range(range) => normalize_range(range, axis, axis_length),
    }
}

fn normalize_index(
    index: isize,
    axis: usize,
    axis_length: usize,
) -> Result<AxisDescriptor, NdViewError> {
    let len = axis_length as isize;
    let resolved = if index < 0 { index + len } else { index };
    if resolved < 0 || resolved >= len {
        return Err(NdViewError::IndexOutOfRange {
            index,
            axis,
            axis_length,
        });
    }
    Ok(AxisDescriptor {
        start: resolved as usize,
        stop: resolved + 1,
        step: 1,
        kept: false,
    })
}

fn normalize_range(
    range: &RangeKey,
    axis: usize,
    axis_length: usize,
) -> Result<AxisDescriptor, NdViewError> {
    let len = axis_length as isize;
    let step = range.effective_step();
    if step == 0 {
        return Err(NdViewError::InvalidStep { axis });
    }

    let start = match range.start {
        None if step > 0 => 0,
        None => len - 1,
        Some(s) => {
            let resolved = if s < 0 { s + len } else { s };
            if resolved < 0 || resolved >= len {
                return Err(NdViewError::IndexOutOfRange {
                    index: s,
                    axis,
                    axis_length,
                });
            }
            resolved
        }
    };

    let stop = match range.stop {
        None if step > 0 => len,
        None => -1,
        Some(s) => {
            let resolved = if s < 0 { s + len } else { s };
            if resolved < 0 || resolved > len {
                return Err(NdViewError::IndexOutOfRange {
                    index: s,
                    axis,
                    axis_length,
                });
            }
            resolved
        }
    };

    // A defaulted start on an empty axis resolves to -1 for negative steps;
    // nothing is selected in that case.
    if start < 0 {
        return Ok(AxisDescriptor {
            start: 0,
            stop: 0,
            step,
            kept: true,
        });
    }

    Ok(AxisDescriptor {
        start: start as usize,
        stop,
        step,
        kept: true,
    })
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
