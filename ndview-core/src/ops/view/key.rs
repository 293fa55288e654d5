use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A `start:stop:step` selection along one axis.
///
/// Missing bounds mean "to the natural end in the direction of `step`".
/// A missing step means 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeKey {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl RangeKey {
    /// The `..` key, selecting a whole axis.
    pub const fn full() -> Self {
        RangeKey {
            start: None,
            stop: None,
            step: None,
        }
    }

    pub const fn new(start: isize, stop: isize) -> Self {
        RangeKey {
            start: Some(start),
            stop: Some(stop),
            step: None,
        }
    }

    pub const fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    pub const fn with_start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    pub const fn with_stop(mut self, stop: isize) -> Self {
        self.stop = Some(stop);
        self
    }

    /// No bounds and a unit step: the key selects the axis unchanged.
    pub fn is_identity(&self) -> bool {
        self.start.is_none() && self.stop.is_none() && matches!(self.step, None | Some(1))
    }

    pub fn effective_step(&self) -> isize {
        self.step.unwrap_or(1)
    }
}

/// One entry of a list key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKey {
    /// Select a single position; the axis is squeezed out of the view.
    Index(isize),
    Range(RangeKey),
}

/// A full indexing expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexKey {
    /// Applies to axis 0.
    Scalar(isize),
    /// Applies to axis 0.
    Range(RangeKey),
    /// One entry per leading axis.
    List(Vec<AxisKey>),
}

impl From<RangeKey> for AxisKey {
    fn from(range: RangeKey) -> Self {
        AxisKey::Range(range)
    }
}

impl From<RangeKey> for IndexKey {
    fn from(range: RangeKey) -> Self {
        IndexKey::Range(range)
    }
}

impl From<Vec<AxisKey>> for IndexKey {
    fn from(keys: Vec<AxisKey>) -> Self {
        IndexKey::List(keys)
    }
}

impl From<&[AxisKey]> for IndexKey {
    fn from(keys: &[AxisKey]) -> Self {
        IndexKey::List(keys.to_vec())
    }
}

impl From<AxisKey> for IndexKey {
    fn from(key: AxisKey) -> Self {
        match key {
            AxisKey::Index(i) => IndexKey::Scalar(i),
            AxisKey::Range(r) => IndexKey::Range(r),
        }
    }
}

/// Converts to `isize`, clamping values outside its range so that they are
/// rejected as out of bounds instead of wrapping around.
fn saturate<T>(i: T) -> isize
where
    T: TryInto<isize> + PartialOrd + Default,
{
    let negative = i < T::default();
    i.try_into()
        .unwrap_or(if negative { isize::MIN } else { isize::MAX })
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AxisKey {
                fn from(i: $t) -> Self {
                    AxisKey::Index(saturate(i))
                }
            }

            impl From<$t> for IndexKey {
                fn from(i: $t) -> Self {
                    IndexKey::Scalar(saturate(i))
                }
            }

            impl From<Range<$t>> for RangeKey {
                fn from(r: Range<$t>) -> Self {
                    RangeKey::new(saturate(r.start), saturate(r.end))
                }
            }

            impl From<RangeFrom<$t>> for RangeKey {
                fn from(r: RangeFrom<$t>) -> Self {
                    RangeKey::full().with_start(saturate(r.start))
                }
            }

            impl From<RangeTo<$t>> for RangeKey {
                fn from(r: RangeTo<$t>) -> Self {
                    RangeKey::full().with_stop(saturate(r.end))
                }
            }

            impl From<Range<$t>> for AxisKey {
                fn from(r: Range<$t>) -> Self {
                    AxisKey::Range(r.into())
                }
            }

            impl From<RangeFrom<$t>> for AxisKey {
                fn from(r: RangeFrom<$t>) -> Self {
                    AxisKey::Range(r.into())
                }
            }

            impl From<RangeTo<$t>> for AxisKey {
                fn from(r: RangeTo<$t>) -> Self {
                    AxisKey::Range(r.into())
                }
            }

            impl From<Range<$t>> for IndexKey {
                fn from(r: Range<$t>) -> Self {
                    IndexKey::Range(r.into())
                }
            }

            impl From<RangeFrom<$t>> for IndexKey {
                fn from(r: RangeFrom<$t>) -> Self {
                    IndexKey::Range(r.into())
                }
            }

            impl From<RangeTo<$t>> for IndexKey {
                fn from(r: RangeTo<$t>) -> Self {
                    IndexKey::Range(r.into())
                }
            }
        )*
    };
}

impl_from_integer!(isize, i32, i64, usize);

impl From<RangeFull> for RangeKey {
    fn from(_: RangeFull) -> Self {
        RangeKey::full()
    }
}

impl From<RangeFull> for AxisKey {
    fn from(_: RangeFull) -> Self {
        AxisKey::Range(RangeKey::full())
    }
}

impl From<RangeFull> for IndexKey {
    fn from(_: RangeFull) -> Self {
        IndexKey::Range(RangeKey::full())
    }
}

/// Builds an [`IndexKey::List`] from per-axis keys.
///
/// ```
/// use ndview_core::idx;
/// use ndview_core::ops::view::{AxisKey, IndexKey, RangeKey};
///
/// let key = idx![0, 1..3, .., RangeKey::full().with_step(-1)];
/// assert_eq!(
///     key,
///     IndexKey::List(vec![
///         AxisKey::Index(0),
///         AxisKey::Range(RangeKey::new(1, 3)),
///         AxisKey::Range(RangeKey::full()),
///         AxisKey::Range(RangeKey::full().with_step(-1)),
///     ])
/// );
/// ```
#[macro_export]
macro_rules! idx {
    ($($key:expr),+ $(,)?) => {
        $crate::ops::view::IndexKey::List(vec![$($crate::ops::view::AxisKey::from($key)),+])
    };
}
