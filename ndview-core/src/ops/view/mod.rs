// ndview-core/src/ops/view/mod.rs

pub mod key;
pub mod normalize;
pub mod shape;
pub mod slice;
pub mod utils;

pub use key::{AxisKey, IndexKey, RangeKey};
pub use normalize::{is_whole, normalize};
pub use shape::{region_shape, view_shape, ViewShape};
pub use slice::Rows;
pub use utils::{normalize_axis, selected_count, AxisDescriptor};

pub(crate) use slice::slice_op;
