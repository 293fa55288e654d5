//! # Indexing Operations Module (`ops`)
//!
//! The two halves of the indexing engine live here:
//!
//! - [`view`]: key types, normalization of keys into per-axis descriptors,
//!   view shape computation and the read dispatcher (`slice_op`).
//! - [`assign`]: assignment planning, value coercion and the write
//!   executor (`assign_op`).
//!
//! The `_op` functions are `pub(crate)`; callers go through
//! [`Indexer`](crate::indexer::Indexer) or the crate-level
//! [`read`](crate::read)/[`write`](crate::write) functions.

pub mod assign;
pub mod view;
