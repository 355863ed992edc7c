//! Two-buffer compositing and transparent edge repair.
//!
//! [`combine`] mutates its target in place; concurrent calls against the same
//! target must be serialized by the caller. [`fix_transparent_edges`] returns
//! a new buffer.

mod blend;
mod edges;

pub use blend::{BlendMode, CombineOutcome, combine, combine_owned};
pub use edges::{EdgeRepairConfig, fix_transparent_edges};
