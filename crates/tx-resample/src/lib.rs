//! Rescaling of [`tx_core::PixelBuffer`]s.
//!
//! - [`resample_nearest`]: pure index lookup, any depth, no interpolation.
//! - [`resample_filtered`]: smooth rescale of gray, RGB and RGBA buffers
//!   through the `image` crate's resize filters.

mod filtered;
mod nearest;

pub use filtered::{ResampleFilter, resample_filtered};
pub use nearest::resample_nearest;
