//! Texture conversion front end for `texel-ops`.
//!
//! - [`store`]: load and save [`texel_ops::PixelBuffer`]s through the `image`
//!   crate, including the embedded color profile.
//! - [`config`]: JSON pipeline description.
//! - [`pipeline`]: runs a pipeline step by step.

pub mod config;
pub mod pipeline;
pub mod store;

pub use config::{CombineMode, Pipeline, ResampleKind, Step};
