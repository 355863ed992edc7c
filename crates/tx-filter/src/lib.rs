//! Fixed 3x3 convolution over [`tx_core::PixelBuffer`]s.
//!
//! Supported depths are 1, 3 and 4 bytes per pixel; every channel,
//! alpha included, is filtered independently.
//!
//! Boundary policy:
//! - The four corner pixels are copied unfiltered.
//! - The top row reads rows `(0, 0, 1)`; the bottom row reads `(h-2, h-1, h-1)`.
//! - The left column reads columns `(0, 1, 2)`; the right column reads
//!   `(w-3, w-2, w-1)`. Indices outside tiny images are clamped.
//!
//! Iterated passes ping-pong between two scratch buffers; pass `k` reads the
//! output of pass `k-1`. Enable the `parallel` feature to filter rows on the
//! rayon pool.

mod blur;
mod convolve;
mod kernel;
mod sharpen;

pub use blur::{blur, blur_owned};
pub use convolve::{convolve, convolve_owned};
pub use kernel::ConvolutionKernel;
pub use sharpen::{sharpen, sharpen_owned};
