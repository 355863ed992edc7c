//! Pixel buffers and shared primitives for texel-ops.
//!
//! ## Buffers and Stride
//! [`PixelBuffer`] owns `stride * height` bytes. `stride` is a byte count and
//! may exceed `width * bytes_per_pixel`; the extra bytes are row padding that
//! no algorithm reads or writes. A buffer without padding is "packed".
//!
//! ## Packing
//! Row-oriented algorithms work on packed rows. [`to_packed`] lends packed
//! rows for reading and [`into_packed`] is its consuming form. [`PackedMut`]
//! is the mutate-then-write-back form: edit the packed slice, then
//! [`PackedMut::store`]. Both copy only when the buffer is padded;
//! [`from_packed`] writes externally produced rows back.
//!
//! ## Errors
//! Every crate in the workspace reports failures through [`Error`].
//! [`Error::severity`] separates recoverable conditions, where the caller may
//! continue with an unmodified copy, from fatal ones.

mod border;
mod buffer;
mod error;
mod packed;

pub use border::{BorderMode, map_index};
pub use buffer::{ColorInterpretation, MAX_BYTES_PER_PIXEL, Palette, PixelBuffer};
pub use error::{Error, Severity, recover_with_copy};
pub use packed::{PackedMut, from_packed, into_packed, to_packed, unpack_like};
