//! Conversion between strided storage and tightly packed rows.
//!
//! Per-row algorithms index pixels as `(y * width + x) * bytes_per_pixel`,
//! so they run on packed rows. Packed buffers are used in place; padded
//! buffers get a temporary copy that is written back on request.

use std::borrow::Cow;

use crate::{Error, PixelBuffer};

/// Packed view of `buffer`; `Cow::Owned` means a copy was made.
pub fn to_packed(buffer: &PixelBuffer) -> Cow<'_, [u8]> {
    if buffer.is_packed() {
        Cow::Borrowed(buffer.data())
    } else {
        Cow::Owned(gather_rows(buffer))
    }
}

/// Consumes `buffer` and returns its packed rows, reusing the storage when
/// there is no padding.
pub fn into_packed(buffer: PixelBuffer) -> Vec<u8> {
    if buffer.is_packed() {
        buffer.into_data()
    } else {
        gather_rows(&buffer)
    }
}

/// Copies packed rows into `buffer`, honoring its stride.
pub fn from_packed(buffer: &mut PixelBuffer, packed: &[u8]) -> Result<(), Error> {
    let expected = buffer.row_bytes() * buffer.height();
    if packed.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: packed.len(),
        });
    }
    scatter_rows(buffer, packed);
    Ok(())
}

/// Builds a buffer shaped like `template` (stride and metadata included)
/// from packed rows.
pub fn unpack_like(template: &PixelBuffer, packed: Vec<u8>) -> Result<PixelBuffer, Error> {
    if template.is_packed() {
        return template.with_same_layout(packed);
    }

    let mut out = template.with_same_layout(vec![0; template.stride() * template.height()])?;
    from_packed(&mut out, &packed)?;
    Ok(out)
}

/// Mutable packed access to a buffer.
///
/// Dropping the guard without calling [`PackedMut::store`] discards any
/// temporary copy and leaves a padded buffer untouched. For packed buffers
/// writes go straight to the buffer storage.
#[derive(Debug)]
pub struct PackedMut<'a> {
    buffer: &'a mut PixelBuffer,
    scratch: Option<Vec<u8>>,
}

impl<'a> PackedMut<'a> {
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        let scratch = if buffer.is_packed() {
            None
        } else {
            Some(gather_rows(buffer))
        };
        Self { buffer, scratch }
    }

    pub fn was_copied(&self) -> bool {
        self.scratch.is_some()
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.scratch {
            Some(scratch) => scratch.as_slice(),
            None => self.buffer.data(),
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.scratch {
            Some(scratch) => scratch.as_mut_slice(),
            None => self.buffer.data_mut(),
        }
    }

    /// Writes the packed rows back. A no-op when no copy was made.
    pub fn store(mut self) {
        if let Some(scratch) = self.scratch.take() {
            scatter_rows(self.buffer, &scratch);
        }
    }
}

fn gather_rows(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buffer.row_bytes() * buffer.height());
    for y in 0..buffer.height() {
        out.extend_from_slice(buffer.row(y));
    }
    out
}

fn scatter_rows(buffer: &mut PixelBuffer, packed: &[u8]) {
    let row_bytes = buffer.row_bytes();
    for (y, src) in packed.chunks_exact(row_bytes).enumerate() {
        buffer.row_mut(y).copy_from_slice(src);
    }
}
