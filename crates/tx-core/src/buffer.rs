use crate::Error;

pub const MAX_BYTES_PER_PIXEL: usize = 16;

/// How the channel bytes of a buffer are meant to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorInterpretation {
    /// Single channel, 0 is black.
    #[default]
    MinIsBlack,
    /// Single channel, 0 is white.
    MinIsWhite,
    /// Single channel indexing into the buffer palette.
    Palette,
    Rgb,
    Rgba,
}

impl ColorInterpretation {
    pub fn default_for(bytes_per_pixel: usize) -> Self {
        match bytes_per_pixel {
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ => Self::MinIsBlack,
        }
    }
}

/// A 256-entry RGB color table for 1-byte-per-pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<[u8; 3]>,
}

impl Palette {
    pub const LEN: usize = 256;

    pub fn from_entries(entries: Vec<[u8; 3]>) -> Result<Self, Error> {
        if entries.len() != Self::LEN {
            return Err(Error::SizeMismatch {
                expected: Self::LEN,
                actual: entries.len(),
            });
        }
        Ok(Self { entries })
    }

    /// Linear ramp where entry `i` is `(i, i, i)`.
    pub fn grayscale() -> Self {
        Self {
            entries: (0..=255u8).map(|i| [i, i, i]).collect(),
        }
    }

    /// Linear ramp where entry `i` is `(255 - i)` in every channel.
    pub fn inverted_grayscale() -> Self {
        Self {
            entries: (0..=255u8).map(|i| [255 - i; 3]).collect(),
        }
    }

    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }

    pub fn get(&self, index: u8) -> [u8; 3] {
        self.entries[index as usize]
    }
}

/// An owned rectangular grid of pixels with an optional row padding.
///
/// `stride` is measured in bytes and is at least `width * bytes_per_pixel`.
/// The backing storage always holds exactly `stride * height` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    stride: usize,
    data: Vec<u8>,
    palette: Option<Palette>,
    interpretation: ColorInterpretation,
    dots_per_meter: (u32, u32),
}

impl PixelBuffer {
    /// Allocates a zeroed, packed buffer.
    pub fn new(width: usize, height: usize, bytes_per_pixel: usize) -> Result<Self, Error> {
        let stride = packed_row_bytes(width, height, bytes_per_pixel)?;
        Self::with_stride(width, height, bytes_per_pixel, stride)
    }

    /// Allocates a zeroed buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        stride: usize,
    ) -> Result<Self, Error> {
        let len = required_len(width, height, bytes_per_pixel, stride)?;
        Self::from_vec_with_stride(width, height, bytes_per_pixel, stride, vec![0; len])
    }

    pub fn from_vec(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        let stride = packed_row_bytes(width, height, bytes_per_pixel)?;
        Self::from_vec_with_stride(width, height, bytes_per_pixel, stride, data)
    }

    pub fn from_vec_with_stride(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        let expected = required_len(width, height, bytes_per_pixel, stride)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            stride,
            data,
            palette: None,
            interpretation: ColorInterpretation::default_for(bytes_per_pixel),
            dots_per_meter: (0, 0),
        })
    }

    /// Builds a buffer with the geometry and metadata of `self` over new storage.
    pub fn with_same_layout(&self, data: Vec<u8>) -> Result<Self, Error> {
        let mut out = Self::from_vec_with_stride(
            self.width,
            self.height,
            self.bytes_per_pixel,
            self.stride,
            data,
        )?;
        out.copy_metadata_from(self);
        Ok(out)
    }

    /// Copies palette, color interpretation and resolution from `other`.
    pub fn copy_metadata_from(&mut self, other: &PixelBuffer) {
        self.palette = other.palette.clone();
        self.interpretation = other.interpretation;
        self.dots_per_meter = other.dots_per_meter;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of meaningful bytes in one row, `width * bytes_per_pixel`.
    pub fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_packed(&self) -> bool {
        self.stride == self.row_bytes()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        let len = self.row_bytes();
        &mut self.data[start..start + len]
    }

    /// Channel bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride + x * self.bytes_per_pixel;
        self.data.get(start..start + self.bytes_per_pixel)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = y * self.stride + x * self.bytes_per_pixel;
        self.data.get_mut(start..start + self.bytes_per_pixel)
    }

    pub fn ensure_same_dimensions(&self, other: &PixelBuffer) -> Result<(), Error> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn set_palette(&mut self, palette: Option<Palette>) {
        self.palette = palette;
    }

    pub fn interpretation(&self) -> ColorInterpretation {
        self.interpretation
    }

    pub fn set_interpretation(&mut self, interpretation: ColorInterpretation) {
        self.interpretation = interpretation;
    }

    pub fn dots_per_meter(&self) -> (u32, u32) {
        self.dots_per_meter
    }

    pub fn set_dots_per_meter(&mut self, x: u32, y: u32) {
        self.dots_per_meter = (x, y);
    }
}

fn packed_row_bytes(width: usize, height: usize, bytes_per_pixel: usize) -> Result<usize, Error> {
    validate_shape(width, height, bytes_per_pixel)?;
    width
        .checked_mul(bytes_per_pixel)
        .ok_or(Error::InvalidDimensions { width, height })
}

fn required_len(
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    stride: usize,
) -> Result<usize, Error> {
    let row_bytes = packed_row_bytes(width, height, bytes_per_pixel)?;
    if stride < row_bytes {
        return Err(Error::InvalidStride { stride, row_bytes });
    }
    stride
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })
}

fn validate_shape(width: usize, height: usize, bytes_per_pixel: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if bytes_per_pixel == 0 || bytes_per_pixel > MAX_BYTES_PER_PIXEL {
        return Err(Error::InvalidDepth { bytes_per_pixel });
    }
    Ok(())
}
