use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgba};
use tx_core::{ColorInterpretation, Error, PixelBuffer, to_packed};

/// Reconstruction filter for [`resample_filtered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleFilter {
    /// Area average; each source pixel feeds exactly one destination pixel.
    Box,
    Bilinear,
    #[default]
    CatmullRom,
    Lanczos3,
    Gaussian,
}

impl ResampleFilter {
    fn filter_type(self) -> Option<FilterType> {
        match self {
            Self::Box => None,
            Self::Bilinear => Some(FilterType::Triangle),
            Self::CatmullRom => Some(FilterType::CatmullRom),
            Self::Lanczos3 => Some(FilterType::Lanczos3),
            Self::Gaussian => Some(FilterType::Gaussian),
        }
    }
}

/// Smooth rescale of a gray, RGB or RGBA buffer to `width x height`.
///
/// Palette-indexed sources fail with [`Error::IndexedColor`] since
/// interpolated indices are meaningless. The result is packed and carries the
/// source metadata.
pub fn resample_filtered(
    source: &PixelBuffer,
    width: usize,
    height: usize,
    filter: ResampleFilter,
) -> Result<PixelBuffer, Error> {
    if width < 1 || height < 1 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if source.interpretation() == ColorInterpretation::Palette {
        return Err(Error::IndexedColor {
            operation: "resample_filtered",
        });
    }

    let src_size = image_dims(source.width(), source.height())?;
    let dst_size = image_dims(width, height)?;
    let packed = to_packed(source).into_owned();
    let data = match source.bytes_per_pixel() {
        1 => rescale::<Luma<u8>>(packed, src_size, dst_size, filter)?,
        3 => rescale::<Rgb<u8>>(packed, src_size, dst_size, filter)?,
        4 => rescale::<Rgba<u8>>(packed, src_size, dst_size, filter)?,
        bytes_per_pixel => {
            return Err(Error::UnsupportedDepth {
                operation: "resample_filtered",
                bytes_per_pixel,
            });
        }
    };

    let mut out = PixelBuffer::from_vec(width, height, source.bytes_per_pixel(), data)?;
    out.copy_metadata_from(source);
    Ok(out)
}

fn image_dims(width: usize, height: usize) -> Result<(u32, u32), Error> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::InvalidDimensions { width, height }),
    }
}

fn rescale<P>(
    packed: Vec<u8>,
    (src_w, src_h): (u32, u32),
    (dst_w, dst_h): (u32, u32),
    filter: ResampleFilter,
) -> Result<Vec<u8>, Error>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let expected = packed.len();
    let img: ImageBuffer<P, Vec<u8>> =
        ImageBuffer::from_raw(src_w, src_h, packed).ok_or(Error::SizeMismatch {
            expected: src_w as usize * src_h as usize * P::CHANNEL_COUNT as usize,
            actual: expected,
        })?;

    let out = match filter.filter_type() {
        Some(filter) => imageops::resize(&img, dst_w, dst_h, filter),
        None => imageops::thumbnail(&img, dst_w, dst_h),
    };
    Ok(out.into_raw())
}
