//! Bridge between [`PixelBuffer`] and the `image` crate's codecs.

use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{
    DynamicImage, GrayImage, ImageDecoder, ImageFormat, ImageReader, RgbImage, RgbaImage,
};
use texel_ops::{ColorInterpretation, PixelBuffer, to_packed};

/// A decoded image and its embedded color profile, if any.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub buffer: PixelBuffer,
    pub icc_profile: Option<Vec<u8>>,
}

pub fn load(path: &Path) -> Result<Loaded> {
    let mut decoder = ImageReader::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("probing format of {}", path.display()))?
        .into_decoder()
        .with_context(|| format!("decoding {}", path.display()))?;
    let icc_profile = decoder
        .icc_profile()
        .with_context(|| format!("reading color profile of {}", path.display()))?;
    let img = DynamicImage::from_decoder(decoder)
        .with_context(|| format!("decoding {}", path.display()))?;

    let buffer = from_dynamic(img)
        .with_context(|| format!("constructing pixel buffer from {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        bytes_per_pixel = buffer.bytes_per_pixel(),
        has_profile = icc_profile.is_some(),
        "loaded image"
    );
    Ok(Loaded {
        buffer,
        icc_profile,
    })
}

/// Writes `buffer` in the format implied by the extension of `path`.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let mut img = to_dynamic(buffer)?;
    if ImageFormat::from_path(path).ok() == Some(ImageFormat::Jpeg) && img.color().has_alpha() {
        img = DynamicImage::ImageRgb8(img.to_rgb8());
    }
    img.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// 8-bit gray, RGB and RGBA keep their layout; anything else becomes RGBA.
pub fn from_dynamic(img: DynamicImage) -> Result<PixelBuffer> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let buffer = match img {
        DynamicImage::ImageLuma8(gray) => PixelBuffer::from_vec(w, h, 1, gray.into_raw())?,
        DynamicImage::ImageRgb8(rgb) => PixelBuffer::from_vec(w, h, 3, rgb.into_raw())?,
        DynamicImage::ImageRgba8(rgba) => PixelBuffer::from_vec(w, h, 4, rgba.into_raw())?,
        other => PixelBuffer::from_vec(w, h, 4, other.to_rgba8().into_raw())?,
    };
    Ok(buffer)
}

/// Expands palette and inverted-gray buffers so that codecs see plain
/// gray, RGB or RGBA samples.
pub fn to_dynamic(buffer: &PixelBuffer) -> Result<DynamicImage> {
    let (w, h) = (buffer.width() as u32, buffer.height() as u32);
    let data = to_packed(buffer).into_owned();

    let img = match (buffer.bytes_per_pixel(), buffer.interpretation()) {
        (1, ColorInterpretation::Palette) => {
            let Some(palette) = buffer.palette() else {
                bail!("palette-interpreted buffer has no palette");
            };
            let rgb: Vec<u8> = data.iter().flat_map(|&i| palette.get(i)).collect();
            DynamicImage::ImageRgb8(rgb_image(w, h, rgb)?)
        }
        (1, ColorInterpretation::MinIsWhite) => {
            let gray = data.into_iter().map(|v| 255 - v).collect();
            DynamicImage::ImageLuma8(gray_image(w, h, gray)?)
        }
        (1, _) => DynamicImage::ImageLuma8(gray_image(w, h, data)?),
        (3, _) => DynamicImage::ImageRgb8(rgb_image(w, h, data)?),
        (4, _) => DynamicImage::ImageRgba8(
            RgbaImage::from_raw(w, h, data).context("constructing RgbaImage from raw bytes")?,
        ),
        (bpp, _) => bail!("cannot encode {bpp} bytes per pixel"),
    };
    Ok(img)
}

fn gray_image(w: u32, h: u32, data: Vec<u8>) -> Result<GrayImage> {
    GrayImage::from_raw(w, h, data).context("constructing GrayImage from raw bytes")
}

fn rgb_image(w: u32, h: u32, data: Vec<u8>) -> Result<RgbImage> {
    RgbImage::from_raw(w, h, data).context("constructing RgbImage from raw bytes")
}
