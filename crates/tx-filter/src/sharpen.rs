use tx_core::{Error, PackedMut, PixelBuffer, to_packed};

use crate::blur::blur;
use crate::convolve::check_depth;

const SHARPEN_BLUR_PASSES: usize = 2;

/// Unsharp-style blend against a two-pass blur of `source`.
///
/// Every channel byte becomes `blurred * (1 - factor) + current * factor`,
/// truncated and clamped to `0..=255`, repeated `iterations` times against
/// the same blurred copy. `factor < 1` softens, `factor > 1` sharpens.
pub fn sharpen(source: &PixelBuffer, factor: f32, iterations: usize) -> Result<PixelBuffer, Error> {
    check_depth("sharpen", source.bytes_per_pixel())?;
    let blurred = blur(source, SHARPEN_BLUR_PASSES)?;
    let mut sharpened = source.clone();
    blend_toward(&mut sharpened, &blurred, factor, iterations);
    Ok(sharpened)
}

/// Like [`sharpen`] but reuses the storage of `source` for the result.
pub fn sharpen_owned(
    source: PixelBuffer,
    factor: f32,
    iterations: usize,
) -> Result<PixelBuffer, Error> {
    check_depth("sharpen", source.bytes_per_pixel())?;
    let blurred = blur(&source, SHARPEN_BLUR_PASSES)?;
    let mut sharpened = source;
    blend_toward(&mut sharpened, &blurred, factor, iterations);
    Ok(sharpened)
}

fn blend_toward(out: &mut PixelBuffer, blurred: &PixelBuffer, factor: f32, iterations: usize) {
    let rf = 1.0 - factor;
    let blurred = to_packed(blurred);
    let mut packed = PackedMut::new(out);
    for _ in 0..iterations {
        for (o, &b) in packed.as_mut_slice().iter_mut().zip(blurred.iter()) {
            let v = (f32::from(b) * rf + f32::from(*o) * factor) as i32;
            *o = v.clamp(0, 255) as u8;
        }
    }
    packed.store();
}
