use tx_core::{ColorInterpretation, Error, Palette, PixelBuffer};

/// Nearest-neighbor rescale to `width x height`.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(floor(x * src_w / width), floor(y * src_h / height))` verbatim. The
/// result is packed and keeps the source resolution. Single-byte buffers get
/// a rebuilt grayscale ramp palette, inverted for `MinIsWhite` sources.
pub fn resample_nearest(
    source: &PixelBuffer,
    width: usize,
    height: usize,
) -> Result<PixelBuffer, Error> {
    if width < 1 || height < 1 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let bpp = source.bytes_per_pixel();
    let x_factor = source.width() as f64 / width as f64;
    let y_factor = source.height() as f64 / height as f64;
    let src_cols: Vec<usize> = (0..width)
        .map(|x| scaled_index(x, x_factor, source.width()))
        .collect();

    let mut out = PixelBuffer::new(width, height, bpp)?;
    for y in 0..height {
        let src_row = source.row(scaled_index(y, y_factor, source.height()));
        let dst_row = out.row_mut(y);
        for (dst, &sx) in dst_row.chunks_exact_mut(bpp).zip(&src_cols) {
            dst.copy_from_slice(&src_row[sx * bpp..(sx + 1) * bpp]);
        }
    }

    let (dpm_x, dpm_y) = source.dots_per_meter();
    out.set_dots_per_meter(dpm_x, dpm_y);
    if bpp == 1 {
        rebuild_gray_palette(source, &mut out);
    } else {
        out.set_interpretation(source.interpretation());
    }
    Ok(out)
}

#[inline]
fn scaled_index(i: usize, factor: f64, len: usize) -> usize {
    ((i as f64 * factor) as usize).min(len - 1)
}

fn rebuild_gray_palette(source: &PixelBuffer, out: &mut PixelBuffer) {
    let interpretation = match source.interpretation() {
        ColorInterpretation::MinIsWhite => ColorInterpretation::MinIsWhite,
        ColorInterpretation::Palette => {
            tracing::debug!("nearest resample replaces the source palette with a gray ramp");
            ColorInterpretation::MinIsBlack
        }
        _ => ColorInterpretation::MinIsBlack,
    };
    let palette = match interpretation {
        ColorInterpretation::MinIsWhite => Palette::inverted_grayscale(),
        _ => Palette::grayscale(),
    };
    out.set_palette(Some(palette));
    out.set_interpretation(interpretation);
}
