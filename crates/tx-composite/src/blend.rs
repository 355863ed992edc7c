use tx_core::{Error, PixelBuffer};

/// Per-pixel formula used by [`combine`].
///
/// `blend` is the overlay weight, `1 - blend` the target weight. Only the
/// listed channels are written; everything else keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Channels 0..3 mix toward the overlay color.
    Rgb,
    /// Channel 3 mixes toward the overlay alpha.
    Alpha,
    /// Channel 3 mixes toward the overlay's first channel.
    RToAlpha,
    /// Channels 0..3 mix toward the overlay alpha; target alpha becomes 255.
    AlphaToRgb,
    /// Channels 0..3 gain `overlay * blend`, saturating.
    Add,
    Min,
    Max,
}

impl BlendMode {
    fn accepts(self, target_bpp: usize, overlay_bpp: usize) -> bool {
        let color = |bpp: usize| bpp == 3 || bpp == 4;
        match self {
            Self::Rgb | Self::Add | Self::Min | Self::Max => color(target_bpp) && color(overlay_bpp),
            Self::Alpha => target_bpp == 4 && overlay_bpp == 4,
            Self::RToAlpha => target_bpp == 4,
            Self::AlphaToRgb => color(target_bpp) && overlay_bpp == 4,
        }
    }

    #[inline]
    fn apply(self, out: &mut [u8], inp: &[u8], blend: f32, rb: f32) {
        let mix = |o: u8, i: u8| round_to_u8(f32::from(o) * rb + f32::from(i) * blend);
        match self {
            Self::Rgb => each_color(out, inp, mix),
            Self::Alpha => out[3] = mix(out[3], inp[3]),
            Self::RToAlpha => out[3] = mix(out[3], inp[0]),
            Self::AlphaToRgb => {
                let a = inp[3];
                for o in &mut out[..3] {
                    *o = mix(*o, a);
                }
                if let Some(alpha) = out.get_mut(3) {
                    *alpha = 255;
                }
            }
            Self::Add => each_color(out, inp, |o, i| {
                round_to_u8(f32::from(o) + f32::from(i) * blend)
            }),
            Self::Min => each_color(out, inp, u8::min),
            Self::Max => each_color(out, inp, u8::max),
        }
    }
}

/// Whether [`combine`] wrote to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOutcome {
    Applied,
    /// The depths did not suit the mode; the target is unmodified.
    Skipped,
}

#[inline]
fn each_color(out: &mut [u8], inp: &[u8], f: impl Fn(u8, u8) -> u8) {
    for (o, &i) in out[..3].iter_mut().zip(&inp[..3]) {
        *o = f(*o, i);
    }
}

#[inline]
fn round_to_u8(v: f32) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

fn check_depth(bytes_per_pixel: usize) -> Result<(), Error> {
    match bytes_per_pixel {
        1 | 3 | 4 => Ok(()),
        _ => Err(Error::InvalidDepth { bytes_per_pixel }),
    }
}

/// Blends `overlay` into `target` in place.
///
/// Both buffers must hold 1, 3 or 4 bytes per pixel ([`Error::InvalidDepth`])
/// and share width and height ([`Error::DimensionMismatch`]). A depth
/// combination the mode cannot use is logged and reported as
/// [`CombineOutcome::Skipped`] without touching `target`.
pub fn combine(
    target: &mut PixelBuffer,
    overlay: &PixelBuffer,
    mode: BlendMode,
    blend: f32,
) -> Result<CombineOutcome, Error> {
    check_depth(overlay.bytes_per_pixel())?;
    check_depth(target.bytes_per_pixel())?;
    target.ensure_same_dimensions(overlay)?;

    let target_bpp = target.bytes_per_pixel();
    let overlay_bpp = overlay.bytes_per_pixel();
    if !mode.accepts(target_bpp, overlay_bpp) {
        tracing::warn!(
            ?mode,
            target_bpp,
            overlay_bpp,
            "combine skipped: depths not supported by blend mode"
        );
        return Ok(CombineOutcome::Skipped);
    }

    let rb = 1.0 - blend;
    for y in 0..target.height() {
        let src = overlay.row(y);
        let dst = target.row_mut(y);
        for (out, inp) in dst
            .chunks_exact_mut(target_bpp)
            .zip(src.chunks_exact(overlay_bpp))
        {
            mode.apply(out, inp, blend, rb);
        }
    }
    Ok(CombineOutcome::Applied)
}

/// Like [`combine`] but consumes the overlay.
pub fn combine_owned(
    target: &mut PixelBuffer,
    overlay: PixelBuffer,
    mode: BlendMode,
    blend: f32,
) -> Result<CombineOutcome, Error> {
    combine(target, &overlay, mode, blend)
}
