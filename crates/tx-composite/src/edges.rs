use tx_core::{BorderMode, Error, PixelBuffer, map_index, to_packed, unpack_like};

/// Options for [`fix_transparent_edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRepairConfig {
    /// Neighbors count as opaque when their alpha is strictly above this.
    pub opacity_threshold: u8,
}

impl Default for EdgeRepairConfig {
    fn default() -> Self {
        Self {
            opacity_threshold: 128,
        }
    }
}

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Bleeds opaque neighbor colors into translucent RGBA pixels.
///
/// Each pixel with alpha below 255 looks at its 8 neighbors (wrapping around
/// the image edges). If any of them is above the opacity threshold, the
/// pixel color moves toward their average by `1 - alpha / 255`. Alpha is
/// never changed and neighbors are always read from `source`.
pub fn fix_transparent_edges(
    source: &PixelBuffer,
    config: &EdgeRepairConfig,
) -> Result<PixelBuffer, Error> {
    if source.bytes_per_pixel() != 4 {
        return Err(Error::UnsupportedDepth {
            operation: "fix_transparent_edges",
            bytes_per_pixel: source.bytes_per_pixel(),
        });
    }

    let (w, h) = source.dimensions();
    let read = to_packed(source);
    let mut out = read.to_vec();
    let at = |x: usize, y: usize| (y * w + x) * 4;

    let mut repaired = 0usize;
    for y in 0..h {
        for x in 0..w {
            let px = &read[at(x, y)..at(x, y) + 4];
            if px[3] == 255 {
                continue;
            }

            let mut sum = [0.0f32; 3];
            let mut count = 0u32;
            for (dx, dy) in NEIGHBORS {
                let (Some(nx), Some(ny)) = (
                    map_index(x as isize + dx, w, BorderMode::Wrap),
                    map_index(y as isize + dy, h, BorderMode::Wrap),
                ) else {
                    continue;
                };
                let n = &read[at(nx, ny)..at(nx, ny) + 4];
                if n[3] > config.opacity_threshold {
                    count += 1;
                    for (s, &c) in sum.iter_mut().zip(n) {
                        *s += f32::from(c);
                    }
                }
            }
            if count == 0 {
                continue;
            }

            let weight = 1.0 - f32::from(px[3]) / 255.0;
            let keep = 1.0 - weight;
            let dst = &mut out[at(x, y)..at(x, y) + 3];
            for ((d, &c), s) in dst.iter_mut().zip(px).zip(sum) {
                let avg = s / count as f32;
                *d = (f32::from(c) * keep + avg * weight).clamp(0.0, 255.0) as u8;
            }
            repaired += 1;
        }
    }

    tracing::debug!(repaired, "fixed transparent edge pixels");
    unpack_like(source, out)
}

#[cfg(test)]
mod tests {
    use tx_core::{Error, PixelBuffer};

    use super::{EdgeRepairConfig, fix_transparent_edges};

    fn rgba(w: usize, h: usize, pixels: &[[u8; 4]]) -> PixelBuffer {
        let data = pixels.concat();
        PixelBuffer::from_vec(w, h, 4, data).expect("valid buffer")
    }

    #[test]
    fn opaque_image_is_unchanged() {
        let pixels: Vec<[u8; 4]> = (0..12u8).map(|i| [i * 20, 255 - i, i, 255]).collect();
        let src = rgba(4, 3, &pixels);
        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        assert_eq!(out, src);
    }

    #[test]
    fn clear_pixel_takes_neighbor_average() {
        let mut pixels = vec![[0, 0, 0, 0]; 9];
        pixels[1] = [100, 10, 0, 255];
        pixels[3] = [201, 20, 0, 255];
        let src = rgba(3, 3, &pixels);

        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        // (100 + 201) / 2 = 150.5, truncated
        assert_eq!(out.pixel(1, 1), Some(&[150u8, 15, 0, 0][..]));
        assert_eq!(out.pixel(1, 0), Some(&[100u8, 10, 0, 255][..]));
    }

    #[test]
    fn translucent_pixel_blends_own_color() {
        let mut pixels = vec![[200, 100, 50, 255]; 9];
        pixels[4] = [0, 0, 0, 128];
        let src = rgba(3, 3, &pixels);
        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        // weight = 1 - 128 / 255 = 0.498: 200 * 0.498 = 99.6, truncated
        assert_eq!(out.pixel(1, 1), Some(&[99u8, 49, 24, 128][..]));

        pixels[4] = [100, 10, 0, 128];
        let src = rgba(3, 3, &pixels);
        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        // 100 * 0.502 + 200 * 0.498 = 149.8; 10 * 0.502 + 100 * 0.498 = 54.8
        assert_eq!(out.pixel(1, 1), Some(&[149u8, 54, 24, 128][..]));
        assert_eq!(out.pixel(0, 0), Some(&[200u8, 100, 50, 255][..]));
    }

    #[test]
    fn neighbors_wrap_around() {
        let mut pixels = vec![[0, 0, 0, 0]; 16];
        pixels[15] = [40, 80, 120, 255];
        let src = rgba(4, 4, &pixels);

        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        assert_eq!(out.pixel(0, 0), Some(&[40u8, 80, 120, 0][..]));
        assert_eq!(out.pixel(1, 1), Some(&[0u8, 0, 0, 0][..]));
    }

    #[test]
    fn threshold_is_strict() {
        let mut pixels = vec![[0, 0, 0, 0]; 9];
        pixels[0] = [200, 200, 200, 128];
        let src = rgba(3, 3, &pixels);

        let out = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect("rgba");
        assert_eq!(out, src);

        let lenient = EdgeRepairConfig {
            opacity_threshold: 127,
        };
        let out = fix_transparent_edges(&src, &lenient).expect("rgba");
        assert_eq!(out.pixel(2, 2), Some(&[200u8, 200, 200, 0][..]));
    }

    #[test]
    fn rgb_is_rejected() {
        let src = PixelBuffer::new(2, 2, 3).expect("valid buffer");
        let err = fix_transparent_edges(&src, &EdgeRepairConfig::default()).expect_err("rgb");
        assert_eq!(
            err,
            Error::UnsupportedDepth {
                operation: "fix_transparent_edges",
                bytes_per_pixel: 3
            }
        );
        assert!(err.is_recoverable());
    }
}
