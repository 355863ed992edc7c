use std::borrow::Cow;

use tx_core::{BorderMode, Error, PixelBuffer, from_packed, map_index, to_packed, unpack_like};

use crate::kernel::ConvolutionKernel;

pub(crate) fn check_depth(operation: &'static str, bytes_per_pixel: usize) -> Result<(), Error> {
    match bytes_per_pixel {
        1 | 3 | 4 => Ok(()),
        _ => Err(Error::UnsupportedDepth {
            operation,
            bytes_per_pixel,
        }),
    }
}

/// Applies `kernel` to `source` `iterations` times and returns a new buffer
/// with the source's stride and metadata.
///
/// Only 1, 3 and 4 bytes per pixel are supported; other depths fail with the
/// recoverable [`Error::UnsupportedDepth`]. Zero iterations return a copy.
pub fn convolve(
    source: &PixelBuffer,
    kernel: &ConvolutionKernel,
    iterations: usize,
) -> Result<PixelBuffer, Error> {
    check_depth("convolve", source.bytes_per_pixel())?;
    if iterations == 0 {
        tracing::debug!("convolve with zero iterations, returning a copy");
        return Ok(source.clone());
    }

    let packed = run_passes(to_packed(source), source, kernel, iterations);
    unpack_like(source, packed)
}

/// Like [`convolve`] but consumes `source`; its storage receives the result.
pub fn convolve_owned(
    mut source: PixelBuffer,
    kernel: &ConvolutionKernel,
    iterations: usize,
) -> Result<PixelBuffer, Error> {
    check_depth("convolve", source.bytes_per_pixel())?;
    if iterations == 0 {
        return Ok(source);
    }

    let first = Cow::Owned(to_packed(&source).into_owned());
    let packed = run_passes(first, &source, kernel, iterations);
    from_packed(&mut source, &packed)?;
    Ok(source)
}

/// Ping-pongs between two packed buffers so no pass reads what it writes.
///
/// The first pass reads the source rows directly; an owned source copy is
/// then recycled as the second buffer.
fn run_passes(
    source: Cow<'_, [u8]>,
    geometry: &PixelBuffer,
    kernel: &ConvolutionKernel,
    iterations: usize,
) -> Vec<u8> {
    let grid = Grid::of(geometry);
    let mut read = vec![0u8; source.len()];
    filter_pass(&source, &mut read, &grid, kernel);
    if iterations == 1 {
        return read;
    }

    let mut write = match source {
        Cow::Owned(storage) => storage,
        Cow::Borrowed(slice) => vec![0u8; slice.len()],
    };
    for _ in 1..iterations {
        filter_pass(&read, &mut write, &grid, kernel);
        std::mem::swap(&mut read, &mut write);
    }
    read
}

#[derive(Debug, Clone, Copy)]
struct Grid {
    width: usize,
    height: usize,
    bpp: usize,
}

impl Grid {
    fn of(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            bpp: buffer.bytes_per_pixel(),
        }
    }

    fn row_bytes(&self) -> usize {
        self.width * self.bpp
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.bpp
    }

    /// Byte offsets of the nine samples feeding pixel `(x, y)`, or `None`
    /// for the four corners, which are copied unfiltered.
    ///
    /// Edge rows substitute the missing row with the edge row itself. Edge
    /// columns shift the whole window inward: the left column reads columns
    /// `0..=2` and the right column reads `w-3..=w-1`.
    fn taps(&self, x: usize, y: usize) -> Option<[usize; 9]> {
        let last_x = self.width - 1;
        let last_y = self.height - 1;
        let side = x == 0 || x == last_x;
        let cap = y == 0 || y == last_y;
        if side && cap {
            return None;
        }

        let (xi, yi) = (x as isize, y as isize);
        let (w, h) = (self.width as isize, self.height as isize);
        let (rows, cols) = if y == 0 {
            ([0, 0, 1], [xi - 1, xi, xi + 1])
        } else if y == last_y {
            ([yi - 1, yi, yi], [xi - 1, xi, xi + 1])
        } else if x == 0 {
            ([yi - 1, yi, yi + 1], [0, 1, 2])
        } else if x == last_x {
            // mirrors the left-column window so no tap reads past the row
            ([yi - 1, yi, yi + 1], [w - 3, w - 2, w - 1])
        } else {
            ([yi - 1, yi, yi + 1], [xi - 1, xi, xi + 1])
        };

        let mut taps = [0usize; 9];
        for (r, &ry) in rows.iter().enumerate() {
            let ry = clamp(ry, h);
            for (c, &cx) in cols.iter().enumerate() {
                taps[r * 3 + c] = self.offset(clamp(cx, w), ry);
            }
        }
        Some(taps)
    }
}

#[inline]
fn clamp(i: isize, len: isize) -> usize {
    map_index(i, len as usize, BorderMode::Clamp).unwrap_or(0)
}

#[cfg(not(feature = "parallel"))]
fn filter_pass(read: &[u8], write: &mut [u8], grid: &Grid, kernel: &ConvolutionKernel) {
    for (y, row) in write.chunks_mut(grid.row_bytes()).enumerate() {
        filter_row(read, row, y, grid, kernel);
    }
}

#[cfg(feature = "parallel")]
fn filter_pass(read: &[u8], write: &mut [u8], grid: &Grid, kernel: &ConvolutionKernel) {
    use rayon::prelude::*;

    write
        .par_chunks_mut(grid.row_bytes())
        .enumerate()
        .for_each(|(y, row)| filter_row(read, row, y, grid, kernel));
}

fn filter_row(read: &[u8], out: &mut [u8], y: usize, grid: &Grid, kernel: &ConvolutionKernel) {
    let bpp = grid.bpp;
    for (x, px) in out.chunks_exact_mut(bpp).enumerate() {
        match grid.taps(x, y) {
            None => {
                let src = grid.offset(x, y);
                px.copy_from_slice(&read[src..src + bpp]);
            }
            Some(taps) => {
                for (c, v) in px.iter_mut().enumerate() {
                    *v = kernel.apply(|k| read[taps[k] + c]);
                }
            }
        }
    }
}
