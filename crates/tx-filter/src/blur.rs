use tx_core::{Error, PixelBuffer};

use crate::convolve::{check_depth, convolve, convolve_owned};
use crate::kernel::ConvolutionKernel;

/// Binomial 3x3 blur applied `iterations` times.
pub fn blur(source: &PixelBuffer, iterations: usize) -> Result<PixelBuffer, Error> {
    check_depth("blur", source.bytes_per_pixel())?;
    convolve(source, &ConvolutionKernel::blur(), iterations)
}

pub fn blur_owned(source: PixelBuffer, iterations: usize) -> Result<PixelBuffer, Error> {
    check_depth("blur", source.bytes_per_pixel())?;
    convolve_owned(source, &ConvolutionKernel::blur(), iterations)
}

#[cfg(test)]
mod tests {
    use tx_core::{Error, PixelBuffer};

    use crate::blur::{blur, blur_owned};

    #[test]
    fn spreads_a_single_bright_pixel() {
        let mut data = vec![0u8; 9];
        data[4] = 160;
        let src = PixelBuffer::from_vec(3, 3, 1, data).expect("valid buffer");

        let out = blur(&src, 1).expect("gray");
        // center: 4 * 160 / 16; top/bottom rows see the center through one
        // weight-2 tap; side columns read the shifted window around it.
        assert_eq!(
            out.data(),
            &[
                0, 20, 0, //
                40, 40, 40, //
                0, 20, 0, //
            ]
        );
    }

    #[test]
    fn label_names_the_operation() {
        let src = PixelBuffer::new(3, 3, 2).expect("valid buffer");
        assert_eq!(
            blur_owned(src, 1),
            Err(Error::UnsupportedDepth {
                operation: "blur",
                bytes_per_pixel: 2
            })
        );
    }
}
