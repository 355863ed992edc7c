use tx_core::Error;

/// A 3x3 weight matrix in row-major order (`0` top-left, `4` center,
/// `8` bottom-right) with a divisor and an additive bias.
///
/// Each output channel is `|sum / scale + bias|`, truncated toward zero and
/// clamped to 255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvolutionKernel {
    weights: [f64; 9],
    scale: f64,
    bias: f64,
}

impl ConvolutionKernel {
    pub const BLUR_WEIGHTS: [f64; 9] = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];

    pub fn new(weights: [f64; 9], scale: f64, bias: f64) -> Result<Self, Error> {
        if scale == 0.0 || !scale.is_finite() {
            return Err(Error::InvalidKernel { scale });
        }
        Ok(Self {
            weights,
            scale,
            bias,
        })
    }

    /// Kernel whose scale is the sum of its weights.
    pub fn normalized(weights: [f64; 9]) -> Result<Self, Error> {
        Self::new(weights, weights.iter().sum(), 0.0)
    }

    /// Binomial 3x3 blur, `[1 2 1; 2 4 2; 1 2 1] / 16`.
    pub fn blur() -> Self {
        Self {
            weights: Self::BLUR_WEIGHTS,
            scale: 16.0,
            bias: 0.0,
        }
    }

    pub fn identity() -> Self {
        let mut weights = [0.0; 9];
        weights[4] = 1.0;
        Self {
            weights,
            scale: 1.0,
            bias: 0.0,
        }
    }

    pub fn weights(&self) -> &[f64; 9] {
        &self.weights
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    #[inline]
    pub(crate) fn apply(&self, sample: impl Fn(usize) -> u8) -> u8 {
        let mut sum = 0.0f64;
        for (k, &w) in self.weights.iter().enumerate() {
            sum += f64::from(sample(k)) * w;
        }
        (sum / self.scale + self.bias).abs().min(255.0) as u8
    }
}
