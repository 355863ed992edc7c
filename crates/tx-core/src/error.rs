use crate::buffer::PixelBuffer;

/// How a failed operation affects the surrounding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A best-effort fallback exists; the caller may continue with an
    /// unmodified copy of its input.
    Recoverable,
    /// Impossible parameters or an upstream logic error.
    Fatal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid stride: {stride} bytes is shorter than a {row_bytes}-byte row")]
    InvalidStride { stride: usize, row_bytes: usize },
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid depth: {bytes_per_pixel} bytes per pixel")]
    InvalidDepth { bytes_per_pixel: usize },
    #[error("{operation}: unsupported depth of {bytes_per_pixel} bytes per pixel")]
    UnsupportedDepth {
        operation: &'static str,
        bytes_per_pixel: usize,
    },
    #[error("{operation}: palette-indexed buffers cannot be interpolated")]
    IndexedColor { operation: &'static str },
    #[error("dimension mismatch: {expected:?} vs {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("invalid kernel scale {scale}")]
    InvalidKernel { scale: f64 },
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnsupportedDepth { .. } | Self::IndexedColor { .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}

/// Replaces a recoverable failure with a verbatim copy of `source`.
///
/// Fatal errors are passed through untouched.
pub fn recover_with_copy(
    result: Result<PixelBuffer, Error>,
    source: &PixelBuffer,
) -> Result<PixelBuffer, Error> {
    match result {
        Err(err) if err.is_recoverable() => {
            tracing::warn!(%err, "falling back to an unmodified copy");
            Ok(source.clone())
        }
        other => other,
    }
}
