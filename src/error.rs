use alloc::string::String;
use enough::StopReason;

use crate::pixel::Depth;

/// Errors from BMP decoding, encoding and plane editing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated pixel data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pixel ({row}, {col}) out of range for {width}x{height} plane")]
    OutOfRange {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    #[error("plane holds {actual} pixels, header declares {expected}")]
    DepthMismatch { expected: usize, actual: usize },

    #[error("pixel depth mismatch: expected {expected:?}, got {actual:?}")]
    PixelDepthMismatch { expected: Depth, actual: Depth },

    #[error("value {value} does not fit a {depth:?} pixel")]
    InvalidPixelValue { depth: Depth, value: u32 },

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpError {
    fn from(r: StopReason) -> Self {
        BmpError::Cancelled(r)
    }
}
