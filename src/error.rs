use std::io;

/// Errors from BMP decoding, encoding and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unrecognized format magic {0:#06x} (expected \"BM\")")]
    UnrecognizedFormat(u16),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("failed to allocate {bytes} bytes for pixel buffer")]
    AllocationFailed { bytes: usize },

    #[error("I/O error: {0}")]
    Io(io::Error),
}

/// Coarse classification of a [`BitmapError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad signature, unsupported bit depth or compression, bad dimensions.
    Format,
    /// The input ended before a header or the pixel data was complete.
    Truncation,
    /// A filter was given a parameter outside its domain.
    InvalidParameter,
    /// The underlying stream failed.
    Io,
    /// A pixel buffer could not be sized or allocated.
    Allocation,
}

impl BitmapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnrecognizedFormat(_) | Self::InvalidHeader(_) | Self::UnsupportedVariant(_) => {
                ErrorCategory::Format
            }
            Self::UnexpectedEof => ErrorCategory::Truncation,
            Self::InvalidParameter(_) => ErrorCategory::InvalidParameter,
            Self::Io(_) => ErrorCategory::Io,
            Self::DimensionsTooLarge { .. }
            | Self::LimitExceeded(_)
            | Self::AllocationFailed { .. } => ErrorCategory::Allocation,
        }
    }
}

impl From<io::Error> for BitmapError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            BitmapError::UnexpectedEof
        } else {
            BitmapError::Io(e)
        }
    }
}
