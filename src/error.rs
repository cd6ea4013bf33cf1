use enough::StopReason;

use crate::pixel::PixelLayout;

/// Errors from BMP encoding/decoding, file I/O, and pixel conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("failed to open {}: {}", .path.display(), .source)]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

/// Coarse classification of a [`BitmapError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source or destination path could not be opened.
    OpenFailure,
    /// Magic bytes absent or a header field the codec requires is wrong.
    FormatInvalid,
    /// Well-formed BMP outside the supported subset (compression, bit depth).
    FormatUnsupported,
    /// Short read/write, truncated data, or an OS-level I/O error.
    IoFailure,
    /// Caller passed arguments that violate an operation's preconditions.
    PreconditionViolation,
    /// A configured [`crate::Limits`] cap was hit.
    LimitExceeded,
    /// The stop token requested cancellation.
    Cancelled,
}

impl BitmapError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } => ErrorKind::OpenFailure,
            Self::UnrecognizedFormat | Self::InvalidHeader(_) => ErrorKind::FormatInvalid,
            Self::UnsupportedVariant(_) => ErrorKind::FormatUnsupported,
            Self::UnexpectedEof => ErrorKind::IoFailure,
            Self::Io(_) => ErrorKind::IoFailure,
            Self::InvalidDimensions { .. }
            | Self::DimensionsTooLarge { .. }
            | Self::BufferSizeMismatch { .. }
            | Self::LayoutMismatch { .. } => ErrorKind::PreconditionViolation,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
