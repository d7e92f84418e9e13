//! Codec errors.

use std::io;
use thiserror::Error;

/// Failure reading or writing an image file.
#[derive(Debug, Error)]
pub enum IoError {
    /// The file could not be opened, created or read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Neither the signature nor the extension names a supported codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The PNG stream is corrupt or truncated.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The PNG encoder rejected the header or the samples.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// A bit depth or color type the RGBA16 conversion does not handle.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Decoded samples did not fit the reported dimensions.
    #[error(transparent)]
    Raster(#[from] stripefx_core::Error),
}

/// `Result` with [`IoError`].
pub type IoResult<T> = Result<T, IoError>;
