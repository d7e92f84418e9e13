//! Error types for stripefx-core operations.
//!
//! The [`Error`] enum covers failures of raster construction, pixel access
//! and stripe partition checks. Higher crates wrap it (`stripefx-io`,
//! `stripefx-ops`).
//!
//! ```rust
//! use stripefx_core::{Raster, Stripe};
//!
//! let mut r = Raster::new(4, 1);
//! let err = r.stripes_mut(&[Stripe::new(0, 3)]).unwrap_err();
//! assert!(err.to_string().contains("width 4"));
//! ```

use thiserror::Error;

/// `Result` with the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by raster and stripe operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A checked pixel write landed outside the raster.
    #[error("pixel ({x}, {y}) out of bounds for raster {width}x{height}")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// A pixel or sample buffer has the wrong length for `width x height`.
    #[error("raster {width}x{height} rejected: {reason}")]
    InvalidDimensions { width: u32, height: u32, reason: String },

    /// A stripe list is not a sorted, gap-free cover of `[0, width)`.
    #[error("stripes do not partition width {width}: {reason}")]
    InvalidPartition { width: u32, reason: String },
}

impl Error {
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    pub fn invalid_partition(width: u32, reason: impl Into<String>) -> Self {
        Self::InvalidPartition {
            width,
            reason: reason.into(),
        }
    }

    /// `true` for [`Error::OutOfBounds`].
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
