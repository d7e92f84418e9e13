//! # stripefx-io
//!
//! Codec boundary for stripefx: decodes image files into
//! [`Raster`](stripefx_core::Raster) and encodes rasters back.
//!
//! Every decoded image is normalized to 16-bit RGBA: 8-bit samples are
//! widened by 257 (so 255 becomes 65535) and images without an alpha
//! channel get an opaque alpha of 65535. Writes always produce 16-bit RGBA.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stripefx_io::{read, write};
//!
//! let raster = read("input.png")?;
//! write("output.png", &raster)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths |
//! |--------|------|-------|------------|
//! | PNG | Yes | Yes | 1-16 in, 16 out |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};

use std::path::Path;
use stripefx_core::Raster;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads an image file, detecting the format from its magic bytes.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened,
/// [`IoError::UnsupportedFormat`] if the content is not a supported format,
/// and [`IoError::DecodeError`] if decoding fails.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    trace!(path = %path.display(), "read");

    match Format::from_magic_bytes(path)? {
        Format::Png => png::read(path),
        Format::Unknown => Err(IoError::UnsupportedFormat(format!(
            "unrecognized file signature in '{}'",
            path.display()
        ))),
    }
}

/// Writes a raster, choosing the format from the path extension.
///
/// A path with no extension is written as PNG.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for an unknown extension,
/// [`IoError::Io`] if the file cannot be created and
/// [`IoError::EncodeError`] if encoding fails.
pub fn write<P: AsRef<Path>>(path: P, raster: &Raster) -> IoResult<()> {
    let path = path.as_ref();
    trace!(path = %path.display(), width = raster.width(), height = raster.height(), "write");

    match Format::from_extension(path) {
        Format::Png => png::write(path, raster),
        Format::Unknown => Err(IoError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        )),
    }
}
