//! PNG format support.
//!
//! Decoding expands palette and low bit depth images, then normalizes every
//! color type to 16-bit RGBA. Encoding always writes 16-bit RGBA so no
//! precision produced by the filters is lost.
//!
//! # Example
//!
//! ```rust,ignore
//! use stripefx_io::png::{read, write};
//!
//! let raster = read("input.png")?;
//! write("output.png", &raster)?;
//! ```

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use stripefx_core::Raster;
use tracing::debug;

/// Reads a PNG file into a 16-bit RGBA raster.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let file = File::open(path.as_ref())?;
    let mut decoder = ::png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(::png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: ::png::DecodingError| IoError::DecodeError(e.to_string()))?;

    debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        depth = ?info.bit_depth,
        "decoded png"
    );

    let samples = widen_samples(&buf[..info.buffer_size()], info.bit_depth)?;
    let rgba = expand_to_rgba(&samples, info.color_type)?;
    Ok(Raster::from_rgba16_rows(info.width, info.height, &rgba)?)
}

/// Writes a raster as a 16-bit RGBA PNG.
pub fn write<P: AsRef<Path>>(path: P, raster: &Raster) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = ::png::Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(::png::ColorType::Rgba);
    encoder.set_depth(::png::BitDepth::Sixteen);
    encoder.set_compression(::png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let bytes = u16_to_bytes(&raster.to_rgba16_rows());
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Converts decoded bytes to 16-bit samples, widening 8-bit values by 257.
fn widen_samples(bytes: &[u8], depth: ::png::BitDepth) -> IoResult<Vec<u16>> {
    match depth {
        ::png::BitDepth::Eight => Ok(bytes.iter().map(|&b| u16::from(b) * 257).collect()),
        ::png::BitDepth::Sixteen => Ok(bytes_to_u16(bytes)),
        other => Err(IoError::UnsupportedBitDepth(format!("{:?}", other))),
    }
}

/// Expands gray, gray+alpha and RGB samples to RGBA with opaque alpha.
fn expand_to_rgba(samples: &[u16], color: ::png::ColorType) -> IoResult<Vec<u16>> {
    const OPAQUE: u16 = u16::MAX;
    let rgba = match color {
        ::png::ColorType::Rgba => samples.to_vec(),
        ::png::ColorType::Rgb => samples
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], OPAQUE])
            .collect(),
        ::png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ::png::ColorType::Grayscale => samples
            .iter()
            .flat_map(|&g| [g, g, g, OPAQUE])
            .collect(),
        other => {
            return Err(IoError::UnsupportedBitDepth(format!("color type {:?}", other)));
        }
    };
    Ok(rgba)
}

/// Converts big-endian byte slice to u16 vector.
fn bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Converts u16 samples to big-endian bytes.
fn u16_to_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}
