//! # stripefx-core
//!
//! Core types shared by every stripefx crate:
//!
//! - [`Raster`] - a 16-bit RGBA pixel grid stored column by column
//! - [`Stripe`] - a half-open column range used to split work across units
//! - [`clamp_sample`] - the float to 16-bit sample conversion used by all filters
//!
//! ## Crate Structure
//!
//! ```text
//! stripefx-core (this crate)
//!    ^
//!    |
//!    +-- stripefx-io  (PNG decode/encode into Raster)
//!    +-- stripefx-ops (kernels, convolution, striped dispatch)
//!    +-- stripefx-cli (job stream orchestration)
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod raster;
pub mod sample;
pub mod stripe;

pub use error::{Error, Result};
pub use raster::{Raster, Rgba16, StripeMut};
pub use sample::{clamp_sample, MAX_SAMPLE};
pub use stripe::{validate_partition, Stripe};

/// Prelude module for convenient imports.
///
/// ```
/// use stripefx_core::prelude::*;
///
/// let raster = Raster::new(4, 4);
/// assert_eq!(raster.full_stripe(), Stripe::full(4));
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Raster, Rgba16, StripeMut};
    pub use crate::sample::{clamp_sample, MAX_SAMPLE};
    pub use crate::stripe::Stripe;
}
