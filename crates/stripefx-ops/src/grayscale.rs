//! Channel-average grayscale.

use stripefx_core::{clamp_sample, Raster, Rgba16, StripeMut};
use tracing::trace;

/// Grayscale value of one pixel: `(r + g + b) / 3`, rounded, alpha kept.
///
/// ```rust
/// use stripefx_ops::grayscale::grayscale_pixel;
///
/// assert_eq!(grayscale_pixel([3, 4, 5, 9]), [4, 4, 4, 9]);
/// ```
#[inline]
pub fn grayscale_pixel([r, g, b, a]: Rgba16) -> Rgba16 {
    let sum = u32::from(r) + u32::from(g) + u32::from(b);
    let gray = clamp_sample(f64::from(sum) / 3.0);
    [gray, gray, gray, a]
}

/// Writes the grayscale of every pixel of `out`'s stripe.
pub fn grayscale(working: &Raster, out: &mut StripeMut<'_>) {
    let stripe = out.stripe();
    trace!(start = stripe.start, end = stripe.end, "grayscale");

    for x in stripe.columns() {
        for y in 0..out.height() {
            out.set(x, y, grayscale_pixel(working.pixel(x, y)));
        }
    }
}
