//! 3x3 convolution.
//!
//! For each output pixel the nine taps around it are visited with `m`
//! (horizontal) as the outer loop and `n` (vertical) as the inner loop.
//! Taps that fall outside the raster are skipped entirely: they are not
//! zero-padded and not clamped to the edge, so border pixels are computed
//! from fewer weights than interior ones.
//!
//! Only R, G and B are weighted. The output alpha is copied from the last
//! in-bounds tap of the scan, which is `(x + 1, y + 1)` for interior pixels
//! and the nearest in-bounds neighbour towards the bottom-right on borders.

use stripefx_core::{clamp_sample, Raster, Rgba16, StripeMut};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::kernel::Kernel;

/// Computes the convolved pixel at `(x, y)` from `working`.
///
/// # Example
///
/// ```rust
/// use stripefx_core::Raster;
/// use stripefx_ops::{convolve::convolve_pixel, Kernel};
///
/// let working = Raster::filled(3, 3, [900, 900, 900, 65535]);
/// assert_eq!(convolve_pixel(&Kernel::BLUR, &working, 1, 1), [900, 900, 900, 65535]);
/// ```
pub fn convolve_pixel(kernel: &Kernel, working: &Raster, x: u32, y: u32) -> Rgba16 {
    let mut red = 0.0f64;
    let mut green = 0.0f64;
    let mut blue = 0.0f64;
    let mut alpha = 0u16;

    for m in 0..3 {
        for n in 0..3 {
            let xx = i64::from(x) + m as i64 - 1;
            let yy = i64::from(y) + n as i64 - 1;
            if !working.in_bounds(xx, yy) {
                continue;
            }
            let [r, g, b, a] = working.pixel(xx as u32, yy as u32);
            let w = kernel.weight(m, n);
            red += f64::from(r) * w;
            green += f64::from(g) * w;
            blue += f64::from(b) * w;
            alpha = a;
        }
    }

    [
        clamp_sample(red),
        clamp_sample(green),
        clamp_sample(blue),
        alpha,
    ]
}

/// Convolves every pixel of `out`'s stripe, reading from `working`.
pub fn convolve(kernel: &Kernel, working: &Raster, out: &mut StripeMut<'_>) {
    let stripe = out.stripe();
    trace!(start = stripe.start, end = stripe.end, height = out.height(), "convolve");

    for x in stripe.columns() {
        for y in 0..out.height() {
            out.set(x, y, convolve_pixel(kernel, working, x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stripefx_core::Stripe;

    fn run(kernel: &Kernel, working: &Raster) -> Raster {
        let mut result = Raster::new(working.width(), working.height());
        {
            let mut views = result.stripes_mut(&[Stripe::full(working.width())]).unwrap();
            convolve(kernel, working, &mut views[0]);
        }
        result
    }

    #[test]
    fn sharpen_keeps_white_center_white() {
        let white = Raster::filled(3, 3, [65535; 4]);
        let out = run(&Kernel::SHARPEN, &white);
        assert_eq!(out.pixel(1, 1), [65535; 4]);
        // borders sum to more than one and saturate
        assert_eq!(out.pixel(0, 0), [65535; 4]);
    }

    #[test]
    fn blur_spreads_single_center_pixel() {
        let mut src = Raster::filled(3, 3, [0, 0, 0, 65535]);
        src.set_pixel(1, 1, [9000, 18000, 27000, 65535]);
        let out = run(&Kernel::BLUR, &src);

        let expected = [1000, 2000, 3000, 65535];
        assert_eq!(out.pixel(1, 1), expected);
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(out.pixel(x, y), expected, "edge neighbour ({x}, {y})");
        }
        // corners still see the center as one of their in-bounds taps
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(out.pixel(x, y), expected, "corner ({x}, {y})");
        }
    }

    #[test]
    fn blur_reproduces_uniform_interior() {
        let src = Raster::filled(6, 5, [12345, 54321, 777, 65535]);
        let out = run(&Kernel::BLUR, &src);
        for x in 1..5 {
            for y in 1..4 {
                assert_eq!(out.pixel(x, y), [12345, 54321, 777, 65535]);
            }
        }
        // a corner only has four of nine taps
        assert_eq!(out.pixel(0, 0), [5487, 24143, 345, 65535]);
    }

    #[test]
    fn edge_detect_zeroes_uniform_interior() {
        let src = Raster::filled(5, 5, [30000, 20000, 10000, 65535]);
        let out = run(&Kernel::EDGE_DETECT, &src);
        for x in 1..4 {
            for y in 1..4 {
                assert_eq!(out.pixel(x, y), [0, 0, 0, 65535]);
            }
        }
        // corner: 8v - 3v = 5v, saturated
        assert_eq!(out.pixel(0, 0), [65535, 65535, 50000, 65535]);
    }

    #[test]
    fn alpha_comes_from_last_in_bounds_tap() {
        let mut src = Raster::new(3, 3);
        for x in 0..3 {
            for y in 0..3 {
                src.set_pixel(x, y, [0, 0, 0, (10 * x + y) as u16 + 1]);
            }
        }
        let out = run(&Kernel::BLUR, &src);
        // interior: tap (x+1, y+1)
        assert_eq!(out.pixel(1, 1)[3], src.pixel(2, 2)[3]);
        assert_eq!(out.pixel(0, 0)[3], src.pixel(1, 1)[3]);
        // bottom-right corner: its own alpha
        assert_eq!(out.pixel(2, 2)[3], src.pixel(2, 2)[3]);
        // top-right: m = 1 (x stays), n = 2 (y + 1)
        assert_eq!(out.pixel(2, 0)[3], src.pixel(2, 1)[3]);
        // bottom-left: m = 2 (x + 1), n = 1 (y stays)
        assert_eq!(out.pixel(0, 2)[3], src.pixel(1, 2)[3]);
    }

    #[test]
    fn negative_sums_clamp_to_zero() {
        let mut src = Raster::filled(3, 3, [1000, 1000, 1000, 65535]);
        src.set_pixel(1, 1, [0, 0, 0, 65535]);
        let out = run(&Kernel::SHARPEN, &src);
        assert_eq!(&out.pixel(1, 1)[..3], &[0, 0, 0]);
    }

    #[test]
    fn single_pixel_raster() {
        let src = Raster::filled(1, 1, [100, 200, 300, 400]);
        assert_eq!(run(&Kernel::SHARPEN, &src).pixel(0, 0), [500, 1000, 1500, 400]);
        assert_eq!(run(&Kernel::EDGE_DETECT, &src).pixel(0, 0), [800, 1600, 2400, 400]);
        assert_eq!(run(&Kernel::BLUR, &src).pixel(0, 0), [11, 22, 33, 400]);
    }

    #[test]
    fn only_the_stripe_is_written() {
        let src = Raster::filled(4, 2, [9, 9, 9, 9]);
        let mut result = Raster::new(4, 2);
        {
            let mut views = result
                .stripes_mut(&[Stripe::new(0, 1), Stripe::new(1, 3), Stripe::new(3, 4)])
                .unwrap();
            convolve(&Kernel::BLUR, &src, &mut views[1]);
        }
        assert_eq!(result.pixel(0, 0), [0; 4]);
        assert_ne!(result.pixel(1, 0), [0; 4]);
        assert_ne!(result.pixel(2, 1), [0; 4]);
        assert_eq!(result.pixel(3, 1), [0; 4]);
    }
}
