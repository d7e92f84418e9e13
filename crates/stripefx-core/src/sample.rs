//! 16-bit sample arithmetic.
//!
//! Filters accumulate channel values in `f64` and convert back through
//! [`clamp_sample`], which rounds to the nearest integer and saturates to the
//! `[0, 65535]` range.

/// Largest value a 16-bit channel sample can hold.
pub const MAX_SAMPLE: u16 = u16::MAX;

/// Converts an accumulated channel value to a 16-bit sample.
///
/// Values below zero map to 0, values above 65535 map to 65535, everything
/// else is rounded to the nearest integer. NaN maps to 0.
///
/// # Example
///
/// ```rust
/// use stripefx_core::clamp_sample;
///
/// assert_eq!(clamp_sample(-12.0), 0);
/// assert_eq!(clamp_sample(70000.0), 65535);
/// assert_eq!(clamp_sample(1234.6), 1235);
/// ```
#[inline]
pub fn clamp_sample(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_SAMPLE)) as u16
}
