//! Column stripes.
//!
//! A [`Stripe`] is a half-open column range `[start, end)`. A list of stripes
//! is a *partition* of a raster width when the stripes are sorted, touch
//! end-to-start with no gap or overlap, start at column 0 and end at the
//! width. Empty stripes are allowed anywhere in a partition.
//!
//! ```text
//!   0        4        8      10
//!   ├────────┼────────┼──────┤
//!   │ [0,4)  │ [4,8)  │[8,10)│
//! ```

use std::ops::Range;

use crate::{Error, Result};

/// A half-open range of columns `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Stripe {
    /// First column (inclusive)
    pub start: u32,
    /// One past the last column (exclusive)
    pub end: u32,
}

impl Stripe {
    /// Creates a stripe covering `[start, end)`.
    ///
    /// `end` is raised to `start` when given a smaller value, so the result
    /// is an empty stripe rather than an inverted one.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Creates the single stripe covering a whole raster of `width` columns.
    #[inline]
    pub const fn full(width: u32) -> Self {
        Self::new(0, width)
    }

    /// Number of columns in the stripe.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if the stripe has no columns.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if column `x` lies in the stripe.
    #[inline]
    pub const fn contains(&self, x: u32) -> bool {
        x >= self.start && x < self.end
    }

    /// Returns `true` if the two stripes share at least one column.
    #[inline]
    pub fn overlaps(&self, other: &Stripe) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// The stripe as a column range.
    #[inline]
    pub fn columns(&self) -> Range<u32> {
        self.start..self.end
    }
}

impl std::fmt::Display for Stripe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Checks that `stripes` is a partition of `[0, width)`.
///
/// # Errors
///
/// Returns [`Error::InvalidPartition`] if the stripes leave a gap, overlap,
/// are out of order, or do not end exactly at `width`.
///
/// # Example
///
/// ```rust
/// use stripefx_core::{validate_partition, Stripe};
///
/// let ok = [Stripe::new(0, 3), Stripe::new(3, 3), Stripe::new(3, 5)];
/// assert!(validate_partition(&ok, 5).is_ok());
///
/// let gap = [Stripe::new(0, 2), Stripe::new(3, 5)];
/// assert!(validate_partition(&gap, 5).is_err());
/// ```
pub fn validate_partition(stripes: &[Stripe], width: u32) -> Result<()> {
    let mut cursor = 0u32;
    for (i, stripe) in stripes.iter().enumerate() {
        if stripe.start != cursor {
            return Err(Error::invalid_partition(
                width,
                format!("stripe {} {} should start at column {}", i, stripe, cursor),
            ));
        }
        if stripe.end < stripe.start {
            return Err(Error::invalid_partition(
                width,
                format!("stripe {} ends at {} before its start {}", i, stripe.end, stripe.start),
            ));
        }
        cursor = stripe.end;
    }
    if cursor != width {
        return Err(Error::invalid_partition(
            width,
            format!("stripes end at column {}", cursor),
        ));
    }
    Ok(())
}
