//! Column partitioning.
//!
//! [`partition`] splits a width into `workers` stripes of `width / workers`
//! columns and then appends one more stripe holding whatever the integer
//! division left over. The result always has `workers + 1` stripes:
//!
//! ```text
//! partition(10, 3):  [0,3) [3,6) [6,9) [9,10)
//! partition(9, 3):   [0,3) [3,6) [6,9) [9,9)    (remainder stripe empty)
//! partition(2, 4):   [0,0) [0,0) [0,0) [0,0) [0,2)
//! ```
//!
//! The trailing remainder stripe is kept even when empty so the stripe count
//! does not depend on the width. Empty stripes cost one idle unit at dispatch.

use stripefx_core::Stripe;

/// Splits `[0, width)` into `workers + 1` sorted, disjoint stripes.
///
/// A `workers` value of 0 is treated as 1.
///
/// # Example
///
/// ```rust
/// use stripefx_core::Stripe;
/// use stripefx_ops::partition;
///
/// let stripes = partition(10, 3);
/// assert_eq!(stripes.len(), 4);
/// assert_eq!(stripes[3], Stripe::new(9, 10));
/// ```
pub fn partition(width: u32, workers: usize) -> Vec<Stripe> {
    let workers = workers.max(1) as u64;
    let width = u64::from(width);
    let stripe_len = width / workers;

    let mut stripes = Vec::with_capacity(workers as usize + 1);
    for i in 0..workers {
        // i * stripe_len <= width, so both bounds fit in u32
        stripes.push(Stripe::new((i * stripe_len) as u32, ((i + 1) * stripe_len) as u32));
    }
    stripes.push(Stripe::new((workers * stripe_len) as u32, width as u32));
    stripes
}
