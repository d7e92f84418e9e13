//! 16-bit RGBA raster buffer.
//!
//! [`Raster`] stores one `[u16; 4]` pixel (R, G, B, A) per position. Pixels
//! are laid out **column-major**: all `height` pixels of column 0, then
//! column 1, and so on. A run of whole columns is therefore one contiguous
//! slice, which is what lets [`Raster::stripes_mut`] hand out disjoint
//! mutable views for concurrent writers.
//!
//! ```text
//! index(x, y) = x * height + y
//!
//!         x=0   x=1   x=2
//!   y=0 │  0  │  3  │  6  │
//!   y=1 │  1  │  4  │  7  │
//!   y=2 │  2  │  5  │  8  │
//! ```
//!
//! Codecs speak row-major interleaved samples; use
//! [`Raster::from_rgba16_rows`] and [`Raster::to_rgba16_rows`] at that
//! boundary.

use crate::stripe::validate_partition;
use crate::{Error, Result, Stripe};

/// One RGBA pixel with 16-bit channels.
pub type Rgba16 = [u16; 4];

/// A width x height grid of [`Rgba16`] pixels.
///
/// # Example
///
/// ```rust
/// use stripefx_core::Raster;
///
/// let mut r = Raster::new(2, 3);
/// r.set_pixel(1, 2, [10, 20, 30, 40]);
/// assert_eq!(r.pixel(1, 2), [10, 20, 30, 40]);
/// assert_eq!(r.pixel(0, 0), [0, 0, 0, 0]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<Rgba16>,
}

impl Raster {
    /// Creates a raster with every channel of every pixel set to zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0; 4])
    }

    /// Creates a raster with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba16) -> Self {
        Self {
            width,
            height,
            data: vec![pixel; width as usize * height as usize],
        }
    }

    /// Creates a raster from row-major interleaved RGBA samples, the layout
    /// image codecs produce.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `samples` does not hold
    /// exactly `width * height * 4` values.
    pub fn from_rgba16_rows(width: u32, height: u32, samples: &[u16]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        let (w, h) = (width as usize, height as usize);
        let mut data = Vec::with_capacity(w * h);
        for x in 0..w {
            for y in 0..h {
                let i = (y * w + x) * 4;
                data.push([samples[i], samples[i + 1], samples[i + 2], samples[i + 3]]);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the pixels as row-major interleaved RGBA samples.
    pub fn to_rgba16_rows(&self) -> Vec<u16> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                out.extend_from_slice(&self.data[x * h + y]);
            }
        }
        out
    }

    /// Returns the raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the raster has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The single stripe spanning every column.
    #[inline]
    pub fn full_stripe(&self) -> Stripe {
        Stripe::full(self.width)
    }

    /// Raw column-major pixel data.
    #[inline]
    pub fn data(&self) -> &[Rgba16] {
        &self.data
    }

    /// Returns `true` if `(x, y)` addresses a pixel of this raster.
    ///
    /// Takes signed coordinates so neighbourhood taps can be tested before
    /// they are converted back to indices.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for raster {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        self.data[self.index(x, y)]
    }

    /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba16> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba16) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for raster {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        let i = self.index(x, y);
        self.data[i] = pixel;
    }

    /// Sets the pixel at `(x, y)`, failing instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are out of bounds.
    pub fn try_set_pixel(&mut self, x: u32, y: u32, pixel: Rgba16) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let i = self.index(x, y);
        self.data[i] = pixel;
        Ok(())
    }

    /// Resets every channel of every pixel to zero.
    pub fn clear(&mut self) {
        self.data.fill([0; 4]);
    }

    /// Splits the raster into one mutable view per stripe.
    ///
    /// The views borrow non-overlapping column runs, so they can be sent to
    /// different threads and written concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPartition`] unless `stripes` partition
    /// `[0, width)` (see [`validate_partition`]).
    ///
    /// # Example
    ///
    /// ```rust
    /// use stripefx_core::{Raster, Stripe};
    ///
    /// let mut r = Raster::new(4, 2);
    /// let stripes = [Stripe::new(0, 1), Stripe::new(1, 4)];
    /// for mut view in r.stripes_mut(&stripes).unwrap() {
    ///     let s = view.stripe();
    ///     for x in s.columns() {
    ///         view.set(x, 0, [x as u16, 0, 0, 1]);
    ///     }
    /// }
    /// assert_eq!(r.pixel(3, 0), [3, 0, 0, 1]);
    /// ```
    pub fn stripes_mut(&mut self, stripes: &[Stripe]) -> Result<Vec<StripeMut<'_>>> {
        validate_partition(stripes, self.width)?;

        let height = self.height;
        let column_len = height as usize;
        let mut rest: &mut [Rgba16] = &mut self.data;
        let mut views = Vec::with_capacity(stripes.len());
        for &stripe in stripes {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(stripe.len() as usize * column_len);
            views.push(StripeMut {
                stripe,
                height,
                data: head,
            });
            rest = tail;
        }
        Ok(views)
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl std::fmt::Debug for StripeMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeMut")
            .field("stripe", &self.stripe)
            .field("height", &self.height)
            .finish()
    }
}

/// Mutable view over the columns of one [`Stripe`] of a [`Raster`].
///
/// Created by [`Raster::stripes_mut`]. Coordinates passed to [`set`](Self::set)
/// are raster coordinates, not stripe-local ones.
pub struct StripeMut<'a> {
    stripe: Stripe,
    height: u32,
    data: &'a mut [Rgba16],
}

impl StripeMut<'_> {
    /// The column range this view covers.
    #[inline]
    pub fn stripe(&self) -> Stripe {
        self.stripe
    }

    /// Height of every column in the view.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Writes the pixel at raster coordinates `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is outside the stripe or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba16) {
        assert!(
            self.stripe.contains(x) && y < self.height,
            "pixel ({}, {}) outside stripe {} of height {}",
            x,
            y,
            self.stripe,
            self.height
        );
        let i = (x - self.stripe.start) as usize * self.height as usize + y as usize;
        self.data[i] = pixel;
    }
}
