//! Fixed 3x3 convolution kernels.
//!
//! Weights are indexed `weights[m][n]` where `m` walks the horizontal tap
//! offset `-1..=1` and `n` the vertical one, so the pixel under transform
//! sits at `[1][1]`.
//!
//! | Kernel | Weights | Sum |
//! |--------|---------|-----|
//! | [`Kernel::SHARPEN`] | 4-neighbour Laplacian added to identity | 1 |
//! | [`Kernel::EDGE_DETECT`] | 8-neighbour Laplacian | 0 |
//! | [`Kernel::BLUR`] | 3x3 box average | 1 |

const NINTH: f64 = 1.0 / 9.0;

/// A 3x3 matrix of convolution weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    /// Weights indexed `[m][n]`, `m` horizontal, `n` vertical.
    pub weights: [[f64; 3]; 3],
}

impl Kernel {
    /// Sharpening kernel.
    ///
    /// ```text
    ///  0 -1  0
    /// -1  5 -1
    ///  0 -1  0
    /// ```
    pub const SHARPEN: Kernel = Kernel {
        weights: [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
    };

    /// Edge detection kernel.
    ///
    /// ```text
    /// -1 -1 -1
    /// -1  8 -1
    /// -1 -1 -1
    /// ```
    pub const EDGE_DETECT: Kernel = Kernel {
        weights: [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]],
    };

    /// Box blur kernel, every weight `1/9`.
    pub const BLUR: Kernel = Kernel {
        weights: [[NINTH; 3]; 3],
    };

    /// Weight applied to the tap at offset `(m - 1, n - 1)`.
    #[inline]
    pub fn weight(&self, m: usize, n: usize) -> f64 {
        self.weights[m][n]
    }

    /// Sum of all nine weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }
}
