//! Effects and the stripe transform seam.
//!
//! [`Effect`] is the closed set of filters a job can request. Every effect
//! implements [`StripeTransform`], the unit of work the dispatcher hands to
//! each concurrent worker: read the whole working raster, write one stripe of
//! the result.

use std::fmt;
use std::str::FromStr;

use stripefx_core::{Raster, StripeMut};

use crate::kernel::Kernel;
use crate::{convolve, grayscale, OpsError};

/// A transform that fills one stripe of the result from the working raster.
///
/// Implementations must only write through `out` and must produce the same
/// pixel for a position regardless of which stripe contains it.
pub trait StripeTransform: Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Writes every pixel of `out`'s stripe, over the full height.
    fn apply_stripe(&self, working: &Raster, out: &mut StripeMut<'_>);
}

/// One image filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Channel average, code `G`.
    Grayscale,
    /// [`Kernel::SHARPEN`], code `S`.
    Sharpen,
    /// [`Kernel::EDGE_DETECT`], code `E`.
    EdgeDetect,
    /// [`Kernel::BLUR`], code `B`.
    Blur,
}

impl Effect {
    /// Every effect, in code order `G`, `S`, `E`, `B`.
    pub const ALL: [Effect; 4] = [
        Effect::Grayscale,
        Effect::Sharpen,
        Effect::EdgeDetect,
        Effect::Blur,
    ];

    /// The kernel for convolution effects, `None` for grayscale.
    pub fn kernel(&self) -> Option<&'static Kernel> {
        match self {
            Effect::Grayscale => None,
            Effect::Sharpen => Some(&Kernel::SHARPEN),
            Effect::EdgeDetect => Some(&Kernel::EDGE_DETECT),
            Effect::Blur => Some(&Kernel::BLUR),
        }
    }

    /// The single-character job stream code.
    pub fn code(&self) -> &'static str {
        match self {
            Effect::Grayscale => "G",
            Effect::Sharpen => "S",
            Effect::EdgeDetect => "E",
            Effect::Blur => "B",
        }
    }
}

impl FromStr for Effect {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" => Ok(Effect::Grayscale),
            "S" => Ok(Effect::Sharpen),
            "E" => Ok(Effect::EdgeDetect),
            "B" => Ok(Effect::Blur),
            other => Err(OpsError::UnknownEffect(other.to_string())),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl StripeTransform for Effect {
    fn name(&self) -> &str {
        match self {
            Effect::Grayscale => "grayscale",
            Effect::Sharpen => "sharpen",
            Effect::EdgeDetect => "edge-detect",
            Effect::Blur => "blur",
        }
    }

    fn apply_stripe(&self, working: &Raster, out: &mut StripeMut<'_>) {
        match self.kernel() {
            Some(kernel) => convolve::convolve(kernel, working, out),
            None => grayscale::grayscale(working, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for effect in Effect::ALL {
            assert_eq!(effect.code().parse::<Effect>().unwrap(), effect);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        for code in ["", "X", "s", "GS", " G"] {
            let err = code.parse::<Effect>().unwrap_err();
            assert!(matches!(err, OpsError::UnknownEffect(ref c) if c == code));
        }
    }

    #[test]
    fn only_grayscale_has_no_kernel() {
        assert!(Effect::Grayscale.kernel().is_none());
        assert_eq!(Effect::Blur.kernel(), Some(&Kernel::BLUR));
        assert_eq!(Effect::Sharpen.kernel(), Some(&Kernel::SHARPEN));
        assert_eq!(Effect::EdgeDetect.kernel(), Some(&Kernel::EDGE_DETECT));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Effect::EdgeDetect.to_string(), "edge-detect");
    }
}
