//! Error types for transform operations.

use stripefx_core::Stripe;
use thiserror::Error;

/// Error type for transform operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Raster or partition check failed.
    #[error(transparent)]
    Raster(#[from] stripefx_core::Error),

    /// An effect code outside `G`, `S`, `E`, `B`.
    #[error("unknown effect code: {0:?}")]
    UnknownEffect(String),

    /// A stripe unit panicked; the transform was abandoned without commit.
    #[error("worker for stripe {stripe} failed: {reason}")]
    WorkerFailed {
        /// The stripe the failed unit was processing
        stripe: Stripe,
        /// Panic message of the unit
        reason: String,
    },
}

/// Result type for transform operations.
pub type OpsResult<T> = Result<T, OpsError>;
