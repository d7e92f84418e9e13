//! Striped parallel dispatch.
//!
//! [`dispatch_parallel`] runs one unit of work per stripe on the rayon pool.
//! Each unit owns a disjoint mutable view of the result raster (see
//! [`Raster::stripes_mut`](stripefx_core::Raster::stripes_mut)) and reads
//! only the shared working raster, so the units need no locking.
//!
//! The call returns once every unit has finished. If all succeeded the
//! session is committed exactly once; if any unit panicked the partial result
//! is discarded, nothing is committed and [`OpsError::WorkerFailed`] is
//! returned.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use stripefx_core::{Raster, Stripe, StripeMut};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::effect::StripeTransform;
use crate::session::ImageSession;
use crate::{OpsError, OpsResult};

/// Applies `transform` to every stripe concurrently, then commits.
///
/// # Errors
///
/// - [`OpsError::Raster`] if `stripes` is not a partition of the session
///   width; nothing is run.
/// - [`OpsError::WorkerFailed`] if a unit panicked; the session keeps its
///   previous working raster.
///
/// # Example
///
/// ```rust
/// use stripefx_core::Raster;
/// use stripefx_ops::{dispatch_parallel, partition, Effect, ImageSession};
///
/// let mut session = ImageSession::initialize(Raster::filled(10, 4, [3, 6, 9, 1]));
/// dispatch_parallel(&mut session, &Effect::Grayscale, &partition(10, 3)).unwrap();
/// assert_eq!(session.working().pixel(9, 3), [6, 6, 6, 1]);
/// assert_eq!(session.commits(), 1);
/// ```
pub fn dispatch_parallel<T>(
    session: &mut ImageSession,
    transform: &T,
    stripes: &[Stripe],
) -> OpsResult<()>
where
    T: StripeTransform + ?Sized,
{
    trace!(transform = transform.name(), stripes = stripes.len(), "dispatch_parallel");

    let outcome = {
        let (working, result) = session.buffers();
        let units = result.stripes_mut(stripes)?;
        units
            .into_par_iter()
            .with_max_len(1)
            .try_for_each(|mut unit| run_unit(transform, working, &mut unit))
    };

    match outcome {
        Ok(()) => {
            session.commit();
            Ok(())
        }
        Err(e) => {
            session.discard();
            Err(e)
        }
    }
}

/// Runs one stripe, turning a panic into [`OpsError::WorkerFailed`].
fn run_unit<T>(transform: &T, working: &Raster, unit: &mut StripeMut<'_>) -> OpsResult<()>
where
    T: StripeTransform + ?Sized,
{
    let stripe = unit.stripe();
    panic::catch_unwind(AssertUnwindSafe(|| transform.apply_stripe(working, unit))).map_err(
        |payload| OpsError::WorkerFailed {
            stripe,
            reason: panic_message(payload.as_ref()),
        },
    )?;
    debug!(transform = transform.name(), %stripe, "stripe done");
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
