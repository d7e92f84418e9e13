//! Applying a whole effect list to a session.
//!
//! - [`run_sequential`] applies each effect to the full width on the calling
//!   thread.
//! - [`run_parallel`] partitions the width once and sends each effect
//!   through [`dispatch_parallel`].
//!
//! Both commit after every effect, so effect `i + 1` always reads the output
//! of effect `i`, and both produce identical rasters for any worker count.

use tracing::{debug, trace};

use crate::dispatch::dispatch_parallel;
use crate::effect::{Effect, StripeTransform};
use crate::partition::partition;
use crate::session::ImageSession;
use crate::OpsResult;

/// How a job's effect list is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Executor {
    /// One full-width pass per effect on the calling thread.
    Sequential,
    /// `workers + 1` concurrent stripes per effect (see [`partition`]).
    Parallel {
        /// Partitioning parameter, not a thread count.
        workers: usize,
    },
}

impl Executor {
    /// Sequential for `None`, parallel otherwise.
    pub fn from_workers(workers: Option<usize>) -> Self {
        match workers {
            Some(workers) => Executor::Parallel { workers },
            None => Executor::Sequential,
        }
    }

    /// Applies `effects` in order.
    pub fn run(&self, session: &mut ImageSession, effects: &[Effect]) -> OpsResult<()> {
        match *self {
            Executor::Sequential => run_sequential(session, effects),
            Executor::Parallel { workers } => run_parallel(session, effects, workers),
        }
    }
}

/// Applies `effects` in order, each over the whole raster, without threads.
pub fn run_sequential(session: &mut ImageSession, effects: &[Effect]) -> OpsResult<()> {
    trace!(effects = effects.len(), "run_sequential");
    for effect in effects {
        apply_full_width(session, effect)?;
        debug!(%effect, commits = session.commits(), "effect applied");
    }
    Ok(())
}

/// Applies `effects` in order, each split into `partition(width, workers)`.
pub fn run_parallel(session: &mut ImageSession, effects: &[Effect], workers: usize) -> OpsResult<()> {
    let (width, _) = session.dimensions();
    let stripes = partition(width, workers);
    trace!(effects = effects.len(), workers, stripes = stripes.len(), "run_parallel");

    for effect in effects {
        dispatch_parallel(session, effect, &stripes)?;
        debug!(%effect, commits = session.commits(), "effect applied");
    }
    Ok(())
}

fn apply_full_width<T>(session: &mut ImageSession, transform: &T) -> OpsResult<()>
where
    T: StripeTransform + ?Sized,
{
    {
        let (working, result) = session.buffers();
        let full = working.full_stripe();
        let mut views = result.stripes_mut(&[full])?;
        for view in &mut views {
            transform.apply_stripe(working, view);
        }
    }
    session.commit();
    Ok(())
}
