//! Double-buffered image session.
//!
//! An [`ImageSession`] owns three rasters of identical bounds:
//!
//! - **source** - the decoded input, never modified
//! - **working** - what the next transform reads
//! - **result** - what the next transform writes
//!
//! A transform fills `result` completely, then [`commit`](ImageSession::commit)
//! moves `result` into `working` and allocates a zeroed `result`. Commit is
//! the only way `working` changes.
//!
//! ```text
//!   initialize:  working = copy(source), result = 0
//!   transform:   working ──read──► kernel ──write──► result
//!   commit:      working ◄── result, result = 0
//! ```

use stripefx_core::Raster;
use tracing::trace;

/// Source, working and result buffers for one image.
#[derive(Debug, Clone)]
pub struct ImageSession {
    source: Raster,
    working: Raster,
    result: Raster,
    commits: usize,
}

impl ImageSession {
    /// Starts a session: `working` is a copy of `source`, `result` is zeroed.
    pub fn initialize(source: Raster) -> Self {
        let (width, height) = source.dimensions();
        Self {
            working: source.clone(),
            result: Raster::new(width, height),
            source,
            commits: 0,
        }
    }

    /// The untouched input raster.
    #[inline]
    pub fn source(&self) -> &Raster {
        &self.source
    }

    /// The raster the next transform reads; after a commit, the latest output.
    #[inline]
    pub fn working(&self) -> &Raster {
        &self.working
    }

    /// `(width, height)` shared by all three buffers.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// Number of transforms committed so far.
    #[inline]
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Replaces `working` with the completed `result` and starts a fresh,
    /// zeroed `result`.
    pub fn commit(&mut self) {
        let (width, height) = self.dimensions();
        self.working = std::mem::replace(&mut self.result, Raster::new(width, height));
        self.commits += 1;
        trace!(commits = self.commits, "commit");
    }

    /// Throws away a partially written `result`, leaving `working` as is.
    pub fn discard(&mut self) {
        self.result.clear();
    }

    /// Consumes the session and returns the last committed raster.
    pub fn into_output(self) -> Raster {
        self.working
    }

    /// Borrows the read side and the write side of the next transform.
    pub(crate) fn buffers(&mut self) -> (&Raster, &mut Raster) {
        (&self.working, &mut self.result)
    }

    #[cfg(test)]
    pub(crate) fn result(&self) -> &Raster {
        &self.result
    }
}
