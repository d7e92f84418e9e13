//! # stripefx-ops
//!
//! The transform engine of stripefx: fixed 3x3 kernels, the convolution and
//! grayscale transforms, the column partitioner and the striped parallel
//! dispatcher, all operating on a double-buffered [`ImageSession`].
//!
//! # Modules
//!
//! - [`kernel`] - Sharpen, edge-detect and blur weight matrices
//! - [`effect`] - The [`Effect`] enum and the [`StripeTransform`] seam
//! - [`convolve`] - 3x3 convolution with skip-out-of-bounds edges
//! - [`grayscale`] - Channel-average grayscale
//! - [`partition`] - Splitting a width into column stripes
//! - [`session`] - Source / working / result buffers and commit
//! - [`dispatch`] - One concurrent unit per stripe, then commit
//! - [`executor`] - Whole effect lists, sequential or striped
//!
//! # Example
//!
//! ```rust
//! use stripefx_core::Raster;
//! use stripefx_ops::{Effect, Executor, ImageSession};
//!
//! let source = Raster::filled(16, 8, [40000, 20000, 10000, 65535]);
//! let mut session = ImageSession::initialize(source);
//!
//! Executor::Parallel { workers: 3 }
//!     .run(&mut session, &[Effect::Blur, Effect::Grayscale])
//!     .unwrap();
//!
//! let out = session.into_output();
//! assert_eq!(out.pixel(8, 4), [23333, 23333, 23333, 65535]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convolve;
pub mod dispatch;
pub mod effect;
pub mod executor;
pub mod grayscale;
pub mod kernel;
pub mod partition;
pub mod session;

pub use dispatch::dispatch_parallel;
pub use effect::{Effect, StripeTransform};
pub use error::{OpsError, OpsResult};
pub use executor::{run_parallel, run_sequential, Executor};
pub use kernel::Kernel;
pub use partition::partition;
pub use session::ImageSession;
