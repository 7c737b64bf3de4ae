//! Reporter implementations.
//!
//! - [`CondensedReporter`] - hides skipped results, compresses task/host
//!   output, erases banners of tasks that printed nothing
//! - [`NullReporter`] - the silent baseline

mod condensed;
mod null;

pub use condensed::{CondensedConfig, CondensedReporter};
pub use null::NullReporter;
