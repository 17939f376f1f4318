//! Partitioned Sobel pipeline.
//!
//! ## Architecture
//!
//! A filtering pass flows one way:
//!
//! 1. **Plan** ([`partition`]) - split image rows into contiguous bands, one
//!    per worker, remainder rows going to the lowest worker indices
//! 2. **Scatter** ([`halo`]) - copy each band plus one halo row on each side
//!    into a buffer private to that worker
//! 3. **Compute** ([`coordinator::filter_partition`]) - run the stencil over
//!    the band's own rows, reading halo rows as context
//! 4. **Gather** - concatenate the bands' output in worker order
//!
//! Nothing is retained between passes.

pub mod coordinator;
pub mod halo;
pub mod partition;

pub use coordinator::{filter, filter_partition, filter_with, PartitionOutput, Scheduling};
pub use halo::{halo, HaloSlice, HALO_ROWS};
pub use partition::{plan, PartitionPlan, RowRange};
