//! Critical-path timing analysis: a DAG walk over driver/driven
//! relationships that sums per-cell delays and per-segment conductor
//! delays (§4.4 of SPEC_FULL.md).
//!
//! This crate consumes [`pnr_core`]'s placement/routing/extraction output
//! types rather than producing its own placed-and-routed design, so it
//! lives apart from `pnr_core` itself (see `pnr_core::lib`'s module doc).

#![warn(missing_docs)]

pub mod delay;
pub mod drivers;
pub mod path;
pub mod traversal;

pub use delay::segment_delay;
pub use drivers::DriverDrivenSets;
pub use path::PathDelay;
pub use traversal::{analyze_timing, critical_path};
