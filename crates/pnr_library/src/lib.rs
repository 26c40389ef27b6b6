//! Cell library data model: block IDs, 3D cell templates, rotation, and the
//! structured library document loader.
//!
//! This crate owns the `CellTemplate` data model (§3 of SPEC_FULL.md), the
//! rotation machinery that produces a template's four yaw orientations
//! (§3's `PregeneratedCells`), and the cell-library file loader (§6.1). The
//! placer, router, extractor, and timing engines all build on top of the
//! types defined here.

#![warn(missing_docs)]

pub mod blocks;
pub mod grid;
pub mod library;
pub mod pregenerated;
pub mod rotate;
pub mod template;

pub use grid::{Dims, Grid3};
pub use library::{load_library, Library};
pub use pregenerated::PregeneratedCells;
pub use rotate::rotate_template;
pub use template::{CellTemplate, Delay, Facing, PinDirection, Port};
