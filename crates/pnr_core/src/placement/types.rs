//! The placer's core data type: a cell's concrete 3D anchor and orientation.

use std::collections::HashMap;

/// A concrete instance of a cell at a 3D anchor, with a yaw rotation and a
/// pin-to-net map (§3 of SPEC_FULL.md).
///
/// `anchor` may lie outside the working [`pnr_library::Dims`] bounding box
/// while the annealer is exploring moves — that's penalized by
/// [`crate::placement::score::score`], not rejected outright — and is only
/// guaranteed non-negative after [`crate::placement::shrink::shrink`] runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// The name of the [`pnr_library::CellTemplate`] this instance realizes.
    pub name: String,
    /// The cell's anchor, in `(y, z, x)` order. May be negative or otherwise
    /// out of bounds mid-anneal.
    pub anchor: (i64, i64, i64),
    /// The cell's yaw rotation, one of `0..=3` quarter-turns.
    pub turns: u32,
    /// Maps this instance's port names to the net names they connect to.
    pub pins: HashMap<String, String>,
}

impl Placement {
    /// Creates a new placement at `anchor` with `turns` rotation.
    pub fn new(
        name: impl Into<String>,
        anchor: (i64, i64, i64),
        turns: u32,
        pins: HashMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            anchor,
            turns: turns % 4,
            pins,
        }
    }
}
