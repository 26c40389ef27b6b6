//! Simulated-annealing cell placement (§4.1 of SPEC_FULL.md).
//!
//! `types` holds the core [`types::Placement`] record; `grid_placer` builds
//! the initial square-grid layout and appends primary I/O pins; `score`
//! computes the composite wire-length/overlap/OOB cost; `anneal` runs the
//! Metropolis annealing loop; `shrink` tightens the bounding box once
//! annealing settles; `layout` paints the result into a dense voxel grid.

pub mod anneal;
pub mod grid_placer;
pub mod layout;
pub mod score;
pub mod shrink;
pub mod types;

pub use anneal::{simulated_annealing_placement, BaseDisplaceProfile, DisplaceProfile, GridDisplaceProfile};
pub use grid_placer::{initial_placement, place_pins, compute_max_cell_dimension, DEFAULT_GRID_SPACING};
pub use layout::{placement_to_layout, Layout};
pub use score::{score, Score};
pub use shrink::shrink;
pub use types::Placement;
