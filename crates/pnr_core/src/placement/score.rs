//! The placer's composite cost function: wire length + overlap + out of
//! bounds (§4.1 of SPEC_FULL.md).

use crate::geometry::pin_coord;
use crate::placement::types::Placement;
use pnr_library::{Dims, PregeneratedCells};
use std::collections::HashMap;

/// The three components of a placement's cost, kept separate for testing
/// and diagnostics even though [`Score::total`] is what the annealer
/// actually optimizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Score {
    /// Sum, across every net, of the bounding-box half-perimeter over all
    /// that net's pin coordinates.
    pub wire_length: f64,
    /// Sum over every occupied voxel of `max(0, occupant_count - 1)`.
    pub overlap: f64,
    /// Sum of occupancy counts at coordinates outside `dimensions`.
    pub oob: f64,
}

impl Score {
    /// The composite cost the annealer minimizes.
    pub fn total(&self) -> f64 {
        self.wire_length + self.overlap + self.oob
    }
}

/// Computes the placer's composite cost for a set of placements.
///
/// `cells` resolves each placement's name/turns to the template geometry
/// (pin coordinates, masked voxels) the three cost components are built
/// from.
pub fn score(placements: &[Placement], dims: Dims, cells: &PregeneratedCells) -> Score {
    Score {
        wire_length: wire_length(placements, cells),
        overlap: overlap(placements, dims, cells),
        oob: out_of_bounds(placements, dims, cells),
    }
}

/// Sums, across every distinct net named in any placement's `pins` map, the
/// half-perimeter of the bounding box over that net's pin coordinates.
fn wire_length(placements: &[Placement], cells: &PregeneratedCells) -> f64 {
    let mut nets: HashMap<&str, Vec<(i64, i64, i64)>> = HashMap::new();
    for placement in placements {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for (port, net) in &placement.pins {
            if let Some(coord) = pin_coord(template, placement.anchor, port) {
                nets.entry(net.as_str()).or_default().push(coord);
            }
        }
    }

    nets.values()
        .map(|coords| {
            let (mut ymin, mut zmin, mut xmin) = (i64::MAX, i64::MAX, i64::MAX);
            let (mut ymax, mut zmax, mut xmax) = (i64::MIN, i64::MIN, i64::MIN);
            for &(y, z, x) in coords {
                ymin = ymin.min(y);
                zmin = zmin.min(z);
                xmin = xmin.min(x);
                ymax = ymax.max(y);
                zmax = zmax.max(z);
                xmax = xmax.max(x);
            }
            ((ymax - ymin) + (zmax - zmin) + (xmax - xmin)) as f64
        })
        .sum()
}

/// Builds the occupancy count at every masked voxel of every placed cell,
/// in global coordinates, accounting for rotation via the template already
/// resolved for the placement's `turns`.
fn occupancy(placements: &[Placement], cells: &PregeneratedCells) -> HashMap<(i64, i64, i64), u32> {
    let mut occ = HashMap::new();
    for placement in placements {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for ((y, z, x), &masked) in template.mask.iter() {
            if !masked {
                continue;
            }
            let global = (
                placement.anchor.0 + y as i64,
                placement.anchor.1 + z as i64,
                placement.anchor.2 + x as i64,
            );
            *occ.entry(global).or_insert(0) += 1;
        }
    }
    occ
}

/// Counts overlapping voxels, excluding the top and bottom Y layer of
/// `dimensions` — the floor/ceiling support layer every cell's body rests
/// against and is expected to share, so it is not counted as a collision.
fn overlap(placements: &[Placement], dims: Dims, cells: &PregeneratedCells) -> f64 {
    let top = dims.height.saturating_sub(1) as i64;
    occupancy(placements, cells)
        .into_iter()
        .filter(|&((y, _, _), _)| y > 0 && y < top)
        .map(|(_, count)| count.saturating_sub(1) as f64)
        .sum()
}

/// Sums occupancy at every voxel lying outside `dimensions`, one unit per
/// out-of-bounds voxel regardless of whether other cells also occupy it —
/// this is what makes the "moving a cell off-grid by k voxels increases
/// OOB by exactly k" testable property hold.
fn out_of_bounds(placements: &[Placement], dims: Dims, cells: &PregeneratedCells) -> f64 {
    occupancy(placements, cells)
        .into_iter()
        .filter(|&((y, z, x), _)| !dims.contains(y, z, x))
        .map(|(_, count)| count as f64)
        .sum()
}
