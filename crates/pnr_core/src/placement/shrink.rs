//! Tightens a placement's bounding box to the occupied voxels after
//! annealing settles (§4.1 of SPEC_FULL.md).

use crate::placement::types::Placement;
use pnr_library::{Dims, PregeneratedCells};

/// Translates every placement's anchor so the minimum occupied voxel across
/// the whole set sits at the origin, and returns the new tight `Dims`.
///
/// Operates on masked voxels (the same set [`crate::placement::score`]
/// scores overlap against) rather than raw anchors, so a cell whose anchor
/// is off to one side of its own footprint doesn't leave slack in the
/// result.
pub fn shrink(placements: &mut [Placement], cells: &PregeneratedCells) -> Dims {
    if placements.is_empty() {
        return Dims::new(1, 1, 1);
    }

    let (mut ymin, mut zmin, mut xmin) = (i64::MAX, i64::MAX, i64::MAX);
    let (mut ymax, mut zmax, mut xmax) = (i64::MIN, i64::MIN, i64::MIN);

    for placement in placements.iter() {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for ((y, z, x), &masked) in template.mask.iter() {
            if !masked {
                continue;
            }
            let gy = placement.anchor.0 + y as i64;
            let gz = placement.anchor.1 + z as i64;
            let gx = placement.anchor.2 + x as i64;
            ymin = ymin.min(gy);
            zmin = zmin.min(gz);
            xmin = xmin.min(gx);
            ymax = ymax.max(gy);
            zmax = zmax.max(gz);
            xmax = xmax.max(gx);
        }
    }

    if ymin > ymax {
        // No masked voxels at all (every template was unresolvable).
        return Dims::new(1, 1, 1);
    }

    for placement in placements.iter_mut() {
        placement.anchor.0 -= ymin;
        placement.anchor.1 -= zmin;
        placement.anchor.2 -= xmin;
    }

    Dims::new(
        (ymax - ymin + 1) as u32,
        (zmax - zmin + 1) as u32,
        (xmax - xmin + 1) as u32,
    )
}
