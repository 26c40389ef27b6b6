//! The proximity-violation model and placed-cell occupancy, shared by
//! scoring and the maze router (§4.2).

use crate::placement::Placement;
use crate::router::types::Coord;
use pnr_library::PregeneratedCells;
use std::collections::HashSet;

/// Computes the proximity region a routed polyline forbids other nets from
/// entering.
///
/// Per §4.2: the union, over each *non-pin* step of the polyline (every
/// coordinate except the first and last, which are the route's own pins),
/// of `{(y+dy, z±1, x), (y+dy, z, x±1)}` for `dy ∈ {0, −1}` — the conductor
/// block and the supporting block beneath it. Coordinates the polyline
/// itself occupies, and the support block beneath every one of its steps,
/// are subtracted, so a net never violates against itself.
pub fn compute_violation(net: &[Coord]) -> HashSet<Coord> {
    let mut violation = HashSet::new();
    if net.len() <= 2 {
        return violation;
    }
    let mut self_occupied: HashSet<Coord> = net.iter().copied().collect();
    for &(y, z, x) in net {
        self_occupied.insert((y - 1, z, x));
    }
    for &(y, z, x) in &net[1..net.len() - 1] {
        for dy in [0, -1] {
            violation.insert((y + dy, z - 1, x));
            violation.insert((y + dy, z + 1, x));
            violation.insert((y + dy, z, x - 1));
            violation.insert((y + dy, z, x + 1));
        }
    }
    violation.retain(|c| !self_occupied.contains(c));
    violation
}

/// Every masked voxel of every placed cell, in global coordinates — the
/// placed-layout half of the usage matrix (§4.2's "Usage matrix").
pub fn placement_occupancy(placements: &[Placement], cells: &PregeneratedCells) -> HashSet<Coord> {
    let mut occupied = HashSet::new();
    for placement in placements {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for ((y, z, x), masked) in template.mask.iter() {
            if *masked {
                occupied.insert((
                    placement.anchor.0 + y as i64,
                    placement.anchor.1 + z as i64,
                    placement.anchor.2 + x as i64,
                ));
            }
        }
    }
    occupied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_empty_for_two_point_net() {
        let net = vec![(0, 0, 0), (0, 0, 1)];
        assert!(compute_violation(&net).is_empty());
    }

    #[test]
    fn violation_surrounds_interior_step() {
        let net = vec![(0, 0, 0), (0, 1, 0), (0, 2, 0)];
        let violation = compute_violation(&net);
        assert!(violation.contains(&(0, 1, 1)));
        assert!(violation.contains(&(0, 1, -1)));
        assert!(violation.contains(&(-1, 1, 1)));
        assert!(!violation.contains(&(0, 0, 0)));
        assert!(!violation.contains(&(0, 1, 0)));
    }

    #[test]
    fn violation_excludes_self_wire() {
        // A zigzag where a neighbor of an interior step is itself on the
        // polyline: that coordinate must not appear in the violation set.
        let net = vec![(0, 0, 0), (0, 1, 0), (0, 1, 1), (0, 1, 2)];
        let violation = compute_violation(&net);
        for coord in &net {
            assert!(!violation.contains(coord));
        }
    }
}
