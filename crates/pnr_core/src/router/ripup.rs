//! The rip-up-and-reroute loop (§4.2).

use crate::router::maze::{maze_route, MazeGrids};
use crate::router::score::{normalize, segment_score};
use crate::router::types::{Coord, Segment};
use crate::router::violation::compute_violation;
use rand::Rng;
use std::collections::HashSet;

/// Linear-rescale margin used by [`normalize`](crate::router::score::normalize).
pub const NORM_MARGIN: f64 = 0.1;

/// Rebuilds `segment`'s `net`/`wire`/`violation` from a freshly computed
/// polyline.
fn apply_route(segment: &mut Segment, path: Vec<Coord>) {
    segment.violation = compute_violation(&path);
    segment.wire = path.iter().copied().collect();
    segment.net = path;
}

fn manhattan(a: Coord, b: Coord) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs() + (a.2 - b.2).abs()
}

/// Every coordinate any segment other than `skip` currently occupies,
/// unioned with the placed-layout occupancy (§4.2's "Usage matrix").
fn usage_excluding(segments: &[Segment], skip: usize, base_occupancy: &HashSet<Coord>) -> HashSet<Coord> {
    let mut usage = base_occupancy.clone();
    for (idx, seg) in segments.iter().enumerate() {
        if idx != skip {
            usage.extend(seg.wire.iter().copied());
        }
    }
    usage
}

/// Counts how many of `segment`'s wire voxels collide with `usage` (a
/// direct occupancy clash) or fall inside any other segment's violation
/// zone (a proximity clash), excluding the segment's own two pin cells.
fn count_violations(segment: &Segment, usage: &HashSet<Coord>, foreign_violations: &HashSet<Coord>) -> usize {
    let a = segment.driver().route_coord;
    let b = segment.driven().route_coord;
    segment
        .wire
        .iter()
        .filter(|&&c| c != a && c != b)
        .filter(|c| usage.contains(c) || foreign_violations.contains(c))
        .count()
}

/// Runs the rip-up-and-reroute loop over every segment across every net,
/// in place, until zero violations remain, `max_iterations` is exhausted,
/// or `cancel` fires.
///
/// `base_occupancy` is the placed layout's occupied voxels
/// ([`crate::router::violation::placement_occupancy`]); `dims` bounds the
/// maze search.
pub fn rip_up_and_reroute(
    segments: &mut [Segment],
    base_occupancy: &HashSet<Coord>,
    grids: &mut MazeGrids,
    rng: &mut impl Rng,
    max_iterations: u32,
    cancel: &crate::cancel::CancelToken,
) -> usize {
    if segments.is_empty() {
        return 0;
    }

    for _ in 0..max_iterations {
        if cancel.is_cancelled() {
            break;
        }

        let foreign_violation_union: HashSet<Coord> = segments
            .iter()
            .flat_map(|s| s.violation.iter().copied())
            .collect();

        let violation_counts: Vec<usize> = segments
            .iter()
            .enumerate()
            .map(|(idx, seg)| {
                let usage = usage_excluding(segments, idx, base_occupancy);
                count_violations(seg, &usage, &foreign_violation_union)
            })
            .collect();

        let total_violations: usize = violation_counts.iter().sum();
        if total_violations == 0 {
            return 0;
        }

        let scores: Vec<f64> = segments
            .iter()
            .zip(&violation_counts)
            .map(|(seg, &violations)| {
                let a = seg.driver().route_coord;
                let b = seg.driven().route_coord;
                segment_score(violations, 0, seg.net.len(), manhattan(a, b))
            })
            .collect();
        let normalized = normalize(&scores, NORM_MARGIN);

        let mut ripped: Vec<usize> = (0..segments.len())
            .filter(|&idx| rng.gen::<f64>() < normalized[idx])
            .collect();
        if ripped.is_empty() {
            // Normalization guarantees at least the worst segment is close
            // to 1.0, but a low-probability draw can still skip everyone;
            // force the single worst offender so the loop always makes
            // progress.
            ripped.push(
                normalized
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(idx, _)| idx)
                    .unwrap(),
            );
        }
        ripped.sort_by(|&a, &b| normalized[b].total_cmp(&normalized[a]));

        for idx in ripped {
            if cancel.is_cancelled() {
                return violation_counts.iter().sum();
            }
            let mut penalty = usage_excluding(segments, idx, base_occupancy);
            penalty.extend(foreign_violation_union.iter().copied());
            let a = segments[idx].driver().route_coord;
            let b = segments[idx].driven().route_coord;
            match maze_route(a, b, &penalty, grids) {
                Some(path) => apply_route(&mut segments[idx], path),
                None => continue,
            }
        }
    }

    let foreign_violation_union: HashSet<Coord> = segments
        .iter()
        .flat_map(|s| s.violation.iter().copied())
        .collect();
    segments
        .iter()
        .enumerate()
        .map(|(idx, seg)| {
            let usage = usage_excluding(segments, idx, base_occupancy);
            count_violations(seg, &usage, &foreign_violation_union)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::types::ExtendedPin;
    use pnr_library::Dims;
    use rand::SeedableRng;

    fn pin(cell_index: usize, coord: Coord, is_output: bool) -> ExtendedPin {
        ExtendedPin {
            cell_index,
            port: "Y".to_string(),
            pin_coord: coord,
            route_coord: coord,
            is_output,
        }
    }

    fn segment(a: Coord, b: Coord) -> Segment {
        let net = vec![a, b];
        Segment {
            pins: [pin(0, a, true), pin(1, b, false)],
            wire: net.iter().copied().collect(),
            violation: compute_violation(&net),
            net,
        }
    }

    #[test]
    fn no_segments_is_immediately_clean() {
        let mut segments = Vec::new();
        let mut grids = MazeGrids::new(Dims::new(1, 10, 10));
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let cancel = crate::cancel::CancelToken::new();
        let remaining = rip_up_and_reroute(&mut segments, &HashSet::new(), &mut grids, &mut rng, 10, &cancel);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn non_colliding_segment_needs_no_rerouting() {
        let mut segments = vec![segment((0, 0, 0), (0, 0, 5))];
        let mut grids = MazeGrids::new(Dims::new(1, 10, 10));
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let cancel = crate::cancel::CancelToken::new();
        let remaining = rip_up_and_reroute(&mut segments, &HashSet::new(), &mut grids, &mut rng, 10, &cancel);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn colliding_segments_converge_to_zero_violations() {
        // Two nets whose dumb routes overlap exactly; the loop must reroute
        // one of them out of the way given enough room.
        let mut segments = vec![
            segment((0, 0, 0), (0, 0, 5)),
            segment((0, 2, 0), (0, 2, 5)),
        ];
        segments[0].wire.insert((0, 1, 2));
        segments[1].wire.insert((0, 1, 2));
        let mut grids = MazeGrids::new(Dims::new(1, 10, 10));
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let cancel = crate::cancel::CancelToken::new();
        let remaining = rip_up_and_reroute(&mut segments, &HashSet::new(), &mut grids, &mut rng, 50, &cancel);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn cancellation_stops_the_loop_early() {
        let mut segments = vec![segment((0, 0, 0), (0, 0, 5))];
        segments[0].wire.insert((0, 4, 4));
        let mut grids = MazeGrids::new(Dims::new(1, 10, 10));
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let cancel = crate::cancel::CancelToken::new();
        cancel.cancel();
        // Should return promptly without panicking even though it cannot
        // converge (the cap is never reached; cancellation wins).
        rip_up_and_reroute(&mut segments, &HashSet::new(), &mut grids, &mut rng, 1000, &cancel);
    }
}
