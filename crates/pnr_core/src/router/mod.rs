//! Net routing (§4.2 of SPEC_FULL.md).
//!
//! `types` holds the shared `Coord`/`ExtendedPin`/`Segment`/`Routing`
//! records; `mst` collects a net's pins and builds its Kruskal MST, then
//! orients it into a driver-rooted DAG; `dumb_route` produces each edge's
//! initial polyline; `violation` computes the proximity forbidden-zone a
//! segment's conductor imposes on other nets; `maze` is the weighted Lee
//! maze-router used during rip-up; `score` normalizes per-segment routing
//! cost; `ripup` runs the rip-up-and-reroute loop to convergence. [`route`]
//! wires all of these into the full per-net routing pass.

pub mod dumb_route;
pub mod maze;
pub mod mst;
pub mod ripup;
pub mod score;
pub mod types;
pub mod violation;

pub use dumb_route::dumb_route;
pub use maze::{maze_route, MazeGrids};
pub use mst::{collect_nets, kruskal_mst, orient_dag};
pub use ripup::rip_up_and_reroute;
pub use score::{normalize, segment_score};
pub use types::{Coord, ExtendedPin, NetRouting, Routing, Segment};
pub use violation::{compute_violation, placement_occupancy};

use crate::cancel::CancelToken;
use crate::placement::Placement;
use pnr_config::RouterConfig;
use pnr_library::{Dims, PregeneratedCells};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The result of a full routing pass: the routing itself, plus however many
/// violations (if any) remained when rip-up-and-reroute stopped.
///
/// A nonzero `remaining_violations` means the loop exhausted
/// `config.max_iterations` or was cancelled before converging (§7:
/// "Infeasible routing ... the current routing (possibly still violating)
/// is surfaced to the caller") — `routing` is still the caller's best
/// available layout, not discarded.
#[derive(Debug)]
pub struct RoutingOutcome {
    /// Every multi-pin net's realized routing.
    pub routing: Routing,
    /// Total violation count across all segments when the loop stopped.
    pub remaining_violations: usize,
}

/// Routes every net with at least two pins: collects pins, builds each
/// net's MST, orients it into a DAG, produces an initial "dumb" polyline per
/// edge, then runs rip-up-and-reroute to convergence over the whole design
/// at once (segments compete for space across net boundaries, so rip-up
/// operates on the flattened segment list rather than net-by-net).
///
/// Nets with fewer than two pins are omitted (§4.2).
pub fn route(
    placements: &[Placement],
    dims: Dims,
    cells: &PregeneratedCells,
    config: &RouterConfig,
    seed: u64,
    cancel: &CancelToken,
) -> RoutingOutcome {
    let nets = collect_nets(placements, cells);
    let base_occupancy = placement_occupancy(placements, cells);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grids = MazeGrids::new(dims);

    let mut routing: Routing = Routing::new();
    let mut segment_owner: Vec<(String, usize)> = Vec::new();
    let mut flat_segments: Vec<Segment> = Vec::new();

    for (net_name, pins) in nets {
        if pins.len() < 2 {
            continue;
        }
        let mst = kruskal_mst(&pins);
        let dag = orient_dag(&mst, &pins);

        let mut net_routing = NetRouting {
            pins: pins.clone(),
            segments: Vec::with_capacity(dag.len()),
        };

        for (i, j) in dag {
            let a = pins[i].route_coord;
            let b = pins[j].route_coord;
            let path = dumb_route(a, b);
            let violation = compute_violation(&path);
            let wire = path.iter().copied().collect();
            let segment = Segment {
                pins: [pins[i].clone(), pins[j].clone()],
                net: path,
                wire,
                violation,
            };
            segment_owner.push((net_name.clone(), net_routing.segments.len()));
            net_routing.segments.push(segment.clone());
            flat_segments.push(segment);
        }

        routing.insert(net_name, net_routing);
    }

    let remaining_violations = rip_up_and_reroute(
        &mut flat_segments,
        &base_occupancy,
        &mut grids,
        &mut rng,
        config.max_iterations,
        cancel,
    );

    for (segment, (net_name, slot)) in flat_segments.into_iter().zip(segment_owner) {
        routing.get_mut(&net_name).unwrap().segments[slot] = segment;
    }

    RoutingOutcome {
        routing,
        remaining_violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;
    use pnr_library::{CellTemplate, Delay, Facing, Grid3, PinDirection, Port};
    use std::collections::HashMap;

    fn inverter_template() -> CellTemplate {
        let dims = Dims::new(1, 1, 3);
        let mut ports = HashMap::new();
        ports.insert(
            "A".to_string(),
            Port {
                coordinates: (0, 0, 0),
                facing: Facing::West,
                direction: PinDirection::Input,
                level: 0,
            },
        );
        ports.insert(
            "Y".to_string(),
            Port {
                coordinates: (0, 0, 2),
                facing: Facing::East,
                direction: PinDirection::Output,
                level: 15,
            },
        );
        CellTemplate {
            name: "inv".to_string(),
            blocks: Grid3::filled(dims, 1),
            data: Grid3::filled(dims, 0),
            mask: Grid3::filled(dims, true),
            ports,
            delay: Delay { combinational: Some(1) },
        }
    }

    fn pregen() -> PregeneratedCells {
        let mut templates = HashMap::new();
        templates.insert("inv".to_string(), inverter_template());
        PregeneratedCells::build(&templates).unwrap()
    }

    #[test]
    fn routes_a_two_pin_net_end_to_end() {
        let cells = pregen();
        let mut pins_a = HashMap::new();
        pins_a.insert("Y".to_string(), "n1".to_string());
        let mut pins_b = HashMap::new();
        pins_b.insert("A".to_string(), "n1".to_string());

        let placements = vec![
            Placement::new("inv", (0, 0, 0), 0, pins_a),
            Placement::new("inv", (0, 0, 10), 0, pins_b),
        ];

        let outcome = route(
            &placements,
            Dims::new(10, 20, 20),
            &cells,
            &RouterConfig {
                max_iterations: 50,
            },
            0,
            &CancelToken::new(),
        );

        assert_eq!(outcome.remaining_violations, 0);
        assert_eq!(outcome.routing.len(), 1);
        let net = &outcome.routing["n1"];
        assert_eq!(net.segments.len(), 1);
        assert!(!net.segments[0].net.is_empty());
    }

    #[test]
    fn single_pin_nets_are_omitted() {
        let cells = pregen();
        let mut pins_a = HashMap::new();
        pins_a.insert("Y".to_string(), "dangling".to_string());
        let placements = vec![Placement::new("inv", (0, 0, 0), 0, pins_a)];

        let outcome = route(
            &placements,
            Dims::new(5, 5, 5),
            &cells,
            &RouterConfig { max_iterations: 10 },
            0,
            &CancelToken::new(),
        );
        assert!(outcome.routing.is_empty());
    }
}
