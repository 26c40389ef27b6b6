//! Per-net pin collection, Kruskal MST, and DAG orientation (§4.2 of
//! SPEC_FULL.md).

use crate::geometry::{global_coord, step_toward};
use crate::placement::Placement;
use crate::router::types::{Coord, ExtendedPin};
use pnr_library::PregeneratedCells;
use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::UnGraph;
use std::collections::{HashMap, HashSet};

/// Manhattan distance between two coordinates.
pub fn manhattan(a: Coord, b: Coord) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs() + (a.2 - b.2).abs()
}

/// Groups every placement's wired pins by net name, resolving each pin's
/// `pin_coord`/`route_coord` through its template.
///
/// A net only appears in the result if at least one placement names it.
/// Nets named by only one pin are retained here (the ≥2-pins filter is the
/// caller's job, per §4.2) since the caller may still want to report them.
pub fn collect_nets(
    placements: &[Placement],
    cells: &PregeneratedCells,
) -> HashMap<String, Vec<ExtendedPin>> {
    let mut nets: HashMap<String, Vec<ExtendedPin>> = HashMap::new();
    for (cell_index, placement) in placements.iter().enumerate() {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for (port, net) in &placement.pins {
            let Some(port_info) = template.ports.get(port) else {
                continue;
            };
            let pin_coord = global_coord(placement.anchor, port_info.coordinates);
            let route_coord = step_toward(pin_coord, port_info.facing);
            nets.entry(net.clone()).or_default().push(ExtendedPin {
                cell_index,
                port: port.clone(),
                pin_coord,
                route_coord,
                is_output: port_info.direction == pnr_library::PinDirection::Output,
            });
        }
    }
    nets
}

/// Builds the minimum spanning tree over a net's pins, using Manhattan
/// distance between `route_coord`s as edge weight.
///
/// Returns edges as `(pin_index_a, pin_index_b, weight)`, in the order
/// `petgraph`'s Kruskal implementation emits them — ascending weight, ties
/// broken by edge insertion order, which is itself the order pins were
/// discovered. This total order is what §4.2.1 names as the DAG
/// orientation's deterministic tie-break.
pub fn kruskal_mst(pins: &[ExtendedPin]) -> Vec<(usize, usize, i64)> {
    let n = pins.len();
    if n < 2 {
        return Vec::new();
    }

    let mut graph = UnGraph::<(), i64>::with_capacity(n, n * (n - 1) / 2);
    for _ in 0..n {
        graph.add_node(());
    }
    for i in 0..n {
        for j in (i + 1)..n {
            let weight = manhattan(pins[i].route_coord, pins[j].route_coord);
            graph.add_edge(
                petgraph::graph::NodeIndex::new(i),
                petgraph::graph::NodeIndex::new(j),
                weight,
            );
        }
    }

    min_spanning_tree(&graph)
        .filter_map(|element| match element {
            Element::Edge {
                source,
                target,
                weight,
            } => Some((source, target, weight)),
            Element::Node { .. } => None,
        })
        .collect()
}

/// Orients an MST into a DAG rooted at every pin marked `is_output`.
///
/// Seeds the driver set with every output pin, then repeatedly emits the
/// first unseen edge (in MST order) with exactly one endpoint already in
/// the driver set, directing it `driver -> other`. If a net has multiple
/// output pins, an edge whose both endpoints are already reached is still
/// emitted `i -> j` (MST order) so the tree stays fully connected. If a net
/// has no output pin at all, the first remaining edge's first endpoint
/// seeds a synthetic driver so the net still routes.
pub fn orient_dag(mst: &[(usize, usize, i64)], pins: &[ExtendedPin]) -> Vec<(usize, usize)> {
    let mut reached: HashSet<usize> = pins
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_output)
        .map(|(i, _)| i)
        .collect();
    let mut remaining: Vec<(usize, usize)> = mst.iter().map(|&(i, j, _)| (i, j)).collect();
    let mut dag = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let mut emitted = None;
        for (idx, &(i, j)) in remaining.iter().enumerate() {
            let i_in = reached.contains(&i);
            let j_in = reached.contains(&j);
            if i_in && !j_in {
                dag.push((i, j));
                reached.insert(j);
                emitted = Some(idx);
                break;
            } else if j_in && !i_in {
                dag.push((j, i));
                reached.insert(i);
                emitted = Some(idx);
                break;
            } else if i_in && j_in {
                dag.push((i, j));
                emitted = Some(idx);
                break;
            }
        }
        match emitted {
            Some(idx) => {
                remaining.remove(idx);
            }
            None => {
                let (i, j) = remaining.remove(0);
                reached.insert(i);
                reached.insert(j);
                dag.push((i, j));
            }
        }
    }
    dag
}
