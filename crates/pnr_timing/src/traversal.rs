//! The driver/driven DAG walk itself (§4.4 of SPEC_FULL.md).

use std::collections::{HashMap, HashSet};

use pnr_core::extractor::Extraction;
use pnr_core::placement::Placement;
use pnr_core::router::Routing;
use pnr_library::PregeneratedCells;

use crate::delay::segment_delay;
use crate::drivers::DriverDrivenSets;
use crate::path::PathDelay;

/// A routed segment's driver/driven placement indices and its delay,
/// keyed by driver placement index.
///
/// Built once from `routing`/`extraction` so the DFS below never has to
/// re-walk every net's segment list per visited cell.
type Adjacency = HashMap<usize, Vec<(usize, i64)>>;

fn build_adjacency(routing: &Routing, extraction: &Extraction) -> Adjacency {
    let mut adjacency: Adjacency = HashMap::new();
    for (net_name, net_routing) in routing {
        let Some(extracted_net) = extraction.get(net_name) else {
            continue;
        };
        for (segment, extracted) in net_routing.segments.iter().zip(&extracted_net.segments) {
            let driver_index = segment.driver().cell_index;
            let driven_index = segment.driven().cell_index;
            adjacency
                .entry(driver_index)
                .or_default()
                .push((driven_index, segment_delay(extracted)));
        }
    }
    adjacency
}

fn combinational_delay(placement: &Placement, cells: &PregeneratedCells) -> i64 {
    cells
        .get(&placement.name, placement.turns)
        .and_then(|template| template.delay.combinational)
        .unwrap_or(0)
}

/// Walks every driver→driven combinational path in the placed, routed,
/// and extracted design, returning one [`PathDelay`] per path that
/// terminates at a driven endpoint.
///
/// A DFS branch that revisits a placement index it has already passed
/// through stops silently and contributes no path (§7: "Timing cycle:
/// detected silently; branch terminates without contributing a path").
pub fn analyze_timing(
    placements: &[Placement],
    cells: &PregeneratedCells,
    routing: &Routing,
    extraction: &Extraction,
    classification: &DriverDrivenSets,
) -> Vec<PathDelay> {
    let adjacency = build_adjacency(routing, extraction);
    let mut paths = Vec::new();

    for (index, placement) in placements.iter().enumerate() {
        if !classification.drivers.contains(&placement.name) {
            continue;
        }
        let source_name = placement.name.clone();
        let mut visited = HashSet::from([index]);
        let mut cells_on_path = vec![source_name.clone()];
        walk(
            index,
            combinational_delay(placement, cells),
            &source_name,
            &mut cells_on_path,
            &mut visited,
            placements,
            cells,
            &adjacency,
            classification,
            &mut paths,
        );
    }

    paths
}

#[allow(clippy::too_many_arguments)]
fn walk(
    index: usize,
    cumulative_delay: i64,
    source_name: &str,
    cells_on_path: &mut Vec<String>,
    visited: &mut HashSet<usize>,
    placements: &[Placement],
    cells: &PregeneratedCells,
    adjacency: &Adjacency,
    classification: &DriverDrivenSets,
    out: &mut Vec<PathDelay>,
) {
    let placement = &placements[index];
    if classification.driven.contains(&placement.name) {
        out.push(PathDelay {
            source: source_name.to_string(),
            sink: placement.name.clone(),
            delay: cumulative_delay,
            cells: cells_on_path.clone(),
        });
        return;
    }

    let Some(edges) = adjacency.get(&index) else {
        return;
    };
    for &(next_index, segment_delay) in edges {
        if visited.contains(&next_index) {
            continue;
        }
        let next_placement = &placements[next_index];
        let next_delay = cumulative_delay + segment_delay + combinational_delay(next_placement, cells);

        visited.insert(next_index);
        cells_on_path.push(next_placement.name.clone());
        walk(
            next_index,
            next_delay,
            source_name,
            cells_on_path,
            visited,
            placements,
            cells,
            adjacency,
            classification,
            out,
        );
        cells_on_path.pop();
        visited.remove(&next_index);
    }
}

/// Returns the path with the maximum delay, i.e. the critical path.
///
/// `None` if `paths` is empty (e.g. an empty netlist, or a design with no
/// net connecting a driver to a driven endpoint).
pub fn critical_path(paths: &[PathDelay]) -> Option<&PathDelay> {
    paths.iter().max_by_key(|p| p.delay)
}
