//! Weighted Lee maze-route: single-source Dijkstra over the voxel grid with
//! lateral and vertical-via moves (§4.2).

use crate::router::types::Coord;
use pnr_library::Dims;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Lateral step cost (Z±1 or X±1).
pub const LATERAL_COST: i64 = 1;
/// Vertical-via step cost (Y±3).
pub const VIA_COST: i64 = 3;
/// Soft penalty added when a move lands in a foreign violation zone.
pub const VIOLATION_PENALTY: i64 = 1000;

/// The six legal moves: four lateral, two vertical vias.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Move {
    North,
    South,
    East,
    West,
    ViaUp,
    ViaDown,
}

impl Move {
    const ALL: [Move; 6] = [
        Move::North,
        Move::South,
        Move::East,
        Move::West,
        Move::ViaUp,
        Move::ViaDown,
    ];

    fn delta(self) -> Coord {
        match self {
            Move::North => (0, -1, 0),
            Move::South => (0, 1, 0),
            Move::East => (0, 0, 1),
            Move::West => (0, 0, -1),
            Move::ViaUp => (3, 0, 0),
            Move::ViaDown => (-3, 0, 0),
        }
    }

    fn cost(self) -> i64 {
        match self {
            Move::ViaUp | Move::ViaDown => VIA_COST,
            _ => LATERAL_COST,
        }
    }
}

/// The dense cost/backtrace/visited arrays a single [`Router`](crate::router)
/// reuses across every `maze_route` call, per §5/§9: "owned and reused"
/// rather than allocated fresh per call.
pub struct MazeGrids {
    dims: Dims,
    cost: Vec<i64>,
    backtrace: Vec<Option<Move>>,
    visited: Vec<bool>,
}

impl MazeGrids {
    /// Allocates grids sized to `dims`, once.
    pub fn new(dims: Dims) -> Self {
        let n = dims.volume();
        Self {
            dims,
            cost: vec![i64::MAX; n],
            backtrace: vec![None; n],
            visited: vec![false; n],
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.dims.contains(coord.0, coord.1, coord.2) {
            return None;
        }
        let (y, z, x) = (coord.0 as usize, coord.1 as usize, coord.2 as usize);
        Some((y * self.dims.width as usize + z) * self.dims.length as usize + x)
    }

    fn reset(&mut self) {
        self.cost.fill(i64::MAX);
        self.backtrace.fill(None);
        self.visited.fill(false);
    }
}

#[derive(PartialEq, Eq)]
struct HeapEntry {
    cost: i64,
    coord: Coord,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the lowest cost first.
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds the least-cost path from `a` to `b` through `dims`, penalizing
/// (but not forbidding) moves into `violation`.
///
/// Returns `None` if `b` is unreachable from `a` within `dims` — a fatal
/// condition for the segment being routed (§7's "Infeasible routing").
pub fn maze_route(
    a: Coord,
    b: Coord,
    violation: &HashSet<Coord>,
    grids: &mut MazeGrids,
) -> Option<Vec<Coord>> {
    grids.reset();
    let start_idx = grids.index(a)?;
    let _ = grids.index(b)?;

    grids.cost[start_idx] = 0;
    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { cost: 0, coord: a });

    while let Some(HeapEntry { cost, coord }) = heap.pop() {
        let idx = grids.index(coord).expect("visited coords are in-bounds");
        if grids.visited[idx] {
            continue;
        }
        grids.visited[idx] = true;
        if coord == b {
            break;
        }
        if cost > grids.cost[idx] {
            continue;
        }

        for mv in Move::ALL {
            let (dy, dz, dx) = mv.delta();
            let next = (coord.0 + dy, coord.1 + dz, coord.2 + dx);
            let Some(next_idx) = grids.index(next) else {
                continue;
            };
            if grids.visited[next_idx] {
                continue;
            }
            let mut step_cost = mv.cost();
            if next != a && next != b && violation.contains(&next) {
                step_cost += VIOLATION_PENALTY;
            }
            let next_cost = cost + step_cost;
            if next_cost < grids.cost[next_idx] {
                grids.cost[next_idx] = next_cost;
                grids.backtrace[next_idx] = Some(mv);
                heap.push(HeapEntry {
                    cost: next_cost,
                    coord: next,
                });
            }
        }
    }

    let b_idx = grids.index(b)?;
    if grids.cost[b_idx] == i64::MAX {
        return None;
    }

    let mut path = vec![b];
    let mut current = b;
    while current != a {
        let idx = grids.index(current)?;
        let mv = grids.backtrace[idx]?;
        let (dy, dz, dx) = mv.delta();
        current = (current.0 - dy, current.1 - dz, current.2 - dx);
        path.push(current);
    }
    path.reverse();
    Some(path)
}
