//! Simulated-annealing placement refinement (§4.1 of SPEC_FULL.md).
//!
//! Three move kinds are proposed at random: interchange (swap two cells'
//! positions), displace (move one cell within a shrinking window) and
//! reorient (change one cell's yaw). Moves are accepted or rejected by the
//! Metropolis criterion, and the temperature cools geometrically across a
//! fixed number of generations.

use crate::cancel::CancelToken;
use crate::placement::score::score;
use crate::placement::types::Placement;
use pnr_config::PlacementConfig;
use pnr_library::{Dims, PregeneratedCells};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Geometric cooling factor applied to the temperature once per iteration.
const COOLING_ALPHA: f64 = 0.9;

/// Temperature floor below which annealing stops early, mirroring the
/// early-termination guard every cooling schedule in this codebase uses so a
/// run with a generous `config.iterations` doesn't spin once it has already
/// converged.
const MIN_TEMPERATURE: f64 = 0.01;

/// `R` in the interchange-probability formula `1 - 1/R`: interchange is
/// chosen roughly four times out of five, with displace/reorient splitting
/// the remainder.
const INTERCHANGE_R: f64 = 5.0;

/// Proposes a new `(z, x)` for a cell being displaced, given its current
/// position and the current annealing temperature.
///
/// Implementations scale their search window down as the temperature cools,
/// the way a real annealer narrows its moves near convergence.
pub trait DisplaceProfile {
    /// Returns a candidate `(z, x)`. `t_ratio` is `temperature / t0`, in
    /// `(0, 1]`.
    fn propose(&self, rng: &mut StdRng, current: (i64, i64), t_ratio: f64) -> (i64, i64);
}

/// The base displacement window: `max(2, round(8 * t_ratio))` voxels in
/// each of `z` and `x`, uniformly sampled.
pub struct BaseDisplaceProfile;

impl DisplaceProfile for BaseDisplaceProfile {
    fn propose(&self, rng: &mut StdRng, current: (i64, i64), t_ratio: f64) -> (i64, i64) {
        let window = ((8.0 * t_ratio).round() as i64).max(2);
        let dz = rng.gen_range(-window..=window);
        let dx = rng.gen_range(-window..=window);
        (current.0 + dz, current.1 + dx)
    }
}

/// A displacement window snapped to multiples of `max_cell_side + spacing`,
/// matching `GridPlacer`'s initial square-grid layout so moves keep cells
/// grid-aligned instead of drifting onto fractional offsets.
pub struct GridDisplaceProfile {
    /// The grid interval moves are snapped to.
    pub interval: i64,
}

impl DisplaceProfile for GridDisplaceProfile {
    fn propose(&self, rng: &mut StdRng, current: (i64, i64), t_ratio: f64) -> (i64, i64) {
        let interval = self.interval.max(1);
        let window = (((8.0 * t_ratio).round() as i64).max(2)) / interval.max(1) + 1;
        let dz = rng.gen_range(-window..=window) * interval;
        let dx = rng.gen_range(-window..=window) * interval;
        (current.0 + dz, current.1 + dx)
    }
}

/// Runs simulated annealing over `placements`, returning the refined set.
///
/// Polls `cancel` between generations and between individual moves; on
/// cancellation, returns the best placement seen so far rather than the
/// in-progress (possibly worse) current state. On normal completion, returns
/// the current state, which by construction is never worse than `best` by
/// more than the last rejected move.
pub fn simulated_annealing_placement(
    placements: Vec<Placement>,
    dims: Dims,
    cells: &PregeneratedCells,
    config: &PlacementConfig,
    seed: u64,
    displace: &dyn DisplaceProfile,
    cancel: &CancelToken,
) -> Vec<Placement> {
    let mut current = placements;
    if current.len() < 2 {
        return current;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut current_cost = score(&current, dims, cells).total();
    let mut best = current.clone();
    let mut best_cost = current_cost;
    let mut temperature = config.t0;
    let interchange_prob = 1.0 - 1.0 / INTERCHANGE_R;

    'iterations: for _ in 0..config.iterations {
        if cancel.is_cancelled() || temperature < MIN_TEMPERATURE {
            break;
        }
        for _ in 0..config.generations {
            if cancel.is_cancelled() {
                break 'iterations;
            }

            let delta = if rng.gen::<f64>() < interchange_prob {
                apply_interchange(&mut rng, &mut current)
            } else if rng.gen::<bool>() {
                apply_displace(&mut rng, &mut current, displace, temperature / config.t0)
            } else {
                apply_reorient(&mut rng, &mut current)
            };

            let new_cost = score(&current, dims, cells).total();
            let cost_delta = new_cost - current_cost;

            let accept = cost_delta <= 0.0
                || -cost_delta / temperature > 1.0
                || rng.gen::<f64>() < (-cost_delta / temperature).exp();

            if accept {
                current_cost = new_cost;
                if current_cost < best_cost {
                    best_cost = current_cost;
                    best = current.clone();
                }
            } else {
                delta.undo(&mut current);
            }
        }
        temperature *= COOLING_ALPHA;
    }

    if cancel.is_cancelled() {
        best
    } else {
        current
    }
}

/// Captures enough state from a proposed move to revert it without cloning
/// the whole placement vector.
enum Undo {
    Interchange {
        a: usize,
        b: usize,
        a_anchor: (i64, i64, i64),
        a_turns: u32,
        b_anchor: (i64, i64, i64),
        b_turns: u32,
    },
    Displace {
        index: usize,
        anchor: (i64, i64, i64),
    },
    Reorient {
        index: usize,
        turns: u32,
    },
}

impl Undo {
    fn undo(self, placements: &mut [Placement]) {
        match self {
            Undo::Interchange {
                a,
                b,
                a_anchor,
                a_turns,
                b_anchor,
                b_turns,
            } => {
                placements[a].anchor = a_anchor;
                placements[a].turns = a_turns;
                placements[b].anchor = b_anchor;
                placements[b].turns = b_turns;
            }
            Undo::Displace { index, anchor } => placements[index].anchor = anchor,
            Undo::Reorient { index, turns } => placements[index].turns = turns,
        }
    }
}

fn pick_two_distinct(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let a = rng.gen_range(0..n);
    loop {
        let b = rng.gen_range(0..n);
        if b != a {
            return (a, b);
        }
    }
}

fn apply_interchange(rng: &mut StdRng, placements: &mut [Placement]) -> Undo {
    let (a, b) = pick_two_distinct(rng, placements.len());
    let a_anchor = placements[a].anchor;
    let a_turns = placements[a].turns;
    let b_anchor = placements[b].anchor;
    let b_turns = placements[b].turns;

    placements[a].anchor = b_anchor;
    placements[a].turns = b_turns;
    placements[b].anchor = a_anchor;
    placements[b].turns = a_turns;

    Undo::Interchange {
        a,
        b,
        a_anchor,
        a_turns,
        b_anchor,
        b_turns,
    }
}

fn apply_displace(
    rng: &mut StdRng,
    placements: &mut [Placement],
    profile: &dyn DisplaceProfile,
    t_ratio: f64,
) -> Undo {
    let index = rng.gen_range(0..placements.len());
    let old_anchor = placements[index].anchor;
    let (z, x) = profile.propose(rng, (old_anchor.1, old_anchor.2), t_ratio);
    placements[index].anchor = (old_anchor.0, z, x);
    Undo::Displace {
        index,
        anchor: old_anchor,
    }
}

fn apply_reorient(rng: &mut StdRng, placements: &mut [Placement]) -> Undo {
    let index = rng.gen_range(0..placements.len());
    let old_turns = placements[index].turns;
    let mut new_turns = rng.gen_range(0..4u32);
    if new_turns == old_turns {
        new_turns = (new_turns + 1) % 4;
    }
    placements[index].turns = new_turns;
    Undo::Reorient {
        index,
        turns: old_turns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnr_library::{CellTemplate, Delay, Facing, Grid3, PinDirection, Port};
    use std::collections::HashMap;

    fn unit_template(name: &str) -> CellTemplate {
        let mut ports = HashMap::new();
        ports.insert(
            "Y".to_string(),
            Port {
                coordinates: (0, 0, 0),
                facing: Facing::East,
                direction: PinDirection::Output,
                level: 15,
            },
        );
        CellTemplate {
            name: name.to_string(),
            blocks: Grid3::filled(Dims::new(1, 1, 1), 1),
            data: Grid3::filled(Dims::new(1, 1, 1), 0),
            mask: Grid3::filled(Dims::new(1, 1, 1), true),
            ports,
            delay: Delay::default(),
        }
    }

    fn pregen() -> PregeneratedCells {
        let mut templates = HashMap::new();
        templates.insert("u".to_string(), unit_template("u"));
        PregeneratedCells::build(&templates).unwrap()
    }

    fn pins(net: &str) -> HashMap<String, String> {
        let mut p = HashMap::new();
        p.insert("Y".to_string(), net.to_string());
        p
    }

    fn tiny_config() -> PlacementConfig {
        PlacementConfig {
            t0: 10.0,
            iterations: 20,
            generations: 3,
            grid_spacing: 1,
        }
    }

    #[test]
    fn single_cell_returns_unchanged() {
        let cells = pregen();
        let placements = vec![Placement::new("u", (0, 0, 0), 0, HashMap::new())];
        let config = tiny_config();
        let cancel = CancelToken::new();
        let result = simulated_annealing_placement(
            placements.clone(),
            Dims::new(5, 5, 5),
            &cells,
            &config,
            42,
            &BaseDisplaceProfile,
            &cancel,
        );
        assert_eq!(result, placements);
    }

    #[test]
    fn annealing_does_not_increase_best_seen_cost() {
        let cells = pregen();
        let placements = vec![
            Placement::new("u", (0, 0, 0), 0, pins("n0")),
            Placement::new("u", (0, 9, 9), 0, pins("n0")),
        ];
        let before = score(&placements, Dims::new(20, 20, 20), &cells).total();
        let config = tiny_config();
        let cancel = CancelToken::new();
        let result = simulated_annealing_placement(
            placements,
            Dims::new(20, 20, 20),
            &cells,
            &config,
            42,
            &BaseDisplaceProfile,
            &cancel,
        );
        let after = score(&result, Dims::new(20, 20, 20), &cells).total();
        assert!(after <= before);
    }

    #[test]
    fn cancellation_returns_best_seen() {
        let cells = pregen();
        let placements = vec![
            Placement::new("u", (0, 0, 0), 0, pins("n0")),
            Placement::new("u", (0, 9, 9), 0, pins("n0")),
        ];
        let config = tiny_config();
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = simulated_annealing_placement(
            placements.clone(),
            Dims::new(20, 20, 20),
            &cells,
            &config,
            42,
            &BaseDisplaceProfile,
            &cancel,
        );
        // cancelled before the first generation: best-seen is the initial state.
        assert_eq!(result, placements);
    }

    #[test]
    fn grid_profile_snaps_to_interval() {
        let profile = GridDisplaceProfile { interval: 3 };
        let mut rng = StdRng::seed_from_u64(1);
        let (z, x) = profile.propose(&mut rng, (0, 0), 1.0);
        assert_eq!(z % 3, 0);
        assert_eq!(x % 3, 0);
    }
}
