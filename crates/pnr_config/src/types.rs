//! Configuration types deserialized from `pnr.toml`.

use serde::Deserialize;

/// The top-level project manifest parsed from `pnr.toml`.
///
/// All fields are optional at the TOML level; CLI flags take precedence over
/// any value present here, and any value absent from both falls back to the
/// engine default.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Input and output file paths.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Placer tuning parameters.
    #[serde(default)]
    pub placement: PlacementConfig,
    /// Router tuning parameters.
    #[serde(default)]
    pub router: RouterConfig,
    /// Seed for the deterministic PRNG shared by the placer and router.
    pub seed: Option<u64>,
}

/// Filesystem paths for the pipeline's inputs and outputs.
#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
    /// Path to the BLIF netlist to place and route.
    pub netlist: Option<String>,
    /// Path to the cell library JSON file.
    pub library: Option<String>,
    /// Directory where placement/routing/extraction artifacts are written.
    pub output_dir: Option<String>,
    /// Path to a voxel world to insert the extracted layout into.
    ///
    /// Consumed by the external voxel-world writer, not by this crate.
    pub world: Option<String>,
}

/// Tuning parameters for the simulated-annealing placer.
#[derive(Debug, Deserialize)]
pub struct PlacementConfig {
    /// Initial annealing temperature.
    #[serde(default = "default_t0")]
    pub t0: f64,
    /// Number of outer annealing iterations.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Number of inner generations (moves) evaluated per iteration.
    #[serde(default = "default_generations")]
    pub generations: u32,
    /// Grid spacing between cells used by the grid-snapping placer.
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            t0: default_t0(),
            iterations: default_iterations(),
            generations: default_generations(),
            grid_spacing: default_grid_spacing(),
        }
    }
}

fn default_t0() -> f64 {
    500.0
}

fn default_iterations() -> u32 {
    2000
}

fn default_generations() -> u32 {
    20
}

fn default_grid_spacing() -> u32 {
    1
}

/// Tuning parameters for the rip-up-and-reroute router.
#[derive(Debug, Deserialize)]
pub struct RouterConfig {
    /// Safety cap on rip-up-and-reroute passes.
    ///
    /// Not part of the algorithm this tool was distilled from; added purely
    /// to bound automated runs. Cancellation remains the primary way to stop
    /// a run early.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_max_iterations() -> u32 {
    10_000
}
