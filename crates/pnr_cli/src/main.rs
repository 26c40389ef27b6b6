//! `pnr` — the command-line interface for the place-and-route pipeline.
//!
//! Runs the full BLIF netlist -> placement -> routing -> extraction ->
//! timing pipeline and writes each stage's artifacts to the output
//! directory.

#![warn(missing_docs)]

mod persist;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::Parser;

/// Places, routes, and extracts a BLIF netlist into a voxel layout.
#[derive(Parser, Debug)]
#[command(name = "pnr", version, about = "Digital logic place-and-route tool")]
pub struct Cli {
    /// Path to the BLIF netlist to place and route.
    pub netlist: PathBuf,

    /// Path to the cell library JSON file.
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Path to a cached `placements.json`. Loaded instead of re-running the
    /// placer if it already exists; written there otherwise.
    #[arg(long)]
    pub placements: Option<PathBuf>,

    /// Path to a cached `routing.json`. Loaded instead of re-running the
    /// router if it already exists; written there otherwise.
    #[arg(long)]
    pub routings: Option<PathBuf>,

    /// Directory where `placements.json`, `routing.json`, and
    /// `extraction.json` are written when no explicit cache path is given.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to write the extracted block layout for an external voxel-world
    /// writer to consume. Out of scope for this tool beyond writing the raw
    /// block-ID array (see DESIGN.md).
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Seed for the deterministic PRNG shared by the placer and router.
    /// Overrides `pnr.toml`'s `seed`, if present.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose (stage-by-stage) output.
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    match pipeline::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
