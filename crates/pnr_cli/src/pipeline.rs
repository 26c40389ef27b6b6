//! Orchestrates the full pipeline: parse -> place -> route -> extract ->
//! analyze timing, writing each stage's artifacts as it goes.

use std::path::Path;

use pnr_config::load_config;
use pnr_core::cancel::CancelToken;
use pnr_core::extractor::{extract_routing, paint_extraction};
use pnr_core::placement::{
    initial_placement, place_pins, shrink, simulated_annealing_placement, placement_to_layout,
    BaseDisplaceProfile,
};
use pnr_core::router::route;
use pnr_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use pnr_library::{load_library, Dims, PregeneratedCells};
use pnr_netlist::parse_blif;
use pnr_source::{Span, SourceDb};
use pnr_timing::{analyze_timing, critical_path, DriverDrivenSets};

use crate::persist;
use crate::Cli;

/// Runs the full pipeline for `args`, returning the process exit code.
pub fn run(args: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let mut source_db = SourceDb::new();

    let project_dir = std::env::current_dir()?;
    let config = load_config(&project_dir).unwrap_or_default();
    let seed = args.seed.or(config.seed).unwrap_or(0);

    let library_path = args
        .library
        .clone()
        .or_else(|| config.paths.library.clone().map(Into::into))
        .ok_or("no cell library given (pass --library or set paths.library in pnr.toml)")?;

    std::fs::create_dir_all(&args.output_dir)?;

    if !args.quiet {
        eprintln!("   Parsing {}", args.netlist.display());
    }

    let netlist_content = std::fs::read_to_string(&args.netlist)?;
    let netlist_file = source_db.add_source(args.netlist.clone(), netlist_content.clone());
    let Some(netlist) = parse_blif(&netlist_content, netlist_file, &sink) else {
        render_and_report(&sink, &source_db);
        return Ok(1);
    };

    let library_content = std::fs::read_to_string(&library_path)?;
    let library_file = source_db.add_source(library_path.clone(), library_content.clone());
    let Some(library) = load_library(&library_content, library_file, &sink) else {
        render_and_report(&sink, &source_db);
        return Ok(1);
    };

    let cells = match PregeneratedCells::build(&library.cells) {
        Ok(cells) => cells,
        Err(e) => {
            sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Error, 102),
                format!("failed to pregenerate cell rotations: {}", e.message),
                Span::DUMMY,
            ));
            render_and_report(&sink, &source_db);
            return Ok(1);
        }
    };

    if !args.quiet {
        eprintln!(
            "   Loaded {} cells from library '{}'",
            library.cells.len(),
            library.library_name
        );
    }

    let placements_path = args
        .placements
        .clone()
        .unwrap_or_else(|| args.output_dir.join("placements.json"));

    let (placements, dims) = if placements_path.exists() {
        if args.verbose {
            eprintln!("   Loading cached placements from {}", placements_path.display());
        }
        persist::read_placements(&placements_path)?
    } else {
        if !args.quiet {
            eprintln!("   Placing {} cells", netlist.cells.len());
        }
        let (mut placements, grid_dims) =
            initial_placement(&netlist.cells, &cells, config.placement.grid_spacing);
        place_pins(&mut placements, grid_dims, &netlist.inputs, &netlist.outputs);
        let mut placements = simulated_annealing_placement(
            placements,
            grid_dims,
            &cells,
            &config.placement,
            seed,
            &BaseDisplaceProfile,
            &CancelToken::new(),
        );
        let dims = shrink(&mut placements, &cells);
        persist::write_placements(&placements_path, &placements, dims)?;
        (placements, dims)
    };

    let routings_path = args
        .routings
        .clone()
        .unwrap_or_else(|| args.output_dir.join("routing.json"));

    let (routing, dims) = if routings_path.exists() {
        if args.verbose {
            eprintln!("   Loading cached routing from {}", routings_path.display());
        }
        persist::read_routing(&routings_path)?
    } else {
        if !args.quiet {
            eprintln!("   Routing {} nets", netlist.cells.len());
        }
        let outcome = route(&placements, dims, &cells, &config.router, seed, &CancelToken::new());
        if outcome.remaining_violations > 0 {
            sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Routing, 201),
                format!(
                    "routing did not converge: {} violations remain after {} iterations",
                    outcome.remaining_violations, config.router.max_iterations
                ),
                Span::DUMMY,
            ).with_note("the best-effort routing produced so far is still written to routing.json"));
        }
        persist::write_routing(&routings_path, &outcome.routing, dims)?;
        (outcome.routing, dims)
    };

    if !args.quiet {
        eprintln!("   Extracting conductor layout");
    }
    let extraction = match extract_routing(&routing) {
        Ok(extraction) => extraction,
        Err(e) => {
            sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Routing, 202),
                format!("extraction failed: {e}"),
                Span::DUMMY,
            ));
            render_and_report(&sink, &source_db);
            return Ok(1);
        }
    };

    let mut layout = placement_to_layout(&placements, dims, &cells);
    paint_extraction(&extraction, &mut layout);

    let extraction_path = args.output_dir.join("extraction.json");
    persist::write_extraction(&extraction_path, &layout.blocks)?;

    let world_path = args.world.as_deref().or_else(|| config.paths.world.as_deref().map(Path::new));
    if let Some(world_path) = world_path {
        persist::write_extraction(world_path, &layout.blocks)?;
    }

    if !args.quiet {
        eprintln!("   Analyzing timing");
    }
    let classification = DriverDrivenSets::default();
    let paths = analyze_timing(&placements, &cells, &routing, &extraction, &classification);
    match critical_path(&paths) {
        Some(worst) if !args.quiet => {
            eprintln!(
                "   Critical path: {} -> {} ({} ticks, {} cells)",
                worst.source,
                worst.sink,
                worst.delay,
                worst.cells.len()
            );
        }
        None if !args.quiet => eprintln!("   No driver/driven path found"),
        _ => {}
    }

    render_and_report(&sink, &source_db);
    Ok(if sink.has_errors() { 1 } else { 0 })
}

fn render_and_report(sink: &DiagnosticSink, source_db: &SourceDb) {
    let renderer = TerminalRenderer::default();
    for diag in sink.diagnostics() {
        eprint!("{}", renderer.render(&diag, source_db));
    }
}
