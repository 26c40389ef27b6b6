//! Initial placement and I/O-pin placement (§4.1 of SPEC_FULL.md).

use crate::placement::types::Placement;
use pnr_library::{Dims, PregeneratedCells};
use pnr_netlist::CellInstance;
use std::collections::HashMap;

/// Spacing, in voxels, left between adjacent cells on the initial square
/// grid — also the interval [`GridDisplaceProfile`](crate::placement::anneal::GridDisplaceProfile)
/// snaps displacement moves to.
pub const DEFAULT_GRID_SPACING: u32 = 1;

/// Port name the library's `input_pin` template drives its net from.
pub const INPUT_PIN_PORT: &str = "Y";
/// Port name the library's `output_pin` template reads its net on.
pub const OUTPUT_PIN_PORT: &str = "A";

/// Returns the largest cell-footprint side (`max(width, length)`) and the
/// tallest cell height across every template referenced by `instances`,
/// resolved at `turns=0` since pre-rotation footprints are square-bounding
/// regardless of final orientation.
///
/// Named after the original's `compute_max_cell_dimension` helper (§4.1.1).
pub fn compute_max_cell_dimension(instances: &[CellInstance], cells: &PregeneratedCells) -> (u32, u32) {
    let mut max_side = 1u32;
    let mut max_height = 1u32;
    for instance in instances {
        if let Some(t) = cells.get(&instance.template, 0) {
            let d = t.dims();
            max_side = max_side.max(d.width).max(d.length);
            max_height = max_height.max(d.height);
        }
    }
    (max_side, max_height)
}

/// Arranges cells on a square grid of side `ceil(sqrt(N))`, spacing `s`
/// between cells, all at `turns=0`.
///
/// Mirrors the original's `estimate_lengths_and_occupieds`: the returned
/// `Dims` is `(max cell height, N*(max_cell_side+s), N*(max_cell_side+s))`,
/// generous enough that the annealer has room to work before `shrink` tightens
/// it.
pub fn initial_placement(
    instances: &[CellInstance],
    cells: &PregeneratedCells,
    spacing: u32,
) -> (Vec<Placement>, Dims) {
    let n = instances.len();
    if n == 0 {
        let (_, max_height) = compute_max_cell_dimension(instances, cells);
        return (Vec::new(), Dims::new(max_height.max(1), 0, 0));
    }

    let (max_side, max_height) = compute_max_cell_dimension(instances, cells);
    let interval = max_side + spacing;
    let side = (n as f64).sqrt().ceil() as u32;
    let extent = n as u32 * interval;

    let placements = instances
        .iter()
        .enumerate()
        .map(|(i, instance)| {
            let row = (i as u32) / side.max(1);
            let col = (i as u32) % side.max(1);
            let anchor = (0i64, (row * interval) as i64, (col * interval) as i64);
            Placement::new(&instance.template, anchor, 0, instance.pins.clone())
        })
        .collect();

    (placements, Dims::new(max_height, extent, extent))
}

/// Appends placements for primary input/output pins at the edges of
/// `dimensions`: inputs along the `z=0` face, outputs along the opposite
/// `z=dimensions.width-1` face, spaced one voxel apart along X.
///
/// This is the `GridPlacer`-only operation named in §4.1 — the base
/// placement pipeline has no I/O pins of its own, only the cell bodies
/// built from `.subckt` instances.
pub fn place_pins(
    placements: &mut Vec<Placement>,
    dims: Dims,
    inputs: &[String],
    outputs: &[String],
) {
    let south_z = dims.width.saturating_sub(1) as i64;
    for (i, net) in inputs.iter().enumerate() {
        let mut pins = HashMap::new();
        pins.insert(INPUT_PIN_PORT.to_string(), net.clone());
        placements.push(Placement::new("input_pin", (0, 0, i as i64), 0, pins));
    }
    for (i, net) in outputs.iter().enumerate() {
        let mut pins = HashMap::new();
        pins.insert(OUTPUT_PIN_PORT.to_string(), net.clone());
        placements.push(Placement::new("output_pin", (0, south_z, i as i64), 0, pins));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnr_library::{CellTemplate, Delay, Facing, Grid3, PinDirection, Port};
    use pnr_netlist::CellId;
    use pnr_source::Span;
    use std::collections::HashMap as StdHashMap;

    fn unit_template(name: &str) -> CellTemplate {
        let mut ports = StdHashMap::new();
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
        let mut templates = StdHashMap::new();
        templates.insert("inv".to_string(), unit_template("inv"));
        PregeneratedCells::build(&templates).unwrap()
    }

    fn instance(id: u32, template: &str) -> CellInstance {
        CellInstance {
            id: CellId::from_raw(id),
            template: template.to_string(),
            pins: StdHashMap::new(),
            span: Span::DUMMY,
        }
    }

    #[test]
    fn empty_netlist_yields_empty_placement() {
        let cells = pregen();
        let (placements, dims) = initial_placement(&[], &cells, 1);
        assert!(placements.is_empty());
        assert_eq!(dims.width, 0);
        assert_eq!(dims.length, 0);
    }

    #[test]
    fn single_cell_placed_at_origin() {
        let cells = pregen();
        let instances = vec![instance(0, "inv")];
        let (placements, _dims) = initial_placement(&instances, &cells, 1);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].anchor, (0, 0, 0));
        assert_eq!(placements[0].turns, 0);
    }

    #[test]
    fn multiple_cells_spread_on_grid() {
        let cells = pregen();
        let instances = (0..4).map(|i| instance(i, "inv")).collect::<Vec<_>>();
        let (placements, _) = initial_placement(&instances, &cells, 1);
        let anchors: std::collections::HashSet<_> =
            placements.iter().map(|p| p.anchor).collect();
        assert_eq!(anchors.len(), 4, "every cell should get a distinct anchor");
    }

    #[test]
    fn place_pins_appends_io_at_edges() {
        let mut placements = Vec::new();
        let dims = Dims::new(5, 5, 5);
        place_pins(
            &mut placements,
            dims,
            &["a".to_string(), "b".to_string()],
            &["y".to_string()],
        );
        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].name, "input_pin");
        assert_eq!(placements[2].name, "output_pin");
        assert_eq!(placements[2].anchor.1, 4);
    }
}
