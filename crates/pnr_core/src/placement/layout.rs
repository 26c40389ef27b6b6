//! Painting a set of placements into a dense voxel grid (§4.1 of
//! SPEC_FULL.md).

use crate::geometry::global_coord;
use crate::placement::types::Placement;
use pnr_library::blocks::block_id;
use pnr_library::{Dims, Grid3, PregeneratedCells};

/// A dense voxel layout: parallel block-ID and data-nibble grids over the
/// same `dims`.
#[derive(Clone, Debug)]
pub struct Layout {
    /// The layout's bounding box.
    pub dims: Dims,
    /// Block IDs, one per voxel.
    pub blocks: Grid3<u8>,
    /// Data nibbles, one per voxel.
    pub data: Grid3<u8>,
}

/// Paints every placement's template blocks into a fresh `dims`-sized
/// layout, air-filled by default.
///
/// Unlike an early prototype of this pipeline, the full `dims.height` is
/// always painted — there is no truncation to a fixed low slice. Voxels a
/// placement's anchor pushes outside `dims` are silently dropped; by the
/// time this runs the placer's `oob` score component should already have
/// driven such placements back inside bounds.
pub fn placement_to_layout(
    placements: &[Placement],
    dims: Dims,
    cells: &PregeneratedCells,
) -> Layout {
    let air = block_id("air").unwrap_or(0);
    let mut blocks = Grid3::filled(dims, air);
    let mut data = Grid3::filled(dims, 0u8);

    for placement in placements {
        let Some(template) = cells.get(&placement.name, placement.turns) else {
            continue;
        };
        for ((y, z, x), &block) in template.blocks.iter() {
            if block == air {
                continue;
            }
            let (gy, gz, gx) = global_coord(placement.anchor, (y, z, x));
            if !dims.contains(gy, gz, gx) {
                continue;
            }
            let (gy, gz, gx) = (gy as u32, gz as u32, gx as u32);
            blocks.set(gy, gz, gx, block);
            data.set(gy, gz, gx, *template.data.get(y, z, x));
        }
    }

    Layout { dims, blocks, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnr_library::{CellTemplate, Delay, Facing, PinDirection, Port};
    use std::collections::HashMap;

    fn solid_template(name: &str) -> CellTemplate {
        let dims = Dims::new(1, 1, 1);
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
            blocks: Grid3::filled(dims, block_id("stone").unwrap()),
            data: Grid3::filled(dims, 0),
            mask: Grid3::filled(dims, true),
            ports,
            delay: Delay::default(),
        }
    }

    fn pregen() -> PregeneratedCells {
        let mut templates = HashMap::new();
        templates.insert("u".to_string(), solid_template("u"));
        PregeneratedCells::build(&templates).unwrap()
    }

    #[test]
    fn paints_cell_block_at_anchor() {
        let cells = pregen();
        let placements = vec![Placement::new("u", (1, 1, 1), 0, HashMap::new())];
        let layout = placement_to_layout(&placements, Dims::new(3, 3, 3), &cells);
        assert_eq!(*layout.blocks.get(1, 1, 1), block_id("stone").unwrap());
    }

    #[test]
    fn unfilled_voxels_stay_air() {
        let cells = pregen();
        let placements = vec![Placement::new("u", (0, 0, 0), 0, HashMap::new())];
        let layout = placement_to_layout(&placements, Dims::new(3, 3, 3), &cells);
        assert_eq!(*layout.blocks.get(2, 2, 2), block_id("air").unwrap());
    }

    #[test]
    fn out_of_bounds_voxels_are_dropped_not_panicking() {
        let cells = pregen();
        let placements = vec![Placement::new("u", (5, 5, 5), 0, HashMap::new())];
        let layout = placement_to_layout(&placements, Dims::new(3, 3, 3), &cells);
        assert_eq!(layout.dims, Dims::new(3, 3, 3));
    }

    #[test]
    fn full_height_is_painted_no_truncation() {
        let cells = pregen();
        let placements = vec![Placement::new("u", (9, 0, 0), 0, HashMap::new())];
        let layout = placement_to_layout(&placements, Dims::new(10, 1, 1), &cells);
        assert_eq!(*layout.blocks.get(9, 0, 0), block_id("stone").unwrap());
    }
}
