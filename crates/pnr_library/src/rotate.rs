//! Whole-template rotation: composes grid rotation with port-table rotation.
//!
//! Mirrors the original's two-step structure (rotate the voxel grids, then
//! separately re-map the port table) rather than fusing the two into one
//! pass, keeping each step independently testable — see SPEC_FULL.md §3.1.

use crate::blocks::{block_name, rotate_block_data};
use crate::template::{CellTemplate, Port};
use std::collections::HashMap;

/// Rotates a cell template 90 degrees counter-clockwise about Y, `turns`
/// times (`turns` taken mod 4).
///
/// Rotates `blocks`/`mask` geometrically, rewrites `data` nibbles through
/// the block-specific torch/repeater/comparator rotation tables, and
/// re-maps every port's coordinate and facing.
pub fn rotate_template(template: &CellTemplate, turns: u32) -> CellTemplate {
    let turns = turns % 4;
    let rotated_blocks = template.blocks.rot90(turns);
    let rotated_mask = template.mask.rot90(turns);

    // Rotate block-data nibbles through their block-specific tables. The
    // *positions* of the data grid rotate geometrically identically to
    // `blocks`; the *value* stored at each rotated position is additionally
    // rewritten according to the block occupying that position, since a
    // torch/repeater/comparator's facing is encoded in its data nibble.
    let rotated_data_positions = template.data.rot90(turns);
    let mut rotated_data = rotated_data_positions.clone();
    for ((y, z, x), &raw_data) in rotated_data_positions.iter() {
        let block_id = *rotated_blocks.get(y, z, x);
        let name = block_name(block_id).unwrap_or("air");
        let rewritten = rotate_block_data(name, raw_data, turns);
        rotated_data.set(y, z, x, rewritten);
    }

    let rotated_ports = template
        .ports
        .iter()
        .map(|(name, port)| {
            (
                name.clone(),
                rotate_port(port, turns, template.blocks.dims.width, template.blocks.dims.length),
            )
        })
        .collect::<HashMap<String, Port>>();

    CellTemplate {
        name: template.name.clone(),
        blocks: rotated_blocks,
        data: rotated_data,
        mask: rotated_mask,
        ports: rotated_ports,
        delay: template.delay,
    }
}

fn rotate_port(port: &Port, turns: u32, old_width: u32, old_length: u32) -> Port {
    let (y, z, x) = port.coordinates;
    let (new_z, new_x) = rotate_coord_n(z, x, old_width, old_length, turns);
    Port {
        coordinates: (y, new_z, new_x),
        facing: port.facing.rotate(turns),
        direction: port.direction,
        level: port.level,
    }
}

/// Applies `(z, x) -> (length-1-x, z)` `turns` times, tracking how `width`
/// and `length` swap on every quarter turn (matching [`Grid3::rot90`]'s
/// dimension swap) so each step uses the length the grid actually had at
/// that point in the rotation.
fn rotate_coord_n(z: u32, x: u32, width0: u32, length0: u32, turns: u32) -> (u32, u32) {
    let (mut cz, mut cx) = (z, x);
    let (mut width, mut length) = (width0, length0);
    for _ in 0..(turns % 4) {
        let new_z = length - 1 - cx;
        let new_x = cz;
        cz = new_z;
        cx = new_x;
        let (new_width, new_length) = (length, width);
        width = new_width;
        length = new_length;
    }
    (cz, cx)
}
