//! Painting classified tokens into a [`Layout`]'s block grid (§4.3 of
//! SPEC_FULL.md).

use crate::extractor::tokens::ExtractedToken;
use crate::placement::layout::Layout;
use crate::router::types::Coord;
use pnr_library::blocks::block_id;

/// Paints one token landing at `coord` into `layout`, per §4.3's per-token
/// block rules. Voxels outside `layout.dims` are silently dropped, the same
/// convention [`crate::placement::layout::placement_to_layout`] uses.
fn paint_token(layout: &mut Layout, token: ExtractedToken, coord: Coord) {
    let mut set = |dy: i64, block_name: &str| {
        let (y, z, x) = (coord.0 + dy, coord.1, coord.2);
        if y < 0 || z < 0 || x < 0 {
            return;
        }
        if !layout.dims.contains(y, z, x) {
            return;
        }
        let Some(block) = block_id(block_name) else {
            return;
        };
        layout.blocks.set(y as u32, z as u32, x as u32, block);
    };

    match token {
        ExtractedToken::Wire => {
            set(0, "redstone_wire");
            set(-1, if coord.0 == 1 { "stone" } else { "planks" });
        }
        ExtractedToken::Repeater => {
            set(0, "unpowered_repeater");
            set(-1, if coord.0 == 1 { "stone" } else { "planks" });
        }
        ExtractedToken::UpVia => {
            set(-1, "stone");
            set(0, "stone");
            set(1, "redstone_torch");
            set(2, "planks");
            set(3, "unlit_redstone_torch");
        }
        ExtractedToken::DownVia => {
            set(0, "sticky_piston");
            set(-1, "redstone_block");
            set(-2, "air");
            set(-3, "stone");
        }
    }
}

/// Paints every token of `tokens`, each landing at the corresponding
/// `coords[i + 1]`, into `layout`.
///
/// `coords.len() == tokens.len() + 1` — the same convention
/// [`crate::extractor::repeater::place_repeaters`] uses.
pub fn paint_tokens(layout: &mut Layout, tokens: &[ExtractedToken], coords: &[Coord]) {
    debug_assert_eq!(coords.len(), tokens.len() + 1);
    for (i, &token) in tokens.iter().enumerate() {
        paint_token(layout, token, coords[i + 1]);
    }
}
