//! Minecraft block-ID table and per-family data-nibble rotation rules.
//!
//! Block IDs are taken verbatim from the classic Minecraft numeric ID list
//! (`"air"` is 0, `"stone"` is 1, and so on); the array index IS the block
//! ID. Torches, repeaters, and comparators encode facing in their low data
//! bits, so their rotation tables live here alongside the rest of the block
//! catalog.

/// The full Minecraft block-name catalog, indexed by block ID.
pub const BLOCK_NAMES: &[&str] = &[
    "air", "stone", "grass", "dirt", "cobblestone", "planks",
    "sapling", "bedrock", "flowing_water", "water", "flowing_lava", "lava",
    "sand", "gravel", "gold_ore", "iron_ore", "coal_ore", "log",
    "leaves", "sponge", "glass", "lapis_ore", "lapis_block", "dispenser",
    "sandstone", "noteblock", "bed", "golden_rail", "detector_rail", "sticky_piston",
    "web", "tallgrass", "deadbush", "piston", "piston_head", "wool",
    "piston_extension", "yellow_flower", "red_flower", "brown_mushroom", "red_mushroom", "gold_block",
    "iron_block", "double_stone_slab", "stone_slab", "brick_block", "tnt", "bookshelf",
    "mossy_cobblestone", "obsidian", "torch", "fire", "mob_spawner", "oak_stairs",
    "chest", "redstone_wire", "diamond_ore", "diamond_block", "crafting_table", "wheat",
    "farmland", "furnace", "lit_furnace", "standing_sign", "wooden_door", "ladder",
    "rail", "stone_stairs", "wall_sign", "lever", "stone_pressure_plate", "iron_door",
    "wooden_pressure_plate", "redstone_ore", "lit_redstone_ore", "unlit_redstone_torch", "redstone_torch", "stone_button",
    "snow_layer", "ice", "snow", "cactus", "clay", "reeds",
    "jukebox", "fence", "pumpkin", "netherrack", "soul_sand", "glowstone",
    "portal", "lit_pumpkin", "cake", "unpowered_repeater", "powered_repeater", "stained_glass",
    "trapdoor", "monster_egg", "stonebrick", "brown_mushroom_block", "red_mushroom_block", "iron_bars",
    "glass_pane", "melon_block", "pumpkin_stem", "melon_stem", "vine", "fence_gate",
    "brick_stairs", "stone_brick_stairs", "mycelium", "waterlily", "nethre_brick", "nether_brick_fence",
    "nether_brick_stairs", "nether_wart", "enchanting_table", "brewing_stand", "cauldron", "end_portal",
    "end_portal_frame", "end_stone", "dragon_egg", "redstone_lamp", "lit_redstone_lamp", "double_wooden_slab",
    "wooden_slab", "cocoa", "sandstone_stairs", "emerald_ore", "ender_chest", "tripwire_hook",
    "tripwire", "emerald_block", "spruce_stairs", "birch_stairs", "jungle_stairs", "command_block",
    "beacon", "cobblestone_wall", "flower_pot", "carrots", "potatoes", "wooden_button",
    "skull", "anvil", "trapped_chest", "light_weighted_pressure_plate", "heavy_weighted_pressure_plate", "unpowered_comparator",
    "powered_comparator", "daylight_detector", "redstone_block", "quartz_ore", "hopper", "quartz_block",
    "quartz_stairs", "activator_rail", "dropper", "stained_hardened_clay", "stained_glass_pane", "leaves2",
    "log2", "acacia_stairs", "dark_oak_stairs", "slime", "barrier", "iron_trapdoor",
    "prismarine", "sea_lantern", "hay_block", "carpet", "hardened_clay", "coal_block",
    "packed_ice", "double_plant", "standing_banner", "wall_banner", "daylight_detector_inverted", "red_sandstone",
    "red_sandstone_stairs", "double_stone_slab2", "stone_slab2", "spruce_fence_gate", "birch_fence_gate", "jungle_fence_gate",
    "dark_oak_fence_gate", "acacia_fence_gate", "spruce_fence", "birch_fence", "jungle_fence", "dark_oak_fence",
    "acacia_fence", "spruce_door", "birch_door", "jungle_door", "acacia_door", "dark_oak_door",
    "end_rod", "chorus_plant", "chorus_flower", "purpur_block", "purpur_pillar", "purpur_stairs",
    "purpur_double_slab", "purpur_slab", "end_bricks", "beetroots", "grass_path", "end_gateway",
    "repeating_command_block", "chain_command_block", "frosted_ice",
];

/// Looks up a block's numeric ID by name.
pub fn block_id(name: &str) -> Option<u8> {
    BLOCK_NAMES.iter().position(|&n| n == name).map(|i| i as u8)
}

/// Looks up a block's name by numeric ID.
pub fn block_name(id: u8) -> Option<&'static str> {
    BLOCK_NAMES.get(id as usize).copied()
}

/// Redstone torch facing, encoded in the block's data nibble.
///
/// `UP` is the only orientation without a horizontal facing and is left
/// unchanged by rotation.
pub mod torch {
    /// Torch facing east.
    pub const EAST: u8 = 1;
    /// Torch facing west.
    pub const WEST: u8 = 2;
    /// Torch facing south.
    pub const SOUTH: u8 = 3;
    /// Torch facing north.
    pub const NORTH: u8 = 4;
    /// Torch pointing straight up (floor-mounted, no horizontal facing).
    pub const UP: u8 = 5;

    const ROTATIONS: [u8; 4] = [NORTH, WEST, SOUTH, EAST];

    /// Rotates a torch's data value 90 degrees counterclockwise `turns` times.
    ///
    /// Returns `None` if `data` is not one of the five valid torch data values.
    pub fn rot90(data: u8, turns: u32) -> Option<u8> {
        if data == UP {
            return Some(UP);
        }
        let idx = ROTATIONS.iter().position(|&r| r == data)?;
        let new_idx = (idx as u32 + turns) as usize % ROTATIONS.len();
        Some(ROTATIONS[new_idx])
    }
}

/// Redstone repeater facing and delay, encoded in the block's data nibble.
///
/// The low two bits hold the facing; the next two bits hold the delay
/// setting (1-4 ticks) and are untouched by rotation.
pub mod repeater {
    /// Repeater facing north.
    pub const NORTH: u8 = 0;
    /// Repeater facing east.
    pub const EAST: u8 = 1;
    /// Repeater facing south.
    pub const SOUTH: u8 = 2;
    /// Repeater facing west.
    pub const WEST: u8 = 3;

    const ROTATIONS: [u8; 4] = [NORTH, WEST, SOUTH, EAST];

    /// Rotates a repeater's data value 90 degrees counterclockwise `turns` times.
    ///
    /// Returns `None` if the facing bits (`data & 0x3`) are not one of the
    /// four valid facings.
    ///
    /// Preserves a quirk of the data this was ported from: the rotated
    /// facing is computed but the original facing bits are what gets
    /// returned, so repeater facings are unaffected by rotation in
    /// practice. Ports must re-orient repeaters explicitly after rotating a
    /// cell rather than relying on this function to do it. See DESIGN.md.
    pub fn rot90(data: u8, turns: u32) -> Option<u8> {
        let rot_bits = data & 0x3;
        let delay_bits = data & 0xc;
        let idx = ROTATIONS.iter().position(|&r| r == rot_bits)?;
        let _new_rot_bits = {
            let new_idx = (idx as u32 + turns) as usize % ROTATIONS.len();
            ROTATIONS[new_idx] & 0x3
        };
        Some(delay_bits | rot_bits)
    }
}

/// Redstone comparator facing and mode, encoded in the block's data nibble.
///
/// Shares its facing encoding and the same rotation quirk as [`repeater`].
pub mod comparator {
    /// Comparator facing north.
    pub const NORTH: u8 = 0;
    /// Comparator facing east.
    pub const EAST: u8 = 1;
    /// Comparator facing south.
    pub const SOUTH: u8 = 2;
    /// Comparator facing west.
    pub const WEST: u8 = 3;

    const ROTATIONS: [u8; 4] = [NORTH, WEST, SOUTH, EAST];

    /// Rotates a comparator's data value 90 degrees counterclockwise `turns` times.
    ///
    /// See [`repeater::rot90`] for the rotation quirk this preserves.
    pub fn rot90(data: u8, turns: u32) -> Option<u8> {
        let rot_bits = data & 0x3;
        let other_bits = data & 0xc;
        let idx = ROTATIONS.iter().position(|&r| r == rot_bits)?;
        let _new_rot_bits = {
            let new_idx = (idx as u32 + turns) as usize % ROTATIONS.len();
            ROTATIONS[new_idx] & 0x3
        };
        Some(other_bits | rot_bits)
    }
}

/// The three torch-family block names whose data is rotated via [`torch::rot90`].
pub const TORCH_BLOCK_NAMES: &[&str] = &["redstone_torch", "unlit_redstone_torch", "torch"];

/// The two repeater-family block names whose data is rotated via [`repeater::rot90`].
pub const REPEATER_BLOCK_NAMES: &[&str] = &["unpowered_repeater", "powered_repeater"];

/// The two comparator-family block names whose data is rotated via [`comparator::rot90`].
pub const COMPARATOR_BLOCK_NAMES: &[&str] = &["unpowered_comparator", "powered_comparator"];

/// Rotates a single block's data value according to its block-name family.
///
/// Blocks outside the torch/repeater/comparator families have no
/// orientation-dependent data and are returned unchanged.
pub fn rotate_block_data(name: &str, data: u8, turns: u32) -> u8 {
    if TORCH_BLOCK_NAMES.contains(&name) {
        torch::rot90(data, turns).unwrap_or(data)
    } else if REPEATER_BLOCK_NAMES.contains(&name) {
        repeater::rot90(data, turns).unwrap_or(data)
    } else if COMPARATOR_BLOCK_NAMES.contains(&name) {
        comparator::rot90(data, turns).unwrap_or(data)
    } else {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_ids_match_classic_minecraft_order() {
        assert_eq!(block_id("air"), Some(0));
        assert_eq!(block_id("stone"), Some(1));
        assert_eq!(block_id("redstone_wire"), Some(55));
        assert_eq!(block_id("unpowered_repeater"), Some(93));
        assert_eq!(block_id("powered_repeater"), Some(94));
        assert_eq!(block_id("unpowered_comparator"), Some(149));
        assert_eq!(block_id("powered_comparator"), Some(150));
    }

    #[test]
    fn block_name_roundtrip() {
        for (i, &name) in BLOCK_NAMES.iter().enumerate() {
            assert_eq!(block_name(i as u8), Some(name));
            assert_eq!(block_id(name), Some(i as u8));
        }
    }

    #[test]
    fn unknown_block_name() {
        assert_eq!(block_id("not_a_real_block"), None);
    }

    #[test]
    fn torch_up_stays_up() {
        assert_eq!(torch::rot90(torch::UP, 1), Some(torch::UP));
        assert_eq!(torch::rot90(torch::UP, 3), Some(torch::UP));
    }

    #[test]
    fn torch_rotates_through_facings() {
        assert_eq!(torch::rot90(torch::NORTH, 1), Some(torch::WEST));
        assert_eq!(torch::rot90(torch::NORTH, 2), Some(torch::SOUTH));
        assert_eq!(torch::rot90(torch::NORTH, 4), Some(torch::NORTH));
    }

    #[test]
    fn torch_invalid_data() {
        assert_eq!(torch::rot90(200, 1), None);
    }

    #[test]
    fn repeater_preserves_delay_bits() {
        let data = repeater::EAST | 0x8; // east facing, 4-tick delay
        let rotated = repeater::rot90(data, 1).unwrap();
        assert_eq!(rotated & 0xc, 0x8);
    }

    #[test]
    fn repeater_facing_bits_unchanged_by_rotation() {
        // Carried-forward quirk: facing bits pass through unchanged.
        let data = repeater::EAST;
        assert_eq!(repeater::rot90(data, 1), Some(repeater::EAST));
        assert_eq!(repeater::rot90(data, 2), Some(repeater::EAST));
    }

    #[test]
    fn comparator_preserves_mode_bit() {
        let data = comparator::SOUTH | 0x4; // subtraction mode
        let rotated = comparator::rot90(data, 1).unwrap();
        assert_eq!(rotated & 0xc, 0x4);
    }

    #[test]
    fn rotate_block_data_dispatches_by_family() {
        assert_eq!(
            rotate_block_data("redstone_torch", torch::NORTH, 1),
            torch::WEST
        );
        assert_eq!(
            rotate_block_data("unpowered_repeater", repeater::EAST, 1),
            repeater::EAST
        );
        assert_eq!(rotate_block_data("stone", 0, 1), 0);
    }
}
