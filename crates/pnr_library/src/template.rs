//! Cell templates: a standard cell's 3D block layout and pin geometry.

use crate::grid::{Dims, Grid3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The four horizontal facings a port or a torch/repeater/comparator block
/// can have. Rotation advances a facing through this cycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Facing north (-Z).
    North,
    /// Facing east (+X).
    East,
    /// Facing south (+Z).
    South,
    /// Facing west (-X).
    West,
}

impl Facing {
    const ROTATION_ORDER: [Facing; 4] = [Facing::East, Facing::North, Facing::West, Facing::South];

    /// Advances this facing by `turns` 90-degree counter-clockwise steps
    /// about Y, per §3's port rotation rule: facing advances through
    /// `[east, north, west, south]` by `+turns mod 4`.
    pub fn rotate(self, turns: u32) -> Facing {
        let idx = Self::ROTATION_ORDER
            .iter()
            .position(|&f| f == self)
            .expect("Facing::ROTATION_ORDER is exhaustive over Facing");
        Self::ROTATION_ORDER[(idx + turns as usize) % 4]
    }

    /// Returns the unit step `(dz, dx)` this facing points toward.
    pub fn step(self) -> (i64, i64) {
        match self {
            Facing::North => (-1, 0),
            Facing::South => (1, 0),
            Facing::East => (0, 1),
            Facing::West => (0, -1),
        }
    }
}

/// Whether a port drives signal into the cell or carries it out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    /// The port receives a signal from its connected net.
    Input,
    /// The port drives a signal onto its connected net.
    Output,
}

/// A named connection point on a [`CellTemplate`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Port {
    /// The port's local `(y, z, x)` coordinate within the template's grids.
    pub coordinates: (u32, u32, u32),
    /// The direction this port faces (determines its `route_coord`).
    pub facing: Facing,
    /// Whether this port is an input or output.
    pub direction: PinDirection,
    /// The signal level this port operates at.
    ///
    /// Threaded through unchanged by every engine; no current engine
    /// consumes it beyond round-tripping, matching the original's forward
    /// compatibility with multi-level signaling.
    pub level: i64,
}

/// Per-cell delay figures. Only `combinational` is consumed by the timing
/// engine; any other keys a library document carries are not modeled here.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Delay {
    /// The cell's combinational (gate) delay, in engine ticks.
    pub combinational: Option<i64>,
}

/// A standard cell's physical layout: block/data/mask grids and named ports.
///
/// Invariant: `blocks`, `data`, and `mask` share identical dimensions, and
/// every port's coordinate lies within those dimensions. This invariant is
/// established once at library load time ([`crate::library::load_library`])
/// and never violated afterward — every [`crate::pregenerated::PregeneratedCells`]
/// rotation preserves it by construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellTemplate {
    /// The template's name, matching a netlist cell instance's template
    /// reference.
    pub name: String,
    /// Block IDs, one per voxel.
    pub blocks: Grid3<u8>,
    /// Block data nibbles (orientation/state), one per voxel.
    pub data: Grid3<u8>,
    /// Whether each voxel participates in overlap/placement checks.
    pub mask: Grid3<bool>,
    /// Named ports, keyed by port name.
    pub ports: HashMap<String, Port>,
    /// The cell's delay figures.
    pub delay: Delay,
}

impl CellTemplate {
    /// Returns `Ok(())` if `blocks`, `data`, `mask` share identical
    /// dimensions and every port coordinate lies within them; otherwise
    /// returns a description of the first mismatch found.
    pub fn validate_shape(&self) -> Result<(), String> {
        if self.blocks.dims != self.data.dims {
            return Err(format!(
                "cell '{}': blocks dims {:?} != data dims {:?}",
                self.name, self.blocks.dims, self.data.dims
            ));
        }
        if self.blocks.dims != self.mask.dims {
            return Err(format!(
                "cell '{}': blocks dims {:?} != mask dims {:?}",
                self.name, self.blocks.dims, self.mask.dims
            ));
        }
        for (name, port) in &self.ports {
            let (y, z, x) = port.coordinates;
            if !self.blocks.dims.contains(y as i64, z as i64, x as i64) {
                return Err(format!(
                    "cell '{}': port '{name}' coordinate {:?} outside shape {:?}",
                    self.name, port.coordinates, self.blocks.dims
                ));
            }
        }
        Ok(())
    }

    /// Returns this template's shape, common to `blocks`, `data`, and `mask`.
    pub fn dims(&self) -> Dims {
        self.blocks.dims
    }
}
