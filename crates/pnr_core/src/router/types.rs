//! Routing data model: extended pins, segments, and the per-net routing
//! result (§3 of SPEC_FULL.md).

use std::collections::{HashMap, HashSet};

/// A 3D voxel coordinate in `(y, z, x)` order.
pub type Coord = (i64, i64, i64);

/// A net's pin, extended with its router-relevant coordinates.
///
/// `route_coord` is `pin_coord` advanced one cell in the port's facing
/// direction, so the conductor never collides with the pin cell itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedPin {
    /// Index into the placements slice this pin belongs to.
    pub cell_index: usize,
    /// The port name on that placement.
    pub port: String,
    /// The port's coordinate in global space.
    pub pin_coord: Coord,
    /// `pin_coord` advanced one step in the port's facing direction.
    pub route_coord: Coord,
    /// Whether this pin drives the net (`true`) or is driven by it.
    pub is_output: bool,
}

/// The realized conductor between two pins on the same net.
///
/// `wire` and `violation` are modeled as sparse coordinate sets rather than
/// dense [`pnr_library::Grid3`] grids sized to the whole layout — a
/// dense-per-segment grid would mean allocating the full placed volume once
/// per net, which is wasteful since a segment's own footprint is a tiny
/// fraction of it. Every voxel the spec's dense grids would mark `true` is
/// exactly the set of coordinates present here. See DESIGN.md.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// The two endpoints, `[driver, driven]`.
    pub pins: [ExtendedPin; 2],
    /// The realized polyline, `net[0] == driver.route_coord`, `net[-1] ==
    /// driven.route_coord`.
    pub net: Vec<Coord>,
    /// Every coordinate `net` occupies.
    pub wire: HashSet<Coord>,
    /// The proximity region this segment's conductor forbids other nets
    /// from entering, per §4.2's violation model.
    pub violation: HashSet<Coord>,
}

impl Segment {
    /// The segment's driver pin (`pins[0]`).
    pub fn driver(&self) -> &ExtendedPin {
        &self.pins[0]
    }

    /// The segment's driven pin (`pins[1]`).
    pub fn driven(&self) -> &ExtendedPin {
        &self.pins[1]
    }
}

/// A net's full routing result: its pins and the segments connecting them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetRouting {
    /// Every pin on this net, in the order [`crate::router::mst::collect_nets`]
    /// encountered them.
    pub pins: Vec<ExtendedPin>,
    /// The segments realizing this net's MST, one per DAG edge.
    pub segments: Vec<Segment>,
}

/// The router's output: every multi-pin net's realized routing.
///
/// Nets with fewer than two pins are omitted entirely (§4.2: "per net with
/// ≥2 pins").
pub type Routing = HashMap<String, NetRouting>;
