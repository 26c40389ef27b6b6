//! Token classification for a routed segment's polyline (§4.3 of
//! SPEC_FULL.md).

use crate::router::types::Coord;
use serde::{Deserialize, Serialize};

/// One conductor primitive realizing a step of a routed polyline.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ExtractedToken {
    /// A lateral redstone-wire step.
    Wire,
    /// A repeater, restoring signal strength.
    Repeater,
    /// A vertical connector stepping `Δy = +3`.
    UpVia,
    /// A vertical connector stepping `Δy = -3`.
    DownVia,
}

/// Classifies a single step `a -> b` of a polyline.
///
/// Per §4.3: `WIRE` iff `|Δy| ≤ 1` and exactly one of `|Δz|, |Δx|` equals 1
/// and the other is 0; `UP_VIA` iff `Δy = +3, Δz = Δx = 0`; `DOWN_VIA` iff
/// `Δy = -3, Δz = Δx = 0`. Any other step is a model violation, returned as
/// `None`.
pub fn classify_step(a: Coord, b: Coord) -> Option<ExtractedToken> {
    let dy = b.0 - a.0;
    let dz = b.1 - a.1;
    let dx = b.2 - a.2;

    if dy.abs() <= 1 && ((dz.abs() == 1 && dx == 0) || (dz == 0 && dx.abs() == 1)) {
        return Some(ExtractedToken::Wire);
    }
    if dy == 3 && dz == 0 && dx == 0 {
        return Some(ExtractedToken::UpVia);
    }
    if dy == -3 && dz == 0 && dx == 0 {
        return Some(ExtractedToken::DownVia);
    }
    None
}
