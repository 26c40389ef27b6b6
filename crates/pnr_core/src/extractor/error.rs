//! Extraction failure modes (§7 of SPEC_FULL.md): fatal, reported by net
//! name and endpoints.

use crate::router::types::Coord;

/// A fatal failure extracting one segment's tokens or repeaters.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ExtractionError {
    /// A consecutive pair of polyline coordinates did not classify as any
    /// legal step (§4.3's token classification).
    #[error(
        "net '{net}' segment {driver:?} -> {driven:?}: impossible step from {from:?} to {to:?}"
    )]
    InvalidStep {
        /// The net this segment belongs to.
        net: String,
        /// The segment's driver-side endpoint coordinate.
        driver: Coord,
        /// The segment's driven-side endpoint coordinate.
        driven: Coord,
        /// The polyline coordinate the offending step started from.
        from: Coord,
        /// The polyline coordinate the offending step landed on.
        to: Coord,
    },

    /// Repeater insertion exhausted every candidate slot in a subsection
    /// without finding one whose neighbors are collinear.
    #[error("net '{net}' segment {driver:?} -> {driven:?}: cannot place repeaters")]
    CannotPlaceRepeaters {
        /// The net this segment belongs to.
        net: String,
        /// The segment's driver-side endpoint coordinate.
        driver: Coord,
        /// The segment's driven-side endpoint coordinate.
        driven: Coord,
    },
}
