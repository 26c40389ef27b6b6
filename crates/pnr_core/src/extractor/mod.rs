//! Path-to-physical-realization pass: turns each routed segment's polyline
//! into a tagged token sequence and paints the result into a [`Layout`]
//! (§4.3 of SPEC_FULL.md).

pub mod error;
pub mod paint;
pub mod repeater;
pub mod tokens;

pub use error::ExtractionError;
pub use tokens::ExtractedToken;

use crate::placement::layout::Layout;
use crate::router::types::{Coord, Routing, Segment};
use std::collections::HashMap;

/// One segment's extracted token sequence, paired with the coordinate each
/// token lands on.
#[derive(Clone, Debug)]
pub struct ExtractedSegment {
    /// `tokens[i]` is the conductor primitive realizing the step landing on
    /// `coords[i + 1]`.
    pub tokens: Vec<ExtractedToken>,
    /// The full polyline this segment's tokens step through, including both
    /// endpoints (`coords.len() == tokens.len() + 1`).
    pub coords: Vec<Coord>,
}

/// A net's full extraction: one [`ExtractedSegment`] per routed segment, in
/// the same order as [`crate::router::types::NetRouting::segments`].
#[derive(Clone, Debug, Default)]
pub struct ExtractedNet {
    /// Every segment's extracted tokens.
    pub segments: Vec<ExtractedSegment>,
}

/// Every net's extraction result.
pub type Extraction = HashMap<String, ExtractedNet>;

/// Classifies every step of one segment's polyline and inserts repeaters.
///
/// The coordinate sequence fed to the classifier/repeater passes is the
/// segment's `net`, which already includes both `route_coord` endpoints
/// (§3's `Segment::net`) — no additional endpoint coordinates need to be
/// prepended.
fn extract_segment(net_name: &str, segment: &Segment) -> Result<ExtractedSegment, ExtractionError> {
    let coords = &segment.net;
    let driver = segment.driver().route_coord;
    let driven = segment.driven().route_coord;

    let mut tokens = Vec::with_capacity(coords.len().saturating_sub(1));
    for window in coords.windows(2) {
        let (a, b) = (window[0], window[1]);
        let token = tokens::classify_step(a, b).ok_or(ExtractionError::InvalidStep {
            net: net_name.to_string(),
            driver,
            driven,
            from: a,
            to: b,
        })?;
        tokens.push(token);
    }

    repeater::place_repeaters(&mut tokens, coords, net_name, driver, driven)?;

    Ok(ExtractedSegment {
        tokens,
        coords: coords.clone(),
    })
}

/// Extracts every net's routing into tagged token sequences.
///
/// Extraction is fatal on the first failure (§7: "tokenization finds an
/// impossible step, or repeaters cannot be placed — fatal"), unlike the
/// router's rip-up loop, which treats a single failed maze-route as
/// recoverable and retries. There is nothing to retry here: a segment's
/// polyline is whatever the router already committed to, so a classification
/// or repeater failure means the router produced a segment extraction can
/// never realize, and the whole run stops.
pub fn extract_routing(routing: &Routing) -> Result<Extraction, ExtractionError> {
    let mut extraction = Extraction::new();
    for (net_name, net_routing) in routing {
        let mut extracted_net = ExtractedNet::default();
        for segment in &net_routing.segments {
            extracted_net
                .segments
                .push(extract_segment(net_name, segment)?);
        }
        extraction.insert(net_name.clone(), extracted_net);
    }
    Ok(extraction)
}

/// Paints every net's extracted tokens into `layout`.
pub fn paint_extraction(extraction: &Extraction, layout: &mut Layout) {
    for net in extraction.values() {
        for segment in &net.segments {
            paint::paint_tokens(layout, &segment.tokens, &segment.coords);
        }
    }
}
