//! Per-segment conductor delay (§4.4 of SPEC_FULL.md).

use pnr_core::extractor::{ExtractedSegment, ExtractedToken};

/// Sums a segment's token delays: `WIRE=0, REPEATER=1, UP_VIA=2, DOWN_VIA=2`
/// engine ticks.
pub fn segment_delay(segment: &ExtractedSegment) -> i64 {
    segment
        .tokens
        .iter()
        .map(|token| match token {
            ExtractedToken::Wire => 0,
            ExtractedToken::Repeater => 1,
            ExtractedToken::UpVia => 2,
            ExtractedToken::DownVia => 2,
        })
        .sum()
}
