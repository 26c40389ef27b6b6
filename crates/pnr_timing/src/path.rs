//! A single combinational path's accumulated delay (§4.4 of
//! SPEC_FULL.md).

/// One driver-to-driven combinational path and its summed delay.
///
/// "Critical path" is simply the maximum-delay record once every DFS
/// branch completes — no separate slack/required-time machinery, since
/// SPEC_FULL.md defines timing purely in terms of summed delays with no
/// target frequency or constraint file in scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathDelay {
    /// The template name of the driver cell this path started at.
    pub source: String,
    /// The template name of the driven cell this path terminated at.
    pub sink: String,
    /// The summed combinational-cell and conductor delay along the path.
    pub delay: i64,
    /// Every cell's template name visited along the path, in order,
    /// including both endpoints.
    pub cells: Vec<String>,
}
