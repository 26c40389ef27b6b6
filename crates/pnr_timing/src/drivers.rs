//! Driver/driven cell-type classification (§4.4 and §4.4.1 of
//! SPEC_FULL.md).
//!
//! A cell instance's *placement name* is its library template name, so
//! these sets are matched against [`pnr_core::placement::Placement::name`]
//! directly. A library that adds a third sequential element type only
//! needs a different [`DriverDrivenSets`] value, not an engine code change.

use std::collections::HashSet;

/// The cell-type names that act as path sources and path sinks.
///
/// Drivers are primary inputs and sequential-element outputs; driven
/// endpoints are primary outputs and sequential-element inputs. A type
/// (e.g. `"DFF"`) may legitimately appear in both sets: it sinks the path
/// leading into it and sources a fresh path leaving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverDrivenSets {
    /// Template names a combinational path may start from.
    pub drivers: HashSet<String>,
    /// Template names a combinational path terminates at.
    pub driven: HashSet<String>,
}

impl DriverDrivenSets {
    /// Builds a set from explicit driver/driven name lists.
    pub fn new(drivers: impl IntoIterator<Item = String>, driven: impl IntoIterator<Item = String>) -> Self {
        Self {
            drivers: drivers.into_iter().collect(),
            driven: driven.into_iter().collect(),
        }
    }

    /// The configured default named in §4.4: `{input_pin, DFF}` drive,
    /// `{output_pin, DFF}` are driven.
    pub fn default_cell_types() -> Self {
        Self::new(
            ["input_pin".to_string(), "DFF".to_string()],
            ["output_pin".to_string(), "DFF".to_string()],
        )
    }
}

impl Default for DriverDrivenSets {
    fn default() -> Self {
        Self::default_cell_types()
    }
}
