//! The netlist data model: primary I/O, clocks, and cell instances (§3 of
//! SPEC_FULL.md).

use crate::ids::CellId;
use pnr_source::Span;
use std::collections::HashMap;

/// A single `.names` combinational-logic block from a BLIF netlist.
///
/// Recognized by the parser so `.names` is never an "unknown directive"
/// failure, but not consumed by the placer/router/timing engines — those
/// operate purely over `.subckt` cell instances naming a library template,
/// per §4's component contracts. See DESIGN.md for why this stays
/// parse-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamesGate {
    /// The block's input net names, in declaration order.
    pub inputs: Vec<String>,
    /// The block's single output net name.
    pub output: String,
    /// Cover rows following the `.names` line, each a whitespace-split list
    /// of literal tokens (e.g. `["1", "1", "1"]` for a 2-input AND's single
    /// on-set row).
    pub cover: Vec<Vec<String>>,
    /// Source span of the `.names` directive line itself.
    pub span: Span,
}

/// A cell instance: one `.subckt` line, naming a library template and a
/// port-to-net mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellInstance {
    /// This instance's unique ID within its netlist.
    pub id: CellId,
    /// The name of the [`pnr_library::CellTemplate`] this instance realizes.
    pub template: String,
    /// Maps this instance's port names to the net names they connect to.
    pub pins: HashMap<String, String>,
    /// Source span of the `.subckt` directive line.
    pub span: Span,
}

/// A parsed BLIF-style netlist (§6 of SPEC_FULL.md).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Netlist {
    /// The `.model` name.
    pub model: String,
    /// Primary input net names, from `.inputs`.
    pub inputs: Vec<String>,
    /// Primary output net names, from `.outputs`.
    pub outputs: Vec<String>,
    /// Clock net names, from `.clock`.
    pub clocks: Vec<String>,
    /// Every `.subckt` cell instance, in declaration order.
    pub cells: Vec<CellInstance>,
    /// Every `.names` combinational-logic block, in declaration order.
    pub logic_gates: Vec<NamesGate>,
}

impl Netlist {
    /// Returns the net name connected to `port` on the given cell instance,
    /// if that port is wired.
    pub fn net_for_pin(&self, cell: CellId, port: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.id == cell)
            .and_then(|c| c.pins.get(port))
            .map(String::as_str)
    }

    /// Returns the cell instance with the given ID, if any.
    pub fn cell(&self, id: CellId) -> Option<&CellInstance> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Returns `true` if this netlist declares no cell instances.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_for_pin_looks_up_wiring() {
        let mut pins = HashMap::new();
        pins.insert("A".to_string(), "n1".to_string());
        let nl = Netlist {
            model: "top".into(),
            cells: vec![CellInstance {
                id: CellId::from_raw(0),
                template: "inv".into(),
                pins,
                span: Span::DUMMY,
            }],
            ..Default::default()
        };
        assert_eq!(nl.net_for_pin(CellId::from_raw(0), "A"), Some("n1"));
        assert_eq!(nl.net_for_pin(CellId::from_raw(0), "Z"), None);
        assert_eq!(nl.net_for_pin(CellId::from_raw(1), "A"), None);
    }

    #[test]
    fn empty_netlist_is_empty() {
        let nl = Netlist::default();
        assert!(nl.is_empty());
    }
}
