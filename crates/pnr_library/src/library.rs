//! Cell library loading: the structured JSON document mapping cell names to
//! [`CellTemplate`]s (§6 and §6.1 of SPEC_FULL.md).
//!
//! The original loads this document as YAML; no crate in this workspace's
//! dependency stack parses YAML, so the library file is JSON here instead —
//! a 1:1 structural port differing only in surface syntax, resolved as an
//! Open Question in SPEC_FULL.md §9.

use crate::grid::Grid3;
use crate::template::{CellTemplate, Delay, Facing, PinDirection, Port};
use pnr_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use pnr_source::{FileId, Span};
use serde::Deserialize;
use std::collections::HashMap;

/// The raw JSON shape of a cell library document, deserialized before being
/// converted (and shape-validated) into [`Library`].
#[derive(Deserialize)]
struct RawLibrary {
    library_name: String,
    cells: HashMap<String, RawCell>,
}

#[derive(Deserialize)]
struct RawCell {
    blocks: Vec<Vec<Vec<u8>>>,
    data: Vec<Vec<Vec<u8>>>,
    #[serde(default)]
    mask: Option<Vec<Vec<Vec<bool>>>>,
    pins: HashMap<String, RawPin>,
    #[serde(default)]
    delay: RawDelay,
}

#[derive(Deserialize)]
struct RawPin {
    coordinates: (u32, u32, u32),
    facing: Facing,
    direction: PinDirection,
    level: i64,
}

#[derive(Deserialize, Default)]
struct RawDelay {
    combinational: Option<i64>,
}

/// A loaded cell library: a name plus every [`CellTemplate`] it defines.
#[derive(Debug, Clone)]
pub struct Library {
    /// The library's declared name.
    pub library_name: String,
    /// Every template the library defines, keyed by cell name.
    pub cells: HashMap<String, CellTemplate>,
}

/// Parses and shape-validates a cell library from a JSON string.
///
/// Malformed JSON is reported as a single fatal [`Diagnostic`] and `None` is
/// returned. A per-cell shape mismatch (`blocks`/`data`/`mask`/port
/// coordinates disagreeing) is reported as its own diagnostic but does not
/// stop the scan — every offending cell is reported before the overall
/// `None` is returned, per SPEC_FULL.md's "accumulate in a sink rather than
/// stop at the first error" convention.
pub fn load_library(content: &str, file: FileId, sink: &DiagnosticSink) -> Option<Library> {
    let raw: RawLibrary = match serde_json::from_str(content) {
        Ok(raw) => raw,
        Err(e) => {
            sink.emit(Diagnostic::error(
                DiagnosticCode::new(Category::Error, 100),
                format!("failed to parse cell library: {e}"),
                Span::new(file, 0, content.len().min(u32::MAX as usize) as u32),
            ));
            return None;
        }
    };

    let mut cells = HashMap::with_capacity(raw.cells.len());
    let mut ok = true;
    for (name, raw_cell) in raw.cells {
        match build_template(&name, raw_cell) {
            Ok(template) => {
                if let Err(msg) = template.validate_shape() {
                    ok = false;
                    sink.emit(Diagnostic::error(
                        DiagnosticCode::new(Category::Error, 101),
                        format!("shape mismatch in cell '{name}': {msg}"),
                        Span::new(file, 0, 0),
                    ));
                } else {
                    cells.insert(name, template);
                }
            }
            Err(msg) => {
                ok = false;
                sink.emit(Diagnostic::error(
                    DiagnosticCode::new(Category::Error, 101),
                    format!("shape mismatch in cell '{name}': {msg}"),
                    Span::new(file, 0, 0),
                ));
            }
        }
    }

    if !ok {
        return None;
    }

    Some(Library {
        library_name: raw.library_name,
        cells,
    })
}

fn build_template(name: &str, raw: RawCell) -> Result<CellTemplate, String> {
    let blocks = Grid3::from_nested(raw.blocks)
        .ok_or_else(|| "blocks grid is ragged (rows of differing length)".to_string())?;
    let data = Grid3::from_nested(raw.data)
        .ok_or_else(|| "data grid is ragged (rows of differing length)".to_string())?;
    let mask = match raw.mask {
        Some(m) => Grid3::from_nested(m)
            .ok_or_else(|| "mask grid is ragged (rows of differing length)".to_string())?,
        None => Grid3::filled(blocks.dims, true),
    };
    let ports = raw
        .pins
        .into_iter()
        .map(|(pin_name, pin)| {
            (
                pin_name,
                Port {
                    coordinates: pin.coordinates,
                    facing: pin.facing,
                    direction: pin.direction,
                    level: pin.level,
                },
            )
        })
        .collect();
    Ok(CellTemplate {
        name: name.to_string(),
        blocks,
        data,
        mask,
        ports,
        delay: Delay {
            combinational: raw.delay.combinational,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "library_name": "quan",
            "cells": {
                "inv": {
                    "blocks": [[[1, 1, 1]]],
                    "data": [[[0, 0, 0]]],
                    "pins": {
                        "A": {"coordinates": [0, 0, 0], "facing": "west", "direction": "input", "level": 15},
                        "Y": {"coordinates": [0, 0, 2], "facing": "east", "direction": "output", "level": 15}
                    },
                    "delay": {"combinational": 1}
                }
            }
        }"#
    }

    #[test]
    fn loads_valid_library() {
        let sink = DiagnosticSink::new();
        let lib = load_library(sample_json(), FileId::DUMMY, &sink).unwrap();
        assert_eq!(lib.library_name, "quan");
        assert_eq!(lib.cells.len(), 1);
        assert!(!sink.has_errors());
        let inv = &lib.cells["inv"];
        assert_eq!(inv.ports["A"].direction, PinDirection::Input);
        assert_eq!(inv.delay.combinational, Some(1));
    }

    #[test]
    fn missing_mask_defaults_to_all_true() {
        let sink = DiagnosticSink::new();
        let lib = load_library(sample_json(), FileId::DUMMY, &sink).unwrap();
        let inv = &lib.cells["inv"];
        assert_eq!(*inv.mask.get(0, 0, 0), true);
    }

    #[test]
    fn malformed_json_emits_diagnostic_and_none() {
        let sink = DiagnosticSink::new();
        let result = load_library("not json at all", FileId::DUMMY, &sink);
        assert!(result.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn shape_mismatch_emits_diagnostic_and_none() {
        let bad = r#"{
            "library_name": "quan",
            "cells": {
                "broken": {
                    "blocks": [[[1, 1]]],
                    "data": [[[0, 0, 0]]],
                    "pins": {},
                    "delay": {}
                }
            }
        }"#;
        let sink = DiagnosticSink::new();
        let result = load_library(bad, FileId::DUMMY, &sink);
        assert!(result.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn multiple_shape_errors_all_reported() {
        let bad = r#"{
            "library_name": "quan",
            "cells": {
                "a": {"blocks": [[[1,1]]], "data": [[[0,0,0]]], "pins": {}, "delay": {}},
                "b": {"blocks": [[[1,1,1]]], "data": [[[0,0]]], "pins": {}, "delay": {}}
            }
        }"#;
        let sink = DiagnosticSink::new();
        let result = load_library(bad, FileId::DUMMY, &sink);
        assert!(result.is_none());
        assert_eq!(sink.error_count(), 2);
    }
}
