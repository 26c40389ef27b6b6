//! BLIF-style netlist parser (§6 of SPEC_FULL.md).
//!
//! Line-oriented: `#` begins a comment, a trailing backslash continues a
//! logical line onto the next physical one. Recognized directives are
//! `.model`, `.inputs`, `.outputs`, `.clock`, `.names` (+ cover lines),
//! `.subckt`, and `.end`; anything else is an unrecognized-directive error.

use crate::ids::CellId;
use crate::model::{CellInstance, NamesGate, Netlist};
use pnr_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use pnr_source::{FileId, Span};
use std::collections::HashMap;

/// A logical line: comment-stripped, continuation-joined, with the byte span
/// of its first physical line (diagnostics point at the directive's start,
/// not the full joined extent).
struct LogicalLine {
    text: String,
    span: Span,
}

/// Joins `\`-continued physical lines into logical lines and strips `#`
/// comments, tracking each logical line's starting byte offset.
fn logical_lines(content: &str, file: FileId) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut pending: Option<(String, u32)> = None;
    let mut offset = 0u32;

    for raw in content.split_inclusive('\n') {
        let line_start = offset;
        offset += raw.len() as u32;
        let stripped = raw.strip_suffix('\n').unwrap_or(raw);
        let stripped = stripped.strip_suffix('\r').unwrap_or(stripped);

        let without_comment = match stripped.find('#') {
            Some(idx) => &stripped[..idx],
            None => stripped,
        };

        let (start, mut acc) = pending.take().unwrap_or((line_start, String::new()));
        let continues = without_comment.trim_end().ends_with('\\');
        let content_part = without_comment.trim_end().trim_end_matches('\\');

        if !acc.is_empty() {
            acc.push(' ');
        }
        acc.push_str(content_part.trim());

        if continues {
            pending = Some((start, acc));
        } else {
            if !acc.trim().is_empty() {
                let end = line_start + stripped.len() as u32;
                out.push(LogicalLine {
                    text: acc,
                    span: Span::new(file, start, end.max(start)),
                });
            }
        }
    }
    if let Some((start, acc)) = pending {
        if !acc.trim().is_empty() {
            out.push(LogicalLine {
                text: acc,
                span: Span::new(file, start, offset.max(start)),
            });
        }
    }
    out
}

fn err(sink: &DiagnosticSink, number: u16, message: impl Into<String>, span: Span) {
    sink.emit(Diagnostic::error(
        DiagnosticCode::new(Category::Error, number),
        message,
        span,
    ));
}

/// Parses a BLIF netlist from source text.
///
/// Reports every malformed directive through `sink` rather than stopping at
/// the first error, then returns `None` if any error was emitted; otherwise
/// returns the parsed [`Netlist`].
pub fn parse_blif(content: &str, file: FileId, sink: &DiagnosticSink) -> Option<Netlist> {
    let lines = logical_lines(content, file);
    let mut netlist = Netlist::default();
    let mut ok = true;
    let mut next_cell_id = 0u32;
    let mut saw_model = false;
    let mut saw_end = false;

    // `.names` block state: the gate under construction, fed cover rows
    // until the next directive line.
    let mut current_names: Option<NamesGate> = None;

    let flush_names = |netlist: &mut Netlist, current: &mut Option<NamesGate>| {
        if let Some(gate) = current.take() {
            netlist.logic_gates.push(gate);
        }
    };

    for line in &lines {
        let tokens: Vec<&str> = line.text.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if !tokens[0].starts_with('.') {
            // A cover row belonging to the currently open `.names` block.
            if let Some(gate) = current_names.as_mut() {
                gate.cover.push(tokens.iter().map(|t| t.to_string()).collect());
                continue;
            }
            ok = false;
            err(
                sink,
                200,
                format!("unexpected line outside any directive: '{}'", line.text),
                line.span,
            );
            continue;
        }

        // Any new directive closes an in-progress `.names` block.
        flush_names(&mut netlist, &mut current_names);

        match tokens[0] {
            ".model" => {
                if tokens.len() != 2 {
                    ok = false;
                    err(sink, 201, "'.model' requires exactly one name", line.span);
                    continue;
                }
                saw_model = true;
                netlist.model = tokens[1].to_string();
            }
            ".inputs" => {
                netlist.inputs.extend(tokens[1..].iter().map(|t| t.to_string()));
            }
            ".outputs" => {
                netlist.outputs.extend(tokens[1..].iter().map(|t| t.to_string()));
            }
            ".clock" => {
                netlist.clocks.extend(tokens[1..].iter().map(|t| t.to_string()));
            }
            ".names" => {
                if tokens.len() < 2 {
                    ok = false;
                    err(
                        sink,
                        202,
                        "'.names' requires at least one net (the output)",
                        line.span,
                    );
                    continue;
                }
                let (output, inputs) = tokens[1..].split_last().unwrap();
                current_names = Some(NamesGate {
                    inputs: inputs.iter().map(|t| t.to_string()).collect(),
                    output: output.to_string(),
                    cover: Vec::new(),
                    span: line.span,
                });
            }
            ".subckt" => {
                if tokens.len() < 2 {
                    ok = false;
                    err(sink, 203, "'.subckt' requires a template name", line.span);
                    continue;
                }
                let mut pins = HashMap::new();
                let mut subckt_ok = true;
                for assignment in &tokens[2..] {
                    match assignment.split_once('=') {
                        Some((port, net)) if !port.is_empty() && !net.is_empty() => {
                            pins.insert(port.to_string(), net.to_string());
                        }
                        _ => {
                            subckt_ok = false;
                            err(
                                sink,
                                204,
                                format!("malformed pin assignment '{assignment}', expected 'pin=net'"),
                                line.span,
                            );
                        }
                    }
                }
                if !subckt_ok {
                    ok = false;
                    continue;
                }
                netlist.cells.push(CellInstance {
                    id: CellId::from_raw(next_cell_id),
                    template: tokens[1].to_string(),
                    pins,
                    span: line.span,
                });
                next_cell_id += 1;
            }
            ".end" => {
                saw_end = true;
            }
            other => {
                ok = false;
                err(
                    sink,
                    205,
                    format!("unrecognized BLIF directive '{other}'"),
                    line.span,
                );
            }
        }
    }
    flush_names(&mut netlist, &mut current_names);

    if !saw_model {
        ok = false;
        err(
            sink,
            206,
            "missing required '.model' directive",
            Span::new(file, 0, 0),
        );
    }
    if !saw_end {
        ok = false;
        err(
            sink,
            207,
            "missing required '.end' directive",
            Span::new(file, 0, 0),
        );
    }

    if ok {
        Some(netlist)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> (Option<Netlist>, DiagnosticSink) {
        let sink = DiagnosticSink::new();
        let nl = parse_blif(src, FileId::from_raw(0), &sink);
        (nl, sink)
    }

    #[test]
    fn minimal_model() {
        let (nl, sink) = parse(".model top\n.end\n");
        assert!(!sink.has_errors());
        let nl = nl.unwrap();
        assert_eq!(nl.model, "top");
        assert!(nl.is_empty());
    }

    #[test]
    fn inputs_outputs_clocks() {
        let src = ".model top\n.inputs a b\n.outputs y\n.clock clk\n.end\n";
        let (nl, sink) = parse(src);
        assert!(!sink.has_errors());
        let nl = nl.unwrap();
        assert_eq!(nl.inputs, vec!["a", "b"]);
        assert_eq!(nl.outputs, vec!["y"]);
        assert_eq!(nl.clocks, vec!["clk"]);
    }

    #[test]
    fn subckt_cell_instance() {
        let src = ".model top\n.subckt inv A=n1 Y=n2\n.end\n";
        let (nl, sink) = parse(src);
        assert!(!sink.has_errors());
        let nl = nl.unwrap();
        assert_eq!(nl.cells.len(), 1);
        assert_eq!(nl.cells[0].template, "inv");
        assert_eq!(nl.cells[0].pins["A"], "n1");
        assert_eq!(nl.cells[0].pins["Y"], "n2");
    }

    #[test]
    fn two_chained_inverters_get_distinct_ids() {
        let src = ".model top\n.subckt inv A=a Y=b\n.subckt inv A=b Y=c\n.end\n";
        let (nl, _) = parse(src);
        let nl = nl.unwrap();
        assert_eq!(nl.cells[0].id, CellId::from_raw(0));
        assert_eq!(nl.cells[1].id, CellId::from_raw(1));
    }

    #[test]
    fn names_block_collects_cover_rows() {
        let src = ".model top\n.inputs a b\n.outputs y\n.names a b y\n11 1\n.end\n";
        let (nl, sink) = parse(src);
        assert!(!sink.has_errors());
        let nl = nl.unwrap();
        assert_eq!(nl.logic_gates.len(), 1);
        let gate = &nl.logic_gates[0];
        assert_eq!(gate.inputs, vec!["a", "b"]);
        assert_eq!(gate.output, "y");
        assert_eq!(gate.cover, vec![vec!["11".to_string(), "1".to_string()]]);
    }

    #[test]
    fn trailing_backslash_continues_line() {
        let src = ".model top\n.inputs a \\\nb c\n.end\n";
        let (nl, sink) = parse(src);
        assert!(!sink.has_errors());
        assert_eq!(nl.unwrap().inputs, vec!["a", "b", "c"]);
    }

    #[test]
    fn comment_lines_ignored() {
        let src = "# a full comment line\n.model top # trailing comment\n.end\n";
        let (nl, sink) = parse(src);
        assert!(!sink.has_errors());
        assert_eq!(nl.unwrap().model, "top");
    }

    #[test]
    fn unknown_directive_fails() {
        let (nl, sink) = parse(".model top\n.frobnicate a b\n.end\n");
        assert!(nl.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn missing_model_fails() {
        let (nl, sink) = parse(".end\n");
        assert!(nl.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn missing_end_fails() {
        let (nl, sink) = parse(".model top\n");
        assert!(nl.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn malformed_subckt_assignment_fails() {
        let (nl, sink) = parse(".model top\n.subckt inv justaname\n.end\n");
        assert!(nl.is_none());
        assert!(sink.has_errors());
    }

    #[test]
    fn loose_line_outside_directive_fails() {
        let (nl, sink) = parse(".model top\nfloating tokens\n.end\n");
        assert!(nl.is_none());
        assert!(sink.has_errors());
    }
}
